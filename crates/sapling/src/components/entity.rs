use glam::Vec2;

use crate::api::error::{SceneError, SceneResult};
use crate::api::types::EntityId;
use crate::components::component::{Component, ComponentKind, ComponentType};

/// A node in the scene tree.
///
/// Built with [`Entity::new`] and the `with_*` builder methods, then handed to
/// [`Scene::spawn`](crate::Scene::spawn), which assigns the id and binds any
/// pending components. Parent/child edges are managed by the scene.
pub struct Entity {
    id: EntityId,
    tag: String,
    /// Inactive entities are skipped by update and draw, and so is everything below them.
    pub active: bool,
    /// Position relative to the parent (or the world, for roots).
    pub pos: Vec2,
    /// Draw order hint. The base traversal does not sort by it.
    pub z_index: i32,
    /// A slot is `None` only while its component's update hook is running.
    components: Vec<Option<Box<dyn Component>>>,
}

impl Entity {
    /// Create an unspawned entity with the given tag at the origin.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: EntityId::UNSPAWNED,
            tag: tag.into(),
            active: true,
            pos: Vec2::ZERO,
            z_index: 0,
            components: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_component(mut self, component: impl Component) -> Self {
        self.add_component(component);
        self
    }

    // -- Accessors --

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    // -- Components --

    /// Attach a component. It is bound right away when the entity is already
    /// spawned, otherwise when it gets spawned.
    pub fn add_component(&mut self, component: impl Component) -> &mut Self {
        let mut boxed: Box<dyn Component> = Box::new(component);
        if self.id.is_spawned() {
            boxed.init(self.id);
        }
        self.components.push(Some(boxed));
        self
    }

    /// First attached component of type `T`.
    pub fn get_component<T: ComponentType>(&self) -> SceneResult<&T> {
        self.attached()
            .filter(|c| c.kind() == T::KIND)
            .find_map(|c| c.as_any().downcast_ref::<T>())
            .ok_or(SceneError::ComponentNotFound { entity: self.id, kind: T::KIND })
    }

    pub fn get_component_mut<T: ComponentType>(&mut self) -> SceneResult<&mut T> {
        let entity = self.id;
        self.components
            .iter_mut()
            .filter_map(|slot| slot.as_deref_mut())
            .filter(|c| c.kind() == T::KIND)
            .find_map(|c| c.as_any_mut().downcast_mut::<T>())
            .ok_or(SceneError::ComponentNotFound { entity, kind: T::KIND })
    }

    pub fn contains_component<T: ComponentType>(&self) -> bool {
        self.get_component::<T>().is_ok()
    }

    /// First attached component reporting `kind`, whatever its concrete type.
    pub fn component_by_kind(&self, kind: ComponentKind) -> SceneResult<&(dyn Component + 'static)> {
        self.attached()
            .find(|c| c.kind() == kind)
            .ok_or(SceneError::ComponentNotFound { entity: self.id, kind })
    }

    pub fn contains_kind(&self, kind: ComponentKind) -> bool {
        self.attached().any(|c| c.kind() == kind)
    }

    /// Attached components in attachment order.
    pub fn components(&self) -> impl Iterator<Item = &(dyn Component + 'static)> {
        self.attached()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Entities cannot be duplicated.
    pub fn try_clone(&self) -> SceneResult<Entity> {
        Err(SceneError::Unsupported("clone"))
    }

    fn attached(&self) -> impl Iterator<Item = &(dyn Component + 'static)> {
        self.components.iter().filter_map(|slot| slot.as_deref())
    }

    // -- Scene internals --

    /// Assign the id and bind every pending component, in attachment order.
    pub(crate) fn bind(&mut self, id: EntityId) {
        debug_assert!(!self.id.is_spawned(), "entity {} spawned twice", self.tag);
        self.id = id;
        for component in self.components.iter_mut().flatten() {
            component.init(id);
        }
    }

    pub(crate) fn component_ref(&self, index: usize) -> Option<&(dyn Component + 'static)> {
        self.components.get(index).and_then(|slot| slot.as_deref())
    }

    pub(crate) fn take_component(&mut self, index: usize) -> Option<Box<dyn Component>> {
        self.components.get_mut(index).and_then(Option::take)
    }

    /// Put a component back into the slot it was taken from. If the slot is
    /// gone, e.g. because the entity was replaced mid-update, the component
    /// is destroyed instead.
    pub(crate) fn restore_component(&mut self, index: usize, mut component: Box<dyn Component>) {
        match self.components.get_mut(index) {
            Some(slot @ None) => *slot = Some(component),
            _ => {
                log::warn!("entity {} lost a {} component", self.id, component.kind());
                component.destroy();
            }
        }
    }

    /// Run every component's destroy hook and drop the components.
    pub(crate) fn destroy_components(&mut self) {
        for mut component in self.components.drain(..).flatten() {
            component.destroy();
        }
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("active", &self.active)
            .field("pos", &self.pos)
            .field("z_index", &self.z_index)
            .field("components", &self.attached().map(|c| c.kind().name()).collect::<Vec<_>>())
            .finish()
    }
}
