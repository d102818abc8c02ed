use std::any::Any;
use std::fmt;

use glam::Vec2;

use crate::api::error::SceneResult;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::renderer::draw_list::DrawList;

/// Stable capability identifier reported by a component.
///
/// Several concrete types may report the same kind, e.g. two shape
/// implementations both answering `"shape"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentKind(&'static str);

impl ComponentKind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Upcast helper so boxed components can be downcast to their concrete type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A unit of behavior attached to exactly one entity.
///
/// All hooks default to no-ops, so concrete components override only what
/// they need. The owning entity calls `init` once when the component becomes
/// attached to a spawned entity, and `destroy` once when the entity is
/// destroyed.
pub trait Component: AsAny + 'static {
    /// Capability identifier used by kind-based lookup.
    fn kind(&self) -> ComponentKind;

    /// Bind to the owning entity.
    fn init(&mut self, _owner: EntityId) {}

    /// Advance per-frame logic.
    ///
    /// Destroying entities from here is allowed: the scene defers the
    /// request until the running pass has finished.
    fn update(&mut self, _ctx: &mut UpdateContext<'_>) -> SceneResult<()> {
        Ok(())
    }

    /// Emit this component's visual contribution. The scene is borrowed
    /// immutably, so topology cannot change while drawing.
    fn draw(&self, _ctx: &mut DrawContext<'_>) -> SceneResult<()> {
        Ok(())
    }

    /// Release resources. Called once, when the owner is destroyed.
    fn destroy(&mut self) {}
}

/// Typed access to a component through its capability identifier.
pub trait ComponentType: Component + Sized {
    const KIND: ComponentKind;
}

/// Mutable access to the scene handed to [`Component::update`].
pub struct UpdateContext<'a> {
    pub scene: &'a mut Scene,
    /// The entity whose component is running.
    pub owner: EntityId,
    /// Fixed timestep in seconds.
    pub dt: f32,
}

impl UpdateContext<'_> {
    pub fn owner(&self) -> SceneResult<&Entity> {
        self.scene.get(self.owner)
    }

    pub fn owner_mut(&mut self) -> SceneResult<&mut Entity> {
        self.scene.get_mut(self.owner)
    }

    pub fn absolute_coords(&self) -> SceneResult<Vec2> {
        self.scene.absolute_coords(self.owner)
    }

    /// Request destruction of the owner once the current pass ends.
    pub fn destroy_owner(&mut self) -> SceneResult<()> {
        self.scene.destroy(self.owner)
    }
}

/// Read-only access to the scene handed to [`Component::draw`].
pub struct DrawContext<'a> {
    pub scene: &'a Scene,
    pub owner: EntityId,
    pub draw_list: &'a mut DrawList,
}

impl DrawContext<'_> {
    pub fn owner(&self) -> SceneResult<&Entity> {
        self.scene.get(self.owner)
    }

    /// Owner position in viewport space, centered on the camera.
    pub fn relative_coords(&self) -> SceneResult<Vec2> {
        self.scene.relative_coords(self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    impl Component for Marker {
        fn kind(&self) -> ComponentKind {
            ComponentKind::new("marker")
        }
    }

    #[test]
    fn kind_compares_by_name() {
        assert_eq!(ComponentKind::new("shape"), ComponentKind::new("shape"));
        assert_ne!(ComponentKind::new("shape"), ComponentKind::new("label"));
        assert_eq!(ComponentKind::new("shape").name(), "shape");
    }

    #[test]
    fn boxed_component_downcasts_to_concrete_type() {
        let boxed: Box<dyn Component> = Box::new(Marker);
        let component: &dyn Component = &*boxed;
        assert!(component.as_any().downcast_ref::<Marker>().is_some());
    }

    #[test]
    fn default_hooks_are_no_ops() {
        let mut scene = Scene::new();
        let owner = scene.spawn(Entity::new("owner")).unwrap();
        let mut marker = Marker;
        marker.init(owner);

        let mut ctx = UpdateContext { scene: &mut scene, owner, dt: 1.0 / 60.0 };
        assert!(marker.update(&mut ctx).is_ok());

        let mut list = DrawList::new();
        let mut ctx = DrawContext { scene: &scene, owner, draw_list: &mut list };
        assert!(marker.draw(&mut ctx).is_ok());
        assert!(list.is_empty());

        marker.destroy();
    }
}
