use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::api::error::{SceneError, SceneResult};
use crate::api::types::{EntityId, CAMERA_TAG};
use crate::components::entity::Entity;
use crate::renderer::viewport::Viewport;

/// Registry-owned record of an entity's tag and tree edges.
///
/// Kept apart from [`Entity`] so that handing out `&mut Entity` can never
/// desync the tag index or the tree.
#[derive(Debug)]
struct Node {
    tag: String,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

/// Registry and arena for a tree of tagged entities.
///
/// Holds every live entity by handle, the tag index, and the live sequence in
/// spawn order. Each scene is independent; nothing here is process-global.
/// Parent links are plain handles, children are owned: destroying an entity
/// destroys its subtree.
pub struct Scene {
    entities: HashMap<EntityId, Entity>,
    nodes: HashMap<EntityId, Node>,
    /// Live entities in spawn order.
    order: Vec<EntityId>,
    tags: HashMap<String, EntityId>,
    next_id: u32,
    viewport: Viewport,
    /// Nesting depth of running update passes; destruction is deferred while > 0.
    pub(crate) traversal_depth: u32,
    pub(crate) pending_destroy: Vec<EntityId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: HashMap::with_capacity(capacity),
            nodes: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            tags: HashMap::with_capacity(capacity),
            next_id: 1,
            viewport: Viewport::default(),
            traversal_depth: 0,
            pending_destroy: Vec::new(),
        }
    }

    // -- Registry --

    /// Register an entity. Fails without touching the registry when the tag
    /// is already taken.
    pub fn spawn(&mut self, mut entity: Entity) -> SceneResult<EntityId> {
        if self.tags.contains_key(entity.tag()) {
            return Err(SceneError::DuplicateTag(entity.tag().to_owned()));
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.bind(id);

        log::debug!("spawn {} '{}'", id, entity.tag());
        let tag = entity.tag().to_owned();
        self.tags.insert(tag.clone(), id);
        self.nodes.insert(id, Node { tag, parent: None, children: Vec::new() });
        self.order.push(id);
        self.entities.insert(id, entity);
        Ok(id)
    }

    pub fn get(&self, id: EntityId) -> SceneResult<&Entity> {
        self.entities.get(&id).ok_or(SceneError::EntityNotFound(id))
    }

    /// Mutable access to an entity's position, flags and components.
    ///
    /// The tag and tree edges live in the registry, so even replacing the
    /// whole entity leaves lookup and destruction consistent.
    pub fn get_mut(&mut self, id: EntityId) -> SceneResult<&mut Entity> {
        self.entities.get_mut(&id).ok_or(SceneError::EntityNotFound(id))
    }

    pub fn id_by_tag(&self, tag: &str) -> SceneResult<EntityId> {
        self.tags
            .get(tag)
            .copied()
            .ok_or_else(|| SceneError::TagNotFound(tag.to_owned()))
    }

    pub fn get_by_tag(&self, tag: &str) -> SceneResult<&Entity> {
        let id = self.id_by_tag(tag)?;
        self.get(id)
    }

    pub fn get_by_tag_mut(&mut self, tag: &str) -> SceneResult<&mut Entity> {
        let id = self.id_by_tag(tag)?;
        self.get_mut(id)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Tag the entity was registered under.
    pub fn tag(&self, id: EntityId) -> SceneResult<&str> {
        Ok(&self.node(id)?.tag)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Live entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Live handles in spawn order.
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entities cannot be duplicated.
    pub fn clone_entity(&self, id: EntityId) -> SceneResult<EntityId> {
        self.get(id)?.try_clone().map(|_| id)
    }

    fn node(&self, id: EntityId) -> SceneResult<&Node> {
        self.nodes.get(&id).ok_or(SceneError::EntityNotFound(id))
    }

    fn node_mut(&mut self, id: EntityId) -> SceneResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(SceneError::EntityNotFound(id))
    }

    // -- Tree --

    pub fn parent(&self, id: EntityId) -> SceneResult<Option<EntityId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children in link order.
    pub fn children(&self, id: EntityId) -> SceneResult<&[EntityId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn is_root(&self, id: EntityId) -> SceneResult<bool> {
        Ok(self.parent(id)?.is_none())
    }

    /// Link `child` under `parent`, appending it to the parent's child list.
    ///
    /// The child must be a root; move it with [`Scene::detach`] first. The
    /// camera stays a root: relative coordinates read its local position.
    pub fn add_child(&mut self, parent: EntityId, child: EntityId) -> SceneResult<()> {
        self.node(parent)?;
        let node = self.node(child)?;
        if let Some(current) = node.parent {
            return Err(SceneError::AlreadyParented { child, parent: current });
        }
        if node.tag == CAMERA_TAG {
            return Err(SceneError::Unsupported("parenting the camera"));
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(SceneError::CyclicParent { parent, child });
        }

        log::debug!("parent {} -> {}", child, parent);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Unlink `child` from its parent, making it a root.
    pub fn detach(&mut self, child: EntityId) -> SceneResult<()> {
        let Some(parent) = self.node_mut(child)?.parent.take() else { return Ok(()) };
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|&c| c != child);
        }
        Ok(())
    }

    /// The entity itself followed by each ancestor up to the root.
    pub fn ancestors(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::successors(
            self.nodes.contains_key(&id).then_some(id),
            move |current| self.nodes.get(current).and_then(|n| n.parent),
        )
    }

    pub fn set_active(&mut self, id: EntityId, active: bool) -> SceneResult<()> {
        self.get_mut(id)?.set_active(active);
        Ok(())
    }

    /// True when the entity and every ancestor are active.
    pub fn is_active_in_hierarchy(&self, id: EntityId) -> bool {
        self.is_alive(id)
            && self
                .ancestors(id)
                .all(|a| self.entities.get(&a).is_some_and(|e| e.active))
    }

    // -- Coordinates --

    /// Local position summed along the ancestor chain.
    pub fn absolute_coords(&self, id: EntityId) -> SceneResult<Vec2> {
        self.get(id)?;
        Ok(self
            .ancestors(id)
            .filter_map(|a| self.entities.get(&a))
            .map(|e| e.pos)
            .sum())
    }

    /// Absolute coordinates re-expressed around the camera, with the camera
    /// mapped to the viewport center.
    pub fn relative_coords(&self, id: EntityId) -> SceneResult<Vec2> {
        let absolute = self.absolute_coords(id)?;
        let camera = self.get_by_tag(CAMERA_TAG)?;
        Ok(absolute - camera.pos + self.viewport.center_offset())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Size of the display surface in pixels, used by [`Scene::relative_coords`].
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }

    // -- Destruction --

    /// Destroy an entity and its whole subtree.
    ///
    /// While an update pass is running the request is queued and applied when
    /// the outermost pass ends.
    pub fn destroy(&mut self, id: EntityId) -> SceneResult<()> {
        self.get(id)?;
        if self.traversal_depth > 0 {
            if !self.pending_destroy.contains(&id) {
                log::trace!("defer destroy {}", id);
                self.pending_destroy.push(id);
            }
            return Ok(());
        }

        self.destroy_now(vec![id]);
        Ok(())
    }

    /// Destroy every live entity.
    pub fn clear(&mut self) {
        let roots: Vec<EntityId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.nodes.get(id).is_some_and(|n| n.parent.is_none()))
            .collect();
        if self.traversal_depth > 0 {
            for root in roots {
                if !self.pending_destroy.contains(&root) {
                    self.pending_destroy.push(root);
                }
            }
            return;
        }
        self.destroy_subtrees(roots);
    }

    /// Unlink each entity from its parent, then tear down the subtrees.
    fn destroy_now(&mut self, ids: Vec<EntityId>) {
        for &id in &ids {
            let parent = self.nodes.get_mut(&id).and_then(|n| n.parent.take());
            if let Some(node) = parent.and_then(|p| self.nodes.get_mut(&p)) {
                node.children.retain(|&c| c != id);
            }
        }
        self.destroy_subtrees(ids);
    }

    /// Depth-first teardown: each entity is unregistered and its components
    /// destroyed before its children, siblings in link order.
    fn destroy_subtrees(&mut self, roots: Vec<EntityId>) {
        let mut stack: Vec<EntityId> = roots.into_iter().rev().collect();
        let mut removed = HashSet::new();

        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.remove(&id) else { continue };
            self.tags.remove(&node.tag);
            removed.insert(id);

            if let Some(mut entity) = self.entities.remove(&id) {
                log::debug!("destroy {} '{}'", id, node.tag);
                entity.destroy_components();
            }
            stack.extend(node.children.into_iter().rev());
        }

        if !removed.is_empty() {
            self.order.retain(|live| !removed.contains(live));
        }
    }

    /// Apply destruction requests queued during a pass.
    pub(crate) fn flush_pending(&mut self) {
        debug_assert_eq!(self.traversal_depth, 0);
        let pending: Vec<EntityId> = std::mem::take(&mut self.pending_destroy)
            .into_iter()
            .filter(|id| self.is_alive(*id))
            .collect();
        if !pending.is_empty() {
            self.destroy_now(pending);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
