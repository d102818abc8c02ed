// core/frame.rs
//
// Per-frame traversal: entity-level hooks plus the scene-wide update and draw
// passes. Updates may mutate the scene; destruction requested while a pass is
// running is queued and applied when the outermost pass ends.

use crate::api::error::SceneResult;
use crate::api::types::EntityId;
use crate::components::component::{DrawContext, UpdateContext};
use crate::core::scene::Scene;
use crate::renderer::draw_list::DrawList;

impl Scene {
    /// Run `update` on each of the entity's components, in attachment order.
    /// No-op when the entity itself is inactive; children are not visited.
    pub fn update_entity(&mut self, id: EntityId, dt: f32) -> SceneResult<()> {
        if !self.get(id)?.active {
            return Ok(());
        }
        self.traverse(|scene| scene.update_components(id, dt))
    }

    /// Run `draw` on each of the entity's components, in attachment order.
    /// No-op when the entity itself is inactive; children are not visited.
    pub fn draw_entity(&self, id: EntityId, draw_list: &mut DrawList) -> SceneResult<()> {
        let entity = self.get(id)?;
        if !entity.active {
            return Ok(());
        }
        for index in 0..entity.component_count() {
            if let Some(component) = entity.component_ref(index) {
                let mut ctx = DrawContext { scene: self, owner: id, draw_list: &mut *draw_list };
                component.draw(&mut ctx)?;
            }
        }
        Ok(())
    }

    /// Update every live entity that is active in hierarchy, in spawn order.
    ///
    /// Entities spawned during the pass are first visited next frame; entities
    /// destroyed during the pass are removed when it ends.
    pub fn update_pass(&mut self, dt: f32) -> SceneResult<()> {
        let snapshot = self.ids().to_vec();
        log::trace!("update pass over {} entities", snapshot.len());
        self.traverse(|scene| {
            for id in snapshot {
                if scene.is_active_in_hierarchy(id) {
                    scene.update_components(id, dt)?;
                }
            }
            Ok(())
        })
    }

    /// Draw every live entity that is active in hierarchy, in spawn order.
    pub fn draw_pass(&self, draw_list: &mut DrawList) -> SceneResult<()> {
        log::trace!("draw pass over {} entities", self.len());
        for &id in self.ids() {
            if self.is_active_in_hierarchy(id) {
                self.draw_entity(id, draw_list)?;
            }
        }
        Ok(())
    }

    /// Whether an update pass is running.
    pub fn is_traversing(&self) -> bool {
        self.traversal_depth > 0
    }

    fn traverse(&mut self, pass: impl FnOnce(&mut Scene) -> SceneResult<()>) -> SceneResult<()> {
        self.traversal_depth += 1;
        let result = pass(self);
        self.traversal_depth -= 1;

        if let Err(err) = &result {
            log::warn!("update pass aborted: {}", err);
        }
        if self.traversal_depth == 0 {
            self.flush_pending();
        }
        result
    }

    fn update_components(&mut self, id: EntityId, dt: f32) -> SceneResult<()> {
        let mut index = 0;
        // Components attached during the loop are picked up in the same pass.
        while let Some(count) = self.get(id).ok().map(|e| e.component_count()) {
            if index >= count {
                break;
            }
            let Some(mut component) = self.get_mut(id)?.take_component(index) else {
                index += 1;
                continue;
            };

            let result = component.update(&mut UpdateContext { scene: &mut *self, owner: id, dt });

            match self.get_mut(id) {
                Ok(entity) => entity.restore_component(index, component),
                Err(_) => component.destroy(),
            }
            result?;
            index += 1;
        }
        Ok(())
    }
}
