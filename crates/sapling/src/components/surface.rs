use glam::Vec2;

use crate::api::error::SceneResult;
use crate::api::types::EntityId;
use crate::components::component::{Component, ComponentKind, ComponentType, DrawContext};
use crate::renderer::draw_list::DrawInstance;

/// Axis-aligned quad centered on its owner.
///
/// Draws at the owner's relative coordinates, so the owner appears where the
/// camera sees it. Quads entirely outside the viewport are culled.
#[derive(Debug, Clone)]
pub struct SurfaceComponent {
    /// Width and height in pixels.
    pub size: Vec2,
    owner: Option<EntityId>,
}

impl SurfaceComponent {
    pub fn new(size: Vec2) -> Self {
        Self { size, owner: None }
    }

    /// Entity this surface was bound to, once spawned.
    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }
}

impl Default for SurfaceComponent {
    fn default() -> Self {
        Self::new(Vec2::splat(32.0))
    }
}

impl ComponentType for SurfaceComponent {
    const KIND: ComponentKind = ComponentKind::new("surface");
}

impl Component for SurfaceComponent {
    fn kind(&self) -> ComponentKind {
        Self::KIND
    }

    fn init(&mut self, owner: EntityId) {
        debug_assert!(self.owner.is_none(), "surface initialized twice");
        self.owner = Some(owner);
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> SceneResult<()> {
        let top_left = ctx.relative_coords()? - self.size / 2.0;
        if !ctx.scene.viewport().is_rect_visible(top_left, self.size) {
            return Ok(());
        }

        let z_index = ctx.owner()?.z_index;
        ctx.draw_list
            .push(DrawInstance::new(ctx.owner, top_left, self.size, z_index));
        Ok(())
    }
}
