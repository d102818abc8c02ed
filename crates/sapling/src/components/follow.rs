use crate::api::error::SceneResult;
use crate::api::types::CAMERA_TAG;
use crate::components::component::{Component, ComponentKind, ComponentType, UpdateContext};

/// Moves the camera entity onto its owner every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraFollow {
    /// 0.0 snaps to the owner each step. Values toward 1.0 lag behind:
    /// the fraction of the gap left after one 60 Hz step.
    pub smoothing: f32,
}

impl CameraFollow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(smoothing: f32) -> Self {
        Self { smoothing: smoothing.clamp(0.0, 1.0) }
    }
}

impl ComponentType for CameraFollow {
    const KIND: ComponentKind = ComponentKind::new("camera_follow");
}

impl Component for CameraFollow {
    fn kind(&self) -> ComponentKind {
        Self::KIND
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> SceneResult<()> {
        let target = ctx.absolute_coords()?;
        let dt = ctx.dt;
        let camera = ctx.scene.get_by_tag_mut(CAMERA_TAG)?;

        if self.smoothing <= 0.0 {
            camera.pos = target;
        } else {
            // Frame-rate independent exponential approach
            let t = 1.0 - self.smoothing.powf(dt * 60.0);
            camera.pos = camera.pos.lerp(target, t);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::api::error::SceneError;
    use crate::components::entity::Entity;
    use crate::core::scene::Scene;

    #[test]
    fn snaps_camera_to_owner_absolute_coords() {
        let mut scene = Scene::new();
        let camera = scene.spawn(Entity::new(CAMERA_TAG)).unwrap();
        let ship = scene.spawn(Entity::new("ship").with_pos(Vec2::new(100.0, 0.0))).unwrap();
        let pilot = scene
            .spawn(
                Entity::new("pilot")
                    .with_pos(Vec2::new(0.0, 50.0))
                    .with_component(CameraFollow::new()),
            )
            .unwrap();
        scene.add_child(ship, pilot).unwrap();

        scene.update_pass(1.0 / 60.0).unwrap();

        assert_eq!(scene.get(camera).unwrap().pos, Vec2::new(100.0, 50.0));
        // The followed entity sits at the viewport center
        assert_eq!(scene.relative_coords(pilot).unwrap(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn smoothing_closes_part_of_the_gap() {
        let mut scene = Scene::new();
        let camera = scene.spawn(Entity::new(CAMERA_TAG)).unwrap();
        scene
            .spawn(
                Entity::new("player")
                    .with_pos(Vec2::new(100.0, 0.0))
                    .with_component(CameraFollow::with_smoothing(0.5)),
            )
            .unwrap();

        scene.update_pass(1.0 / 60.0).unwrap();
        let x = scene.get(camera).unwrap().pos.x;
        assert!((x - 50.0).abs() < 1e-3, "camera at {x}");

        scene.update_pass(1.0 / 60.0).unwrap();
        let x = scene.get(camera).unwrap().pos.x;
        assert!((x - 75.0).abs() < 1e-3, "camera at {x}");
    }

    #[test]
    fn smoothing_is_clamped() {
        assert_eq!(CameraFollow::with_smoothing(2.0).smoothing, 1.0);
        assert_eq!(CameraFollow::with_smoothing(-1.0).smoothing, 0.0);
    }

    #[test]
    fn missing_camera_is_reported() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new("player").with_component(CameraFollow::new())).unwrap();

        let err = scene.update_pass(1.0 / 60.0).unwrap_err();
        assert_eq!(err, SceneError::TagNotFound(CAMERA_TAG.to_owned()));
    }
}
