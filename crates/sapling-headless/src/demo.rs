// demo.rs
//
// Small scene used by the `sapling-demo` binary: a ship circling the origin
// with a pilot the camera follows, plus a beacon that burns out.

use glam::Vec2;
use sapling::{
    CameraFollow, Component, ComponentKind, ComponentType, Entity, Game, GameConfig, Scene,
    SceneResult, SurfaceComponent, UpdateContext, CAMERA_TAG,
};

/// Moves its owner around a circle centered on the owner's parent origin.
#[derive(Debug, Clone)]
pub struct Orbit {
    pub radius: f32,
    /// Radians per second.
    pub speed: f32,
    angle: f32,
}

impl Orbit {
    pub fn new(radius: f32, speed: f32) -> Self {
        Self { radius, speed, angle: 0.0 }
    }
}

impl ComponentType for Orbit {
    const KIND: ComponentKind = ComponentKind::new("orbit");
}

impl Component for Orbit {
    fn kind(&self) -> ComponentKind {
        Self::KIND
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> SceneResult<()> {
        self.angle = (self.angle + self.speed * ctx.dt) % std::f32::consts::TAU;
        let radius = self.radius;
        let angle = self.angle;
        ctx.owner_mut()?.pos = Vec2::from_angle(angle) * radius;
        Ok(())
    }
}

/// Destroys its owner, and with it the owner's subtree, after a fixed time.
#[derive(Debug, Clone)]
pub struct Lifetime {
    pub remaining: f32,
}

impl ComponentType for Lifetime {
    const KIND: ComponentKind = ComponentKind::new("lifetime");
}

impl Component for Lifetime {
    fn kind(&self) -> ComponentKind {
        Self::KIND
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> SceneResult<()> {
        self.remaining -= ctx.dt;
        if self.remaining <= 0.0 {
            log::info!("{} burned out", ctx.owner()?.tag());
            ctx.destroy_owner()?;
        }
        Ok(())
    }
}

pub struct DemoGame {
    config: GameConfig,
    /// Beacon lifetime in seconds.
    pub beacon_lifetime: f32,
}

impl DemoGame {
    pub fn new(config: GameConfig) -> Self {
        Self { config, beacon_lifetime: 2.0 }
    }
}

impl Default for DemoGame {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game for DemoGame {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, scene: &mut Scene) -> SceneResult<()> {
        scene.spawn(Entity::new(CAMERA_TAG))?;

        let ship = scene.spawn(
            Entity::new("ship")
                .with_z_index(1)
                .with_component(Orbit::new(200.0, 1.0))
                .with_component(SurfaceComponent::new(Vec2::new(48.0, 24.0))),
        )?;
        let pilot = scene.spawn(
            Entity::new("pilot")
                .with_pos(Vec2::new(0.0, -8.0))
                .with_z_index(2)
                .with_component(CameraFollow::with_smoothing(0.2))
                .with_component(SurfaceComponent::new(Vec2::splat(8.0))),
        )?;
        scene.add_child(ship, pilot)?;

        let beacon = scene.spawn(
            Entity::new("beacon")
                .with_pos(Vec2::new(-150.0, 100.0))
                .with_component(Lifetime { remaining: self.beacon_lifetime })
                .with_component(SurfaceComponent::new(Vec2::splat(16.0))),
        )?;
        let spark = scene.spawn(
            Entity::new("spark")
                .with_component(Orbit::new(20.0, 6.0))
                .with_component(SurfaceComponent::new(Vec2::splat(4.0))),
        )?;
        scene.add_child(beacon, spark)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::GameRunner;

    #[test]
    fn orbit_keeps_radius() {
        let mut scene = Scene::new();
        let id = scene.spawn(Entity::new("moon").with_component(Orbit::new(50.0, 2.0))).unwrap();

        for _ in 0..30 {
            scene.update_pass(1.0 / 60.0).unwrap();
        }

        let pos = scene.get(id).unwrap().pos;
        assert!((pos.length() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn beacon_takes_its_spark_with_it() {
        let mut game = DemoGame::default();
        game.beacon_lifetime = 0.2;
        let mut runner = GameRunner::new(game).unwrap();
        runner.init().unwrap();
        assert_eq!(runner.scene().len(), 5);

        runner.tick(0.1).unwrap();
        assert!(runner.scene().contains_tag("spark"));

        runner.tick(0.15).unwrap();
        assert!(!runner.scene().contains_tag("beacon"));
        assert!(!runner.scene().contains_tag("spark"));
        assert_eq!(runner.scene().len(), 3);
    }

    #[test]
    fn camera_tracks_the_pilot() {
        let mut runner = GameRunner::new(DemoGame::default()).unwrap();
        runner.init().unwrap();

        for _ in 0..120 {
            runner.tick(1.0 / 60.0).unwrap();
        }

        let scene = runner.scene();
        let pilot = scene.id_by_tag("pilot").unwrap();
        let camera = scene.get_by_tag(CAMERA_TAG).unwrap().pos;
        let target = scene.absolute_coords(pilot).unwrap();
        // Smoothed, so close but not exact
        assert!(camera.distance(target) < 20.0, "camera {camera} target {target}");
    }
}
