use sapling::{ConfigError, DrawList, FixedTimestep, Game, GameConfig, Scene, SceneResult};

/// Generic runner that drives a [`Game`] and its [`Scene`] frame by frame.
///
/// Each frame runs zero or more fixed update steps, then exactly one draw.
/// Updates always precede the draw within a frame.
pub struct GameRunner<G: Game> {
    game: G,
    scene: Scene,
    draw_list: DrawList,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    frame_count: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Result<Self, ConfigError> {
        let config = game.config();
        Self::with_config(game, config)
    }

    /// Build a runner with an explicit config instead of the game's own.
    /// Fails on a config that could never run a step.
    pub fn with_config(game: G, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame);
        let mut scene = Scene::new();
        scene.set_viewport_size(config.viewport_width, config.viewport_height);

        Ok(Self {
            game,
            scene,
            draw_list: DrawList::new(),
            timestep,
            config,
            initialized: false,
            frame_count: 0,
        })
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) -> SceneResult<()> {
        self.game.init(&mut self.scene)?;
        self.initialized = true;
        log::info!(
            "runner initialized: {} entities, viewport {}x{}",
            self.scene.len(),
            self.config.viewport_width,
            self.config.viewport_height
        );
        Ok(())
    }

    /// Run one frame. Returns how many fixed update steps ran.
    pub fn tick(&mut self, dt: f32) -> SceneResult<u32> {
        if !self.initialized {
            return Ok(0);
        }

        let steps = self.timestep.accumulate(dt);
        let step_dt = self.timestep.dt();
        for _ in 0..steps {
            self.game.update(&mut self.scene, step_dt)?;
            self.scene.update_pass(step_dt)?;
        }

        self.draw_list.clear();
        self.scene.draw_pass(&mut self.draw_list)?;
        self.game.render(&self.scene, &mut self.draw_list);

        self.frame_count += 1;
        Ok(steps)
    }

    /// Display surface changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.scene.set_viewport_size(width, height);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Output of the most recent draw.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Draw output as raw bytes for a renderer upload.
    pub fn instance_bytes(&self) -> &[u8] {
        self.draw_list.as_bytes()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
