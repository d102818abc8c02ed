use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::error::{ConfigError, SceneResult};
use crate::core::scene::Scene;
use crate::renderer::draw_list::DrawList;

/// Configuration for the runtime, provided by the game or loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt: f32,
    /// Display surface width in pixels (default: 800).
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    /// Display surface height in pixels (default: 600).
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    /// Maximum fixed steps run per frame (default: 10).
    #[serde(default = "default_max_steps")]
    pub max_steps_per_frame: u32,
}

fn default_fixed_dt() -> f32 {
    1.0 / 60.0
}

fn default_viewport_width() -> u32 {
    800
}

fn default_viewport_height() -> u32 {
    600
}

fn default_max_steps() -> u32 {
    10
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: default_fixed_dt(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            max_steps_per_frame: default_max_steps(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from a JSON string. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::Invalid("max_steps_per_frame must be at least 1".into()));
        }
        Ok(())
    }
}

/// The contract every game fulfills. The runner owns the [`Scene`] and calls
/// these hooks around its own update and draw passes.
pub trait Game {
    /// Return runtime configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Spawn the initial entities. A camera entity is expected for anything
    /// that draws.
    fn init(&mut self, scene: &mut Scene) -> SceneResult<()>;

    /// Game-level logic, run once per fixed step before the scene update pass.
    fn update(&mut self, _scene: &mut Scene, _dt: f32) -> SceneResult<()> {
        Ok(())
    }

    /// Optional read-only pass after the scene draw pass.
    fn render(&self, _scene: &Scene, _draw_list: &mut DrawList) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();
        assert_eq!(config.fixed_dt, 1.0 / 60.0);
        assert_eq!((config.viewport_width, config.viewport_height), (800, 600));
        assert_eq!(config.max_steps_per_frame, 10);
    }

    #[test]
    fn parse_partial_config() {
        let json = r#"{ "viewport_width": 1280, "viewport_height": 720 }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!((config.viewport_width, config.viewport_height), (1280, 720));
        assert_eq!(config.fixed_dt, 1.0 / 60.0);
        assert_eq!(config.max_steps_per_frame, 10);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ \"fixed_dt\": ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let err = GameConfig::from_json(r#"{ "viewport_width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        let err = GameConfig::from_json(r#"{ "fixed_dt": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
