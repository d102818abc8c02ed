pub mod api;
pub mod core;
pub mod components;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::error::{ConfigError, SceneError, SceneResult};
pub use api::game::{Game, GameConfig};
pub use api::types::{EntityId, CAMERA_TAG};
pub use components::component::{
    Component, ComponentKind, ComponentType, DrawContext, UpdateContext,
};
pub use components::entity::Entity;
pub use components::follow::CameraFollow;
pub use components::surface::SurfaceComponent;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::draw_list::{DrawInstance, DrawList};
pub use renderer::viewport::Viewport;
