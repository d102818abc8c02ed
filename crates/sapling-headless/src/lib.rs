pub mod demo;
pub mod runner;

pub use demo::DemoGame;
pub use runner::GameRunner;
