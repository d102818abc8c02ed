//! Headless demo: runs the demo scene for a fixed number of frames and logs
//! what the draw pass produced.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p sapling-headless -- --frames 120
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sapling::GameConfig;
use sapling_headless::{DemoGame, GameRunner};

/// Sapling headless scene runner
#[derive(Parser)]
#[command(version, about = "Runs the sapling demo scene without a window.")]
struct Cli {
    /// Number of frames to run.
    #[arg(long, default_value_t = 180)]
    frames: u32,

    /// Frame time in seconds fed to each tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// JSON config file (fixed_dt, viewport_width, viewport_height, max_steps_per_frame).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let mut runner = match GameRunner::new(DemoGame::new(config)) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("bad config: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = runner.init() {
        log::error!("init failed: {e}");
        return ExitCode::FAILURE;
    }

    for _ in 0..cli.frames {
        match runner.tick(cli.dt) {
            Ok(steps) => log::info!(
                "frame {}: {} steps, {} entities, {} quads ({} bytes)",
                runner.frame_count(),
                steps,
                runner.scene().len(),
                runner.draw_list().len(),
                runner.instance_bytes().len()
            ),
            Err(e) => {
                log::error!("frame {} failed: {e}", runner.frame_count() + 1);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
