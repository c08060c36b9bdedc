#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Engine Core
//!
//! The simulation core of a chunked voxel world: seeded procedural terrain, face-culled
//! chunk meshes, a bounded pool of generation and meshing workers, and ray picking for
//! block edits.
//!
//! Windowing, input polling and GPU work belong to the application shell. The core
//! reaches them only through narrow traits (`Renderer`, `Input`, `TileAtlas`).
//!
//! ## Key Modules
//!
//! * `config` - World configuration, loadable from JSON
//! * `core` - Core utilities and data structures used throughout the engine
//! * `engine_state` - The main engine components including meshing, voxels, and task management
//!
//! ## Usage
//!
//! ```rust
//! use voxel_engine_core::{config::WorldConfig, engine_state::EngineState};
//!
//! voxel_engine_core::init_logging();
//! let mut engine = EngineState::new(WorldConfig::default());
//! engine.request_area(cgmath::Point3::new(0.0, 80.0, 0.0), 2);
//!
//! // once per frame
//! engine.tick();
//! ```

pub mod config;
pub mod core;
pub mod engine_state;

pub use config::{ConfigError, WorldConfig};
pub use engine_state::EngineState;

/// Installs the `env_logger` backend writing to stdout, filtered by `RUST_LOG`.
///
/// Calling it more than once is harmless; only the first call installs a logger.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    let installed = log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok();

    if installed {
        log::info!("Logger initialized");
    }
}
