//! # Headless World Builder
//!
//! Builds a fixed-size world without a window: generates and meshes every chunk, then
//! logs how long it took and how much geometry came out.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [world.json]
//! ```
//!
//! Without a configuration file a 4×4 chunk world with default settings is built.

use log::{error, info, warn};
use std::time::Duration;
use web_time::Instant;

use voxel_engine_core::{init_logging, EngineState, WorldConfig};

const BUILD_TIMEOUT: Duration = Duration::from_secs(300);

fn load_config() -> Option<WorldConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Some(WorldConfig {
            size: Some(4),
            ..WorldConfig::default()
        });
    };

    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(err) => {
            error!("Can't read {}: {}", path, err);
            return None;
        }
    };
    match WorldConfig::from_json_str(&json) {
        Ok(config) if config.size.is_some() => Some(config),
        Ok(_) => {
            error!("{} has no world size; a headless build needs a fixed world", path);
            None
        }
        Err(err) => {
            error!("{}: {}", path, err);
            None
        }
    }
}

fn main() {
    init_logging();

    let Some(config) = load_config() else {
        std::process::exit(1);
    };
    let mut engine = EngineState::new(config);

    let start = Instant::now();
    let mut ticks = 0u64;
    loop {
        engine.tick();
        ticks += 1;
        if engine.pending_chunks() == 0 && engine.scheduler().in_flight() == 0 {
            break;
        }
        if start.elapsed() > BUILD_TIMEOUT {
            warn!("Gave up with {} chunks pending", engine.pending_chunks());
            break;
        }
        std::thread::sleep(Duration::from_millis(1));
    }

    let (faces, vertices) = engine
        .world()
        .chunks()
        .map(|(_, chunk)| {
            let chunk = chunk.get();
            (chunk.mesh.face_count(), chunk.mesh.vertices.len())
        })
        .fold((0, 0), |(faces, vertices), (f, v)| (faces + f, vertices + v));

    info!(
        "Built {} chunks in {:?} over {} ticks: {} faces, {} vertices",
        engine.world().chunk_count(),
        start.elapsed(),
        ticks,
        faces,
        vertices
    );
}
