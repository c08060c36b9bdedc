//! # World Configuration
//!
//! Everything the core needs to know up front: the world seed, an optional fixed
//! extent, draw distance, terrain constants, worker pool dimensions and the tile
//! atlas metadata. Every field has a default, so an empty JSON object is a valid
//! configuration.
//!
//! ```
//! use voxel_engine_core::config::WorldConfig;
//!
//! let config = WorldConfig::from_json_str(r#"{ "seed": 7, "size": 2 }"#).unwrap();
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.scheduler.capacity(), 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::engine_state::{
    rendering::tile_atlas::GridTileAtlas, scheduler::SchedulerConfig,
    voxels::terrain::TerrainSettings,
};

/// Errors produced while loading a [`WorldConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input is not valid JSON or does not match the schema
    #[error("Failed to parse world configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is out of range
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Settings of one world instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed every noise generator is derived from
    pub seed: u32,
    /// When set, the `size × size` chunks from the origin are registered at start-up
    pub size: Option<u32>,
    /// Chunks farther than this many chunk widths from the camera are not drawn
    pub draw_distance: u32,
    /// Terrain shape constants
    pub terrain: TerrainSettings,
    /// Worker pool dimensions
    pub scheduler: SchedulerConfig,
    /// Tile atlas metadata
    pub atlas: GridTileAtlas,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 1337,
            size: None,
            draw_distance: 6,
            terrain: TerrainSettings::default(),
            scheduler: SchedulerConfig::default(),
            atlas: GridTileAtlas::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the values serde cannot rule out on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if self.scheduler.worker_threads == 0 {
            return invalid("scheduler.worker_threads", "at least one worker is required");
        }
        if self.scheduler.tasks_per_worker == 0 {
            return invalid("scheduler.tasks_per_worker", "must be at least 1");
        }
        if self.atlas.tile_size == 0 {
            return invalid("atlas.tile_size", "must be non-zero");
        }
        if self.atlas.map_size == 0 || self.atlas.map_size % self.atlas.tile_size != 0 {
            return invalid("atlas.map_size", "must be a non-zero multiple of atlas.tile_size");
        }
        if !(self.terrain.noise_scale.is_finite() && self.terrain.noise_scale > 0.0) {
            return invalid("terrain.noise_scale", "must be a positive number");
        }
        if !self.terrain.amplitude.is_finite() {
            return invalid("terrain.amplitude", "must be finite");
        }
        if self.size == Some(0) {
            return invalid("size", "a fixed world needs at least one chunk");
        }
        Ok(())
    }
}
