//! # Engine State Module
//!
//! The core engine module that manages the state and functionality of the voxel engine.
//!
//! ## Key Components
//!
//! * `EngineState` - The simulation context the application shell drives
//! * `input` - Read-only input seam and block-edit actions
//! * `noise` - Seeded gradient noise and its octave/warped compositions
//! * `rendering` - Mesh building and the renderer seam
//! * `scheduler` - Dispatches generation and meshing onto the worker pool
//! * `task_management` - Manages worker threads and task results
//! * `voxels` - Blocks, chunks, terrain synthesis, the world and ray picking
//!
//! ## Architecture
//!
//! There are no globals. The shell owns one `EngineState` and calls, once per frame:
//!
//! 1. `request_area()` around the viewer, so the world grows where it is looked at
//! 2. `tick()`, which applies finished work and dispatches new work
//! 3. `handle_pointer()` with the frame's input and the view ray
//! 4. `render()` with its graphics backend
//!
//! None of these block on a worker; everything that is not ready yet is simply
//! retried on the next frame.

use cgmath::{Point2, Point3, Vector3};
use log::{debug, info};
use std::sync::Arc;

use crate::config::WorldConfig;
use input::{BlockEdit, Input};
use rendering::{tile_atlas::TileAtlas, RenderStats, Renderer, WorldRenderer};
use scheduler::{RequestOutcome, Scheduler};
use voxels::{
    block::block_type::BlockType,
    raycast::{self, RayHit},
    terrain::TerrainGenerator,
    world::World,
};

pub mod input;
pub mod noise;
pub mod rendering;
pub mod scheduler;
pub mod task_management;
pub mod voxels;

/// How far, in blocks, the viewer can reach to break or place a block.
pub const EDIT_REACH: f32 = 30.0;

/// What one call to [`EngineState::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Worker results applied to the world
    pub completed: usize,
    /// Generation tasks dispatched
    pub generation_requests: usize,
    /// Meshing tasks dispatched
    pub mesh_requests: usize,
    /// Whether the pool filled up before every chunk was considered
    pub saturated: bool,
}

/// The main state container for the voxel engine
///
/// Owns the world and everything that acts on it. The shell passes it input, a
/// camera position and a renderer; the engine never reaches out for them itself.
///
/// # Examples
///
/// ```
/// use voxel_engine_core::{config::WorldConfig, engine_state::EngineState};
///
/// let mut engine = EngineState::new(WorldConfig {
///     size: Some(1),
///     ..WorldConfig::default()
/// });
/// assert_eq!(engine.world().chunk_count(), 1);
///
/// let report = engine.tick();
/// assert_eq!(report.generation_requests, 1);
/// ```
pub struct EngineState {
    config: WorldConfig,
    world: World,
    scheduler: Scheduler,
    generator: Arc<TerrainGenerator>,
    world_renderer: WorldRenderer,
}

impl EngineState {
    /// Creates the engine for a world configuration and starts its workers.
    ///
    /// With `config.size` set, the fixed square of chunks is registered right away;
    /// otherwise the world starts empty and grows through [`EngineState::request_area`].
    pub fn new(config: WorldConfig) -> Self {
        let generator = Arc::new(TerrainGenerator::new(config.seed, config.terrain));
        let atlas: Arc<dyn TileAtlas> = Arc::new(config.atlas);
        let scheduler = Scheduler::new(&config.scheduler, generator.clone(), atlas);

        let world = match config.size {
            Some(size) => World::with_size(size),
            None => World::new(),
        };

        info!(
            "Created world with seed {} ({} chunks registered, draw distance {})",
            config.seed,
            world.chunk_count(),
            config.draw_distance
        );

        EngineState {
            world_renderer: WorldRenderer::new(config.draw_distance),
            config,
            world,
            scheduler,
            generator,
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// Applies every finished worker result, then requests generation for chunks
    /// that have none yet and meshing for generated chunks whose mesh is stale.
    /// Requests stop as soon as the pool is full; the rest is picked up by a later
    /// tick.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport {
            completed: self.scheduler.process_completed(&mut self.world),
            ..TickReport::default()
        };

        let candidates: Vec<_> = self
            .world
            .chunks()
            .map(|(&position, chunk)| {
                let chunk = chunk.get();
                (position, chunk.generated, chunk.generating, chunk.dirty, chunk.mesh_generating)
            })
            .collect();

        for (position, generated, generating, dirty, mesh_generating) in candidates {
            let outcome = if !generated && !generating {
                let Some(chunk) = self.world.get_chunk(position) else {
                    continue;
                };
                let outcome = self.scheduler.request_generation(&chunk);
                if outcome == RequestOutcome::Dispatched {
                    report.generation_requests += 1;
                }
                outcome
            } else if generated && dirty && !mesh_generating {
                let outcome = self.scheduler.request_meshing_at(&self.world, position);
                if outcome == Some(RequestOutcome::Dispatched) {
                    report.mesh_requests += 1;
                }
                outcome.unwrap_or(RequestOutcome::NotGenerated)
            } else {
                continue;
            };

            if outcome == RequestOutcome::Saturated {
                report.saturated = true;
                break;
            }
        }

        report
    }

    /// Uploads rebuilt meshes and draws the chunks around `camera`.
    pub fn render(&self, renderer: &mut dyn Renderer, camera: Point3<f32>) -> RenderStats {
        self.world_renderer.render(&self.world, renderer, camera)
    }

    /// Registers every chunk within `radius` chunks of `center`.
    ///
    /// Chunks are only registered here; `tick()` generates and meshes them.
    ///
    /// # Returns
    /// The number of chunks that were not registered before.
    pub fn request_area(&mut self, center: Point3<f32>, radius: i32) -> usize {
        let (center_chunk, _) = World::block_to_chunk(World::world_to_block(center));
        let mut added = 0;

        for dz in -radius..=radius {
            for dx in -radius..=radius {
                let position = Point2::new(center_chunk.x + dx, center_chunk.y + dz);
                if self.world.get_chunk(position).is_none() && self.world.add_chunk(position).is_some() {
                    added += 1;
                }
            }
        }

        if added > 0 {
            debug!("Registered {} chunks around {:?}", added, center_chunk);
        }
        added
    }

    /// Casts a ray from the viewer and applies `edit` to what it hits.
    ///
    /// `Break` turns the hit block into air; `Place` fills the cell in front of the
    /// hit face. The edited chunk is remeshed by a later tick.
    ///
    /// # Returns
    /// The hit the edit was aimed at, or `None` if nothing solid is within reach.
    pub fn edit_block(&mut self, edit: BlockEdit, origin: Point3<f32>, direction: Vector3<f32>) -> Option<RayHit> {
        let hit = raycast::cast(&self.world, origin, direction, EDIT_REACH)?;

        let applied = match edit {
            BlockEdit::Break => self.world.set_block(hit.block, BlockType::AIR),
            BlockEdit::Place(block) => self.world.set_block(hit.adjacent(), block),
        };
        debug!("{:?} at {:?} (applied: {})", edit, hit.block, applied);

        Some(hit)
    }

    /// Applies the block edit requested by this frame's pointer presses, if any.
    pub fn handle_pointer(&mut self, input: &dyn Input, origin: Point3<f32>, direction: Vector3<f32>) -> Option<RayHit> {
        let edit = BlockEdit::from_input(input)?;
        self.edit_block(edit, origin, direction)
    }

    /// Chunks that are registered but not yet generated, or whose mesh is stale.
    pub fn pending_chunks(&self) -> usize {
        self.world
            .chunks()
            .filter(|(_, chunk)| {
                let chunk = chunk.get();
                !chunk.generated || chunk.dirty || chunk.mesh_generating
            })
            .count()
    }

    /// The configuration the engine was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for direct edits.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The shared terrain synthesizer.
    pub fn generator(&self) -> &Arc<TerrainGenerator> {
        &self.generator
    }

    /// The generation scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
