//! # Generation Scheduler
//!
//! Turns chunk requests into worker tasks. The scheduler claims a chunk's in-flight
//! flag before dispatching, so at most one generation and one meshing task exist per
//! chunk at any time, and it reports rather than queues work it cannot take.
//!
//! ## Request Rules
//! - Generation: only for chunks neither generated nor generating
//! - Meshing: only for generated chunks with no mesh build in flight
//! - A full pool drops the request (`Saturated`); the owner re-requests next tick

use cgmath::Point2;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{
    rendering::{tasks::chunk_mesh_generation_task::ChunkMeshGenerationTask, tile_atlas::TileAtlas},
    task_management::TaskManager,
    voxels::{
        chunk::{neighbors::ChunkNeighbors, Chunk},
        tasks::chunk_generation_task::ChunkGenerationTask,
        terrain::TerrainGenerator,
        world::World,
    },
};
use crate::core::MtResource;

/// Worker pool dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Number of worker threads
    pub worker_threads: usize,
    /// Tasks one worker may have in flight
    pub tasks_per_worker: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            worker_threads: 4,
            tasks_per_worker: 25,
        }
    }
}

impl SchedulerConfig {
    /// Total number of tasks that may be in flight.
    pub fn capacity(&self) -> usize {
        self.worker_threads * self.tasks_per_worker
    }
}

/// What became of a generation or meshing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A task was handed to a worker
    Dispatched,
    /// A task of the same kind is already running for this chunk
    AlreadyInFlight,
    /// The chunk was generated before; generation never repeats
    AlreadyGenerated,
    /// Meshing was requested before the chunk was generated
    NotGenerated,
    /// Every worker slot is busy; the request was dropped
    Saturated,
}

/// Dispatches chunk generation and meshing onto the worker pool.
pub struct Scheduler {
    task_manager: TaskManager,
    generator: Arc<TerrainGenerator>,
    atlas: Arc<dyn TileAtlas>,
}

impl Scheduler {
    /// Creates a scheduler and starts its worker pool.
    pub fn new(config: &SchedulerConfig, generator: Arc<TerrainGenerator>, atlas: Arc<dyn TileAtlas>) -> Self {
        Scheduler {
            task_manager: TaskManager::new(config.worker_threads, config.tasks_per_worker),
            generator,
            atlas,
        }
    }

    /// Requests terrain synthesis for a chunk.
    pub fn request_generation(&mut self, chunk: &MtResource<Chunk>) -> RequestOutcome {
        let position = {
            let mut guard = chunk.get_mut();
            if guard.generating {
                return RequestOutcome::AlreadyInFlight;
            }
            if guard.generated {
                return RequestOutcome::AlreadyGenerated;
            }
            if !self.task_manager.has_capacity() {
                debug!("Dropped generation request for {:?}: pool saturated", guard.position);
                return RequestOutcome::Saturated;
            }
            guard.generating = true;
            guard.position
        };

        let task = ChunkGenerationTask::new(chunk.clone(), position, self.generator.clone());
        match self.task_manager.publish_task(Box::new(task)) {
            Ok(()) => RequestOutcome::Dispatched,
            Err(_) => {
                chunk.get_mut().generating = false;
                RequestOutcome::Saturated
            }
        }
    }

    /// Requests a mesh rebuild for a generated chunk.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to mesh
    /// * `neighbors` - Its loaded horizontal neighbors, used for border culling
    pub fn request_meshing(
        &mut self,
        chunk: &MtResource<Chunk>,
        neighbors: ChunkNeighbors<Option<MtResource<Chunk>>>,
    ) -> RequestOutcome {
        let position = {
            let mut guard = chunk.get_mut();
            if guard.mesh_generating {
                return RequestOutcome::AlreadyInFlight;
            }
            if !guard.generated {
                return RequestOutcome::NotGenerated;
            }
            if !self.task_manager.has_capacity() {
                debug!("Dropped meshing request for {:?}: pool saturated", guard.position);
                return RequestOutcome::Saturated;
            }
            guard.mesh_generating = true;
            guard.position
        };

        let task = ChunkMeshGenerationTask::new(chunk.clone(), position, neighbors, self.atlas.clone());
        match self.task_manager.publish_task(Box::new(task)) {
            Ok(()) => RequestOutcome::Dispatched,
            Err(_) => {
                chunk.get_mut().mesh_generating = false;
                RequestOutcome::Saturated
            }
        }
    }

    /// Requests meshing for the chunk registered at `position` in `world`.
    pub fn request_meshing_at(&mut self, world: &World, position: Point2<i32>) -> Option<RequestOutcome> {
        let chunk = world.get_chunk(position)?;
        Some(self.request_meshing(&chunk, world.neighbors(position)))
    }

    /// Drains finished tasks and applies their results to the world.
    ///
    /// # Returns
    /// The number of tasks completed since the last call.
    pub fn process_completed(&mut self, world: &mut World) -> usize {
        self.task_manager.process_completed_tasks(world)
    }

    /// Tasks dispatched but not yet drained.
    pub fn in_flight(&self) -> usize {
        self.task_manager.in_flight()
    }

    /// Maximum number of concurrent tasks.
    pub fn capacity(&self) -> usize {
        self.task_manager.capacity()
    }

    /// Whether a new request could be dispatched right now.
    pub fn has_capacity(&self) -> bool {
        self.task_manager.has_capacity()
    }
}
