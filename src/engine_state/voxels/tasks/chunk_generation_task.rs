//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask` which runs terrain synthesis for one
//! chunk on a worker thread. The blocks are synthesized without holding the chunk's
//! lock; the lock is only taken to install the finished array.

use cgmath::Point2;
use log::debug;
use std::{sync::Arc, time::Duration};
use web_time::Instant;

use crate::{
    core::MtResource,
    engine_state::{
        task_management::task::{Task, TaskResult},
        voxels::{chunk::Chunk, terrain::TerrainGenerator, world::World},
    },
};

/// A task that fills a chunk with synthesized terrain.
pub struct ChunkGenerationTask {
    /// The chunk to fill; its `generating` flag is already set
    chunk: MtResource<Chunk>,
    /// The position of the chunk (in chunk coordinates)
    position: Point2<i32>,
    /// The shared synthesizer
    generator: Arc<TerrainGenerator>,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to fill
    /// * `position` - The chunk coordinates of `chunk`
    /// * `generator` - The terrain synthesizer shared by all workers
    pub fn new(chunk: MtResource<Chunk>, position: Point2<i32>, generator: Arc<TerrainGenerator>) -> Self {
        ChunkGenerationTask {
            chunk,
            position,
            generator,
        }
    }
}

impl Task for ChunkGenerationTask {
    /// Synthesizes the blocks and installs them, which marks the chunk generated and
    /// dirty and clears its `generating` flag.
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let start = Instant::now();
        let blocks = self.generator.generate(self.position);
        self.chunk.get_mut().install_generated_blocks(blocks);

        Box::new(ChunkGenerationTaskResult {
            position: self.position,
            elapsed: start.elapsed(),
        })
    }
}

/// The result of a chunk generation task.
pub struct ChunkGenerationTaskResult {
    position: Point2<i32>,
    elapsed: Duration,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Re-dirties the already generated neighbors of the new chunk.
    ///
    /// Their border faces were drawn while this chunk was missing and can now be
    /// culled against it.
    fn handle_result(self: Box<Self>, world: &mut World) {
        debug!("Generated chunk {:?} in {:?}", self.position, self.elapsed);

        for neighbor in world.neighbors(self.position).into_array().into_iter().flatten() {
            let mut neighbor = neighbor.get_mut();
            if neighbor.generated {
                neighbor.mark_dirty();
            }
        }
    }
}
