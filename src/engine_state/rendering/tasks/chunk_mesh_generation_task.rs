//! Task for generating mesh data for chunks in a background thread.
//!
//! The build holds read locks on the chunk and its loaded neighbors, then re-locks
//! the chunk for writing to install the mesh. A block edit that lands in between is
//! detected through the chunk revision and keeps the chunk dirty.

use cgmath::Point2;
use log::debug;
use std::{sync::Arc, time::Duration};
use web_time::Instant;

use crate::{
    core::MtResource,
    engine_state::{
        rendering::{meshing::build_chunk_mesh, tile_atlas::TileAtlas},
        task_management::task::{Task, TaskResult},
        voxels::{
            chunk::{neighbors::ChunkNeighbors, Chunk},
            world::World,
        },
    },
};

/// A task that rebuilds the mesh of one chunk.
pub struct ChunkMeshGenerationTask {
    /// The chunk to mesh; its `mesh_generating` flag is already set
    chunk: MtResource<Chunk>,
    /// The position of the chunk (in chunk coordinates)
    position: Point2<i32>,
    /// Loaded horizontal neighbors at the time of the request
    neighbors: ChunkNeighbors<Option<MtResource<Chunk>>>,
    /// Tile lookup for face texture coordinates
    atlas: Arc<dyn TileAtlas>,
}

impl ChunkMeshGenerationTask {
    /// Creates a new chunk mesh generation task.
    ///
    /// # Arguments
    /// * `chunk` - The chunk that needs a new mesh
    /// * `position` - The chunk coordinates of `chunk`
    /// * `neighbors` - Handles to its loaded neighbors
    /// * `atlas` - The shared tile atlas
    pub fn new(
        chunk: MtResource<Chunk>,
        position: Point2<i32>,
        neighbors: ChunkNeighbors<Option<MtResource<Chunk>>>,
        atlas: Arc<dyn TileAtlas>,
    ) -> Self {
        ChunkMeshGenerationTask {
            chunk,
            position,
            neighbors,
            atlas,
        }
    }
}

impl Task for ChunkMeshGenerationTask {
    /// Builds the mesh and installs it on the chunk, clearing `mesh_generating`.
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let start = Instant::now();
        let (mesh, revision) = build_chunk_mesh(&self.chunk, &self.neighbors, self.atlas.as_ref());
        let face_count = mesh.face_count();

        let still_dirty = {
            let mut chunk = self.chunk.get_mut();
            chunk.install_mesh(mesh, revision);
            chunk.dirty
        };

        Box::new(ChunkMeshGenerationTaskResult {
            position: self.position,
            face_count,
            still_dirty,
            elapsed: start.elapsed(),
        })
    }
}

/// The result of a chunk mesh generation task.
pub struct ChunkMeshGenerationTaskResult {
    position: Point2<i32>,
    face_count: usize,
    still_dirty: bool,
    elapsed: Duration,
}

impl TaskResult for ChunkMeshGenerationTaskResult {
    fn handle_result(self: Box<Self>, _world: &mut World) {
        debug!(
            "Meshed chunk {:?}: {} faces in {:?}{}",
            self.position,
            self.face_count,
            self.elapsed,
            if self.still_dirty { " (edited during build)" } else { "" }
        );
    }
}
