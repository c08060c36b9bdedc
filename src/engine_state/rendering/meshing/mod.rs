//! Mesh generation and management for voxel rendering.
//!
//! This module builds chunk meshes from shared chunk handles. A build reads the chunk
//! and its four horizontal neighbors, so it holds up to five read locks at once.
//!
//! # Locking
//! Read locks are always acquired in ascending chunk-coordinate order. Writers (block
//! edits, generation installs, mesh installs) only ever hold the lock of a single
//! chunk, so concurrent builds cannot deadlock with each other or with writers.

use cgmath::Point2;
use std::sync::RwLockReadGuard;

use crate::{
    core::MtResource,
    engine_state::{
        rendering::tile_atlas::TileAtlas,
        voxels::chunk::{neighbors::ChunkNeighbors, Chunk},
    },
};

pub mod mesh;

use mesh::Mesh;

/// Builds the mesh of a shared chunk against its loaded neighbors.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `neighbors` - Handles to the loaded horizontal neighbors
/// * `atlas` - Tile lookup for face texture coordinates
///
/// # Returns
/// The mesh together with the chunk revision it was built from.
pub fn build_chunk_mesh(
    chunk: &MtResource<Chunk>,
    neighbors: &ChunkNeighbors<Option<MtResource<Chunk>>>,
    atlas: &dyn TileAtlas,
) -> (Mesh, u64) {
    // Slot 0 is the chunk itself, slots 1..=4 its neighbors in front, back, left, right order.
    let neighbor_positions = ChunkNeighbors::around(chunk.get().position).into_array();
    let mut handles: Vec<(Point2<i32>, usize, &MtResource<Chunk>)> = Vec::with_capacity(5);
    for (slot, handle) in neighbors.as_ref().into_array().into_iter().enumerate() {
        if let Some(handle) = handle {
            handles.push((neighbor_positions[slot], slot + 1, handle));
        }
    }
    handles.push((chunk.get().position, 0, chunk));
    handles.sort_by_key(|(position, _, _)| (position.x, position.y));

    let mut guards: [Option<RwLockReadGuard<'_, Chunk>>; 5] = Default::default();
    for (_, slot, handle) in handles {
        guards[slot] = Some(handle.get());
    }

    let [own, front, back, left, right] = &guards;
    let Some(own) = own.as_deref() else {
        return (Mesh::new(), 0);
    };
    let neighbors = ChunkNeighbors {
        front: front.as_deref(),
        back: back.as_deref(),
        left: left.as_deref(),
        right: right.as_deref(),
    };

    (mesh::culled(own, &neighbors, atlas), own.revision())
}
