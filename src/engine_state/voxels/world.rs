//! # World Module
//!
//! This module provides the `World` struct which owns every loaded chunk of the voxel
//! world and translates world block coordinates into `(chunk, local)` pairs.
//!
//! ## Architecture
//!
//! The world uses sparse storage: chunks are registered on demand (when the world
//! grows towards a requested area) and never evicted on their own. Each chunk sits
//! behind its own lock, so workers can mesh one chunk while the owner edits another.
//!
//! ## Coordinates
//!
//! World block coordinates map to chunks with floor division by the chunk width on X
//! and Z; the Y axis is not chunked. Chunk coordinates are 2-D, with the chunk's `y`
//! component following the world Z axis.

use cgmath::{Point2, Point3};
use log::{debug, warn};
use std::collections::HashMap;

use crate::core::MtResource;
use crate::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::{neighbors::ChunkNeighbors, Chunk, CHUNK_WIDTH},
};

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use cgmath::{Point2, Point3};
/// use voxel_engine_core::engine_state::voxels::{block::block_type::BlockType, world::World};
///
/// let mut world = World::new();
/// world.add_chunk(Point2::new(0, 0));
///
/// // Edits outside loaded chunks are ignored.
/// assert!(!world.set_block(Point3::new(40, 0, 0), BlockType::STONE));
/// assert!(world.set_block(Point3::new(3, 0, 5), BlockType::STONE));
/// assert_eq!(world.get_block(Point3::new(3, 0, 5)), BlockType::STONE);
/// ```
#[derive(Default)]
pub struct World {
    chunks: HashMap<Point2<i32>, MtResource<Chunk>>,
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World {
            chunks: HashMap::new(),
        }
    }

    /// Creates a world with the `size × size` square of chunks starting at the
    /// origin already registered.
    pub fn with_size(size: u32) -> Self {
        let mut world = World::new();
        let size = size as i32;
        for z in 0..size {
            for x in 0..size {
                world.add_chunk(Point2::new(x, z));
            }
        }
        world
    }

    /// Retrieves the chunk at the specified chunk coordinates without allocating.
    ///
    /// # Returns
    /// A clone of the shared handle if the chunk exists, or `None` if not.
    pub fn get_chunk(&self, position: Point2<i32>) -> Option<MtResource<Chunk>> {
        self.chunks.get(&position).cloned()
    }

    /// Registers a new, ungenerated chunk.
    ///
    /// # Returns
    /// The new chunk, or `None` (with a warning) if the coordinate is already taken.
    pub fn add_chunk(&mut self, position: Point2<i32>) -> Option<MtResource<Chunk>> {
        if self.chunks.contains_key(&position) {
            warn!("Chunk {:?} is already registered", position);
            return None;
        }

        let chunk = MtResource::new(Chunk::new(position));
        self.chunks.insert(position, chunk.clone());
        Some(chunk)
    }

    /// Returns the chunk at `position`, registering it first if needed.
    pub fn get_or_add_chunk(&mut self, position: Point2<i32>) -> MtResource<Chunk> {
        self.chunks
            .entry(position)
            .or_insert_with(|| MtResource::new(Chunk::new(position)))
            .clone()
    }

    /// Handles to the loaded horizontal neighbors of a chunk.
    pub fn neighbors(&self, position: Point2<i32>) -> ChunkNeighbors<Option<MtResource<Chunk>>> {
        ChunkNeighbors::around(position).map(|neighbor| self.get_chunk(neighbor))
    }

    /// Iterates over every loaded chunk.
    pub fn chunks(&self) -> impl Iterator<Item = (&Point2<i32>, &MtResource<Chunk>)> {
        self.chunks.iter()
    }

    /// Number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Converts a continuous world position to the block containing it.
    ///
    /// Uses component-wise floor, so `-0.1` maps to block `-1`.
    pub fn world_to_block(position: Point3<f32>) -> Point3<i32> {
        Point3::new(
            position.x.floor() as i32,
            position.y.floor() as i32,
            position.z.floor() as i32,
        )
    }

    /// Splits a world block coordinate into its chunk coordinate and the
    /// chunk-local block coordinate.
    pub fn block_to_chunk(block: Point3<i32>) -> (Point2<i32>, Point3<i32>) {
        (
            Point2::new(block.x.div_euclid(CHUNK_WIDTH), block.z.div_euclid(CHUNK_WIDTH)),
            Point3::new(
                block.x.rem_euclid(CHUNK_WIDTH),
                block.y,
                block.z.rem_euclid(CHUNK_WIDTH),
            ),
        )
    }

    /// Gets the block at a world block coordinate.
    ///
    /// # Returns
    /// Air when the owning chunk is not loaded or `y` is outside the world.
    pub fn get_block(&self, block: Point3<i32>) -> BlockType {
        let (chunk_position, local) = Self::block_to_chunk(block);
        self.chunks
            .get(&chunk_position)
            .map(|chunk| chunk.get().get_block(local))
            .unwrap_or(BlockType::AIR)
    }

    /// Sets the block at a world block coordinate.
    ///
    /// Edits on a chunk border also re-dirty the adjacent chunk, whose culled
    /// boundary faces depend on the edited cell.
    ///
    /// # Returns
    /// `false` (a no-op) when the owning chunk is not loaded or `y` is outside the world.
    pub fn set_block(&mut self, block: Point3<i32>, block_type: BlockType) -> bool {
        let (chunk_position, local) = Self::block_to_chunk(block);
        let Some(chunk) = self.chunks.get(&chunk_position) else {
            debug!("Ignoring edit at {:?}: chunk {:?} is not loaded", block, chunk_position);
            return false;
        };

        if !chunk.get_mut().set_block(local, block_type) {
            return false;
        }

        let neighbors = ChunkNeighbors::around(chunk_position);
        let touched = [
            (local.z == CHUNK_WIDTH - 1, neighbors.front),
            (local.z == 0, neighbors.back),
            (local.x == 0, neighbors.left),
            (local.x == CHUNK_WIDTH - 1, neighbors.right),
        ];
        for (on_border, neighbor) in touched {
            if !on_border {
                continue;
            }
            if let Some(neighbor) = self.chunks.get(&neighbor) {
                let mut neighbor = neighbor.get_mut();
                if neighbor.generated {
                    neighbor.mark_dirty();
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_to_block_floors_each_component() {
        assert_eq!(
            World::world_to_block(Point3::new(-0.1, 5.9, 3.0)),
            Point3::new(-1, 5, 3)
        );
        assert_eq!(
            World::world_to_block(Point3::new(-16.0, -0.0, 15.99)),
            Point3::new(-16, 0, 15)
        );
    }

    #[test]
    fn block_to_chunk_handles_negative_coordinates() {
        assert_eq!(
            World::block_to_chunk(Point3::new(-1, 7, 16)),
            (Point2::new(-1, 1), Point3::new(15, 7, 0))
        );
        assert_eq!(
            World::block_to_chunk(Point3::new(-16, 0, -17)),
            (Point2::new(-1, -2), Point3::new(0, 0, 15))
        );
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let mut world = World::new();
        let first = world.add_chunk(Point2::new(1, 2)).unwrap();
        assert!(world.add_chunk(Point2::new(1, 2)).is_none());
        assert_eq!(world.chunk_count(), 1);
        assert!(world.get_or_add_chunk(Point2::new(1, 2)).ptr_eq(&first));
    }

    #[test]
    fn unloaded_chunks_read_as_air_and_ignore_writes() {
        let mut world = World::new();
        assert_eq!(world.get_block(Point3::new(5, 5, 5)), BlockType::AIR);
        assert!(!world.set_block(Point3::new(5, 5, 5), BlockType::STONE));
        assert!(world.get_chunk(Point2::new(0, 0)).is_none());
    }

    #[test]
    fn edits_reach_the_owning_chunk() {
        let mut world = World::with_size(2);
        assert_eq!(world.chunk_count(), 4);

        assert!(world.set_block(Point3::new(17, 3, 2), BlockType::COBBLESTONE));
        assert_eq!(world.get_block(Point3::new(17, 3, 2)), BlockType::COBBLESTONE);

        let chunk = world.get_chunk(Point2::new(1, 0)).unwrap();
        assert_eq!(chunk.get().get_block(Point3::new(1, 3, 2)), BlockType::COBBLESTONE);
        assert!(!world.set_block(Point3::new(17, 256, 2), BlockType::COBBLESTONE));
    }

    #[test]
    fn border_edits_dirty_generated_neighbors() {
        let mut world = World::with_size(2);
        let right = world.get_chunk(Point2::new(1, 0)).unwrap();
        right
            .get_mut()
            .install_generated_blocks(Chunk::empty_blocks());
        right.get_mut().dirty = false;
        let front = world.get_chunk(Point2::new(0, 1)).unwrap();

        world.set_block(Point3::new(15, 10, 4), BlockType::STONE);
        assert!(right.get().dirty);
        // Ungenerated neighbors are left alone.
        assert!(!front.get().dirty);

        right.get_mut().dirty = false;
        world.set_block(Point3::new(8, 10, 8), BlockType::STONE);
        assert!(!right.get().dirty);
    }
}
