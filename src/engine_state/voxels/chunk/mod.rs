//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed 16×256×16 column of blocks, the
//! unit of storage, generation and meshing.
//!
//! ## Memory Layout
//!
//! Blocks are stored inline in one flat array, one byte per block, indexed as
//! `x + y * CHUNK_WIDTH + z * CHUNK_WIDTH * CHUNK_HEIGHT`. Coordinates outside the
//! chunk never index the array: reads resolve to air and writes are ignored.
//!
//! ## Lifecycle
//!
//! A chunk starts out empty and ungenerated. The scheduler flips `generating` while
//! a synthesis task owns it, and `mesh_generating` while a mesh build does. Every
//! block write bumps the chunk's `revision`, which lets a finished mesh build tell
//! whether the blocks it read are still current.

use cgmath::{Point2, Point3};

use super::block::block_type::BlockType;
use crate::engine_state::rendering::meshing::mesh::{Mesh, MeshState};

pub mod neighbors;

/// Width and depth of a chunk in blocks.
pub const CHUNK_WIDTH: i32 = 16;
/// Height of a chunk in blocks. The world has a hard floor at 0 and ceiling here.
pub const CHUNK_HEIGHT: i32 = 256;
/// Number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_WIDTH * CHUNK_WIDTH * CHUNK_HEIGHT) as usize;

/// Represents a 16×256×16 column of voxel blocks in the world.
#[derive(Debug)]
pub struct Chunk {
    /// Chunk coordinates; `y` is the world Z axis divided by the chunk width.
    pub position: Point2<i32>,
    blocks: Box<[BlockType]>,
    /// The chunk's renderable geometry
    pub mesh: Mesh,
    /// Blocks changed since the last mesh was installed
    pub dirty: bool,
    /// Terrain synthesis has completed
    pub generated: bool,
    /// A synthesis task is in flight
    pub generating: bool,
    /// A mesh build task is in flight
    pub mesh_generating: bool,
    revision: u64,
}

impl Chunk {
    /// Creates an empty, ungenerated chunk filled with air.
    pub fn new(position: Point2<i32>) -> Self {
        Chunk {
            position,
            blocks: Self::empty_blocks(),
            mesh: Mesh::new(),
            dirty: false,
            generated: false,
            generating: false,
            mesh_generating: false,
            revision: 0,
        }
    }

    /// Allocates an all-air block array of chunk size.
    pub fn empty_blocks() -> Box<[BlockType]> {
        vec![BlockType::AIR; CHUNK_VOLUME].into_boxed_slice()
    }

    /// Computes the flat array index of a chunk-local coordinate.
    ///
    /// # Returns
    /// `None` when the coordinate lies outside the chunk.
    pub fn block_index(local: Point3<i32>) -> Option<usize> {
        if !(0..CHUNK_WIDTH).contains(&local.x)
            || !(0..CHUNK_HEIGHT).contains(&local.y)
            || !(0..CHUNK_WIDTH).contains(&local.z)
        {
            return None;
        }
        Some((local.x + local.y * CHUNK_WIDTH + local.z * CHUNK_WIDTH * CHUNK_HEIGHT) as usize)
    }

    /// Gets the block at the chunk-local coordinate, or air when out of range.
    pub fn get_block(&self, local: Point3<i32>) -> BlockType {
        Self::block_index(local)
            .map(|index| self.blocks[index])
            .unwrap_or(BlockType::AIR)
    }

    /// Sets the block at the chunk-local coordinate and marks the chunk dirty.
    ///
    /// # Returns
    /// `false` (and nothing changes) when the coordinate is out of range.
    pub fn set_block(&mut self, local: Point3<i32>, block: BlockType) -> bool {
        match Self::block_index(local) {
            Some(index) => {
                self.blocks[index] = block;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Flags the chunk for re-meshing. Bumps the revision so a build that is
    /// already running cannot clear the flag.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    /// Number of block writes the chunk has seen.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Read-only view of the raw block array.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    /// Replaces the chunk's blocks with a freshly synthesized array.
    ///
    /// Completes the generation phase: `generated` and `dirty` are set and
    /// `generating` is cleared. Arrays of the wrong size are rejected and leave the
    /// chunk ungenerated.
    pub fn install_generated_blocks(&mut self, blocks: Box<[BlockType]>) {
        self.generating = false;
        if blocks.len() != CHUNK_VOLUME {
            log::error!(
                "Chunk {:?} received {} blocks, expected {}",
                self.position,
                blocks.len(),
                CHUNK_VOLUME
            );
            return;
        }
        self.blocks = blocks;
        self.generated = true;
        self.mark_dirty();
    }

    /// Installs a rebuilt mesh and completes the meshing phase.
    ///
    /// # Arguments
    /// * `mesh` - The new geometry; it replaces the previous mesh wholesale
    /// * `revision` - The chunk revision the mesh was built from. `dirty` is only
    ///   cleared when no block changed since then.
    pub fn install_mesh(&mut self, mut mesh: Mesh, revision: u64) {
        mesh.state = MeshState::ReadyToUpload;
        self.mesh = mesh;
        self.mesh_generating = false;
        if revision == self.revision {
            self.dirty = false;
        }
    }

    /// World-space block coordinate of the chunk's minimum corner.
    pub fn world_origin(&self) -> Point3<i32> {
        Point3::new(
            self.position.x * CHUNK_WIDTH,
            0,
            self.position.y * CHUNK_WIDTH,
        )
    }
}
