//! Face-culled meshing.
//!
//! Every opaque block contributes one quad per side whose adjacent cell is not
//! opaque. Adjacent cells outside the chunk are resolved as follows:
//! - above the ceiling or below the floor: air, so the face is drawn
//! - across a horizontal border: the mirrored boundary block of the neighbor chunk,
//!   or air when that neighbor is missing or not generated yet

use cgmath::{Point3, Vector3};

use super::{face::Face, mesh::Mesh};
use crate::engine_state::{
    rendering::tile_atlas::TileAtlas,
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType},
        chunk::{neighbors::ChunkNeighbors, Chunk, CHUNK_HEIGHT, CHUNK_WIDTH},
    },
};

/// Resolves the block adjacent to `local`, which may lie one step outside the chunk.
fn adjacent_block(
    chunk: &Chunk,
    neighbors: &ChunkNeighbors<Option<&Chunk>>,
    local: Point3<i32>,
) -> BlockType {
    if !(0..CHUNK_HEIGHT).contains(&local.y) {
        return BlockType::AIR;
    }

    let side = if local.x < 0 {
        BlockSide::LEFT
    } else if local.x >= CHUNK_WIDTH {
        BlockSide::RIGHT
    } else if local.z < 0 {
        BlockSide::BACK
    } else if local.z >= CHUNK_WIDTH {
        BlockSide::FRONT
    } else {
        return chunk.get_block(local);
    };

    match neighbors.get(side).copied().flatten() {
        Some(neighbor) if neighbor.generated => neighbor.get_block(Point3::new(
            local.x.rem_euclid(CHUNK_WIDTH),
            local.y,
            local.z.rem_euclid(CHUNK_WIDTH),
        )),
        _ => BlockType::AIR,
    }
}

/// Builds the face-culled mesh of a chunk.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `neighbors` - Horizontal neighbors used to cull faces on the chunk border
/// * `atlas` - Resolves each face's tile to texture coordinates
///
/// # Returns
/// A mesh in chunk-local space. Its state is left `Uninitialized`; installing it on
/// the chunk marks it ready for upload.
pub fn culled(
    chunk: &Chunk,
    neighbors: &ChunkNeighbors<Option<&Chunk>>,
    atlas: &dyn TileAtlas,
) -> Mesh {
    let mut mesh = Mesh::new();

    for z in 0..CHUNK_WIDTH {
        for y in 0..CHUNK_HEIGHT {
            for x in 0..CHUNK_WIDTH {
                let position = Point3::new(x, y, z);
                let block = chunk.get_block(position);
                if !block.is_opaque() {
                    continue;
                }

                for side in BlockSide::all() {
                    let normal: Vector3<i32> = side.normal();
                    if adjacent_block(chunk, neighbors, position + normal).is_opaque() {
                        continue;
                    }
                    mesh.add_face(&Face::new(position, block, side), atlas);
                }
            }
        }
    }

    mesh
}
