//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the static mapping
//! from block faces to tile atlas entries.

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Identifier of a tile inside the texture atlas.
pub type TileId = u32;

/// Atlas tile of plain stone.
pub const TILE_STONE: TileId = 0;
/// Atlas tile of cobblestone.
pub const TILE_COBBLESTONE: TileId = 1;
/// Atlas tile of dirt, also used under grass blocks.
pub const TILE_DIRT: TileId = 2;
/// Atlas tile of the green top of a grass block.
pub const TILE_GRASS_TOP: TileId = 3;
/// Atlas tile of the grass-on-dirt side of a grass block.
pub const TILE_GRASS_SIDE: TileId = 4;

/// Maps each block type to its corresponding tile ids for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array contains 6 tile ids, one for each face in the order:
/// [Top, Bottom, Front, Back, Left, Right]
pub static BLOCK_TYPE_TO_TILE_IDS: [[TileId; 6]; BlockType::COUNT] = [
    [0, 0, 0, 0, 0, 0], // AIR (never meshed)
    [TILE_STONE; 6],
    [TILE_COBBLESTONE; 6],
    [TILE_DIRT; 6],
    [
        TILE_GRASS_TOP,
        TILE_DIRT,
        TILE_GRASS_SIDE,
        TILE_GRASS_SIDE,
        TILE_GRASS_SIDE,
        TILE_GRASS_SIDE,
    ],
];

impl BlockType {
    /// Gets the atlas tile used for one face of this block type.
    pub fn tile_for_side(self, side: BlockSide) -> TileId {
        BLOCK_TYPE_TO_TILE_IDS[self as usize][side as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_has_split_tiles_and_dirt_bottom() {
        assert_eq!(
            BlockType::GRASS.tile_for_side(BlockSide::TOP),
            TILE_GRASS_TOP
        );
        assert_eq!(
            BlockType::GRASS.tile_for_side(BlockSide::BOTTOM),
            BlockType::DIRT.tile_for_side(BlockSide::BOTTOM)
        );
        for side in [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ] {
            assert_eq!(BlockType::GRASS.tile_for_side(side), TILE_GRASS_SIDE);
        }
    }

    #[test]
    fn uniform_blocks_use_one_tile() {
        for (block, tile) in [
            (BlockType::STONE, TILE_STONE),
            (BlockType::COBBLESTONE, TILE_COBBLESTONE),
            (BlockType::DIRT, TILE_DIRT),
        ] {
            for side in BlockSide::all() {
                assert_eq!(block.tile_for_side(side), tile);
            }
        }
    }
}
