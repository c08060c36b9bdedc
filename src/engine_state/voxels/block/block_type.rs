//! # Block Type Module
//!
//! This module defines the palette of blocks in the voxel world.
//! It provides block type identification, conversion from the compact storage id,
//! and the single derived property the core cares about: opacity.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// Each variant is stored inline in chunk arrays as its `BlockTypeSize` id; blocks are
/// never individually allocated. The `FromPrimitive` derive allows conversion from the
/// compact id, which is how edits arriving from outside the core are decoded.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An empty cell. The only transparent block of the base palette.
    #[default]
    AIR = 0,

    /// Raw terrain volume produced by the height field.
    STONE = 1,

    /// Player-placed building block.
    COBBLESTONE = 2,

    /// The sub-surface layer laid on top of stone.
    DIRT = 3,

    /// A grass block with different textures on top and sides.
    /// The top is green, sides have grass on dirt, and bottom is plain dirt.
    GRASS = 4,
}

impl BlockType {
    /// Number of block types in the palette.
    pub const COUNT: usize = 5;

    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the id is not part of the palette.
    pub fn from_id(id: BlockTypeSize) -> Option<Self> {
        Self::from_u8(id)
    }

    /// The compact storage id of this block type.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether the block hides the faces of its neighbors.
    ///
    /// Air is the only transparent value of the base palette.
    pub fn is_opaque(self) -> bool {
        self != BlockType::AIR
    }
}
