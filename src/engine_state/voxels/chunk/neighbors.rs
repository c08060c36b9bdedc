use cgmath::Point2;

use crate::engine_state::voxels::block::block_side::BlockSide;

/// The four horizontal neighbors of a chunk.
///
/// `front` sits at chunk `(x, y + 1)` (towards +Z), `back` at `(x, y - 1)`, `left`
/// at `(x - 1, y)` and `right` at `(x + 1, y)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkNeighbors<T> {
    /// The +Z neighbor
    pub front: T,
    /// The -Z neighbor
    pub back: T,
    /// The -X neighbor
    pub left: T,
    /// The +X neighbor
    pub right: T,
}

impl ChunkNeighbors<Point2<i32>> {
    /// Chunk coordinates of the four neighbors of `position`.
    pub fn around(position: Point2<i32>) -> Self {
        ChunkNeighbors {
            front: Point2::new(position.x, position.y + 1),
            back: Point2::new(position.x, position.y - 1),
            left: Point2::new(position.x - 1, position.y),
            right: Point2::new(position.x + 1, position.y),
        }
    }
}

impl<T> ChunkNeighbors<T> {
    /// Builds a set of neighbors by evaluating `f` once per side.
    pub fn from_fn(mut f: impl FnMut(BlockSide) -> T) -> Self {
        ChunkNeighbors {
            front: f(BlockSide::FRONT),
            back: f(BlockSide::BACK),
            left: f(BlockSide::LEFT),
            right: f(BlockSide::RIGHT),
        }
    }

    /// Returns the neighbor across a horizontal side, `None` for top and bottom.
    pub fn get(&self, side: BlockSide) -> Option<&T> {
        match side {
            BlockSide::FRONT => Some(&self.front),
            BlockSide::BACK => Some(&self.back),
            BlockSide::LEFT => Some(&self.left),
            BlockSide::RIGHT => Some(&self.right),
            BlockSide::TOP | BlockSide::BOTTOM => None,
        }
    }

    /// Maps every neighbor through `f`.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ChunkNeighbors<U> {
        ChunkNeighbors {
            front: f(self.front),
            back: f(self.back),
            left: f(self.left),
            right: f(self.right),
        }
    }

    /// Borrows every neighbor.
    pub fn as_ref(&self) -> ChunkNeighbors<&T> {
        ChunkNeighbors {
            front: &self.front,
            back: &self.back,
            left: &self.left,
            right: &self.right,
        }
    }

    /// The neighbors in `front, back, left, right` order.
    pub fn into_array(self) -> [T; 4] {
        [self.front, self.back, self.left, self.right]
    }
}
