//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block.
//! It provides the outward normal of each face, used for face culling and as the
//! hit normal reported by ray casts, plus the constant tint that approximates
//! directional shading without a lighting pass.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a unique integer value that doubles as an index
/// into per-face tables (tile ids, vertex templates).
///
/// The order is: [TOP, BOTTOM, FRONT, BACK, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The front face (facing positive Z)
    FRONT = 2,

    /// The back face (facing negative Z)
    BACK = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [TOP, BOTTOM, FRONT, BACK, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The unit vector pointing out of the block through this face.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Returns the face whose outward normal equals `normal`, if any.
    pub fn from_normal(normal: Vector3<i32>) -> Option<BlockSide> {
        BlockSide::all()
            .into_iter()
            .find(|side| side.normal() == normal)
    }

    /// Brightness multiplier applied to every vertex of this face.
    ///
    /// Top faces are fully lit, bottom faces darkest, and the four sides sit in between
    /// with the Z-facing pair slightly darker than the X-facing pair.
    pub fn tint(self) -> f32 {
        match self {
            BlockSide::TOP => 1.0,
            BlockSide::BOTTOM => 0.5,
            BlockSide::FRONT | BlockSide::BACK => 0.65,
            BlockSide::LEFT | BlockSide::RIGHT => 0.8,
        }
    }
}
