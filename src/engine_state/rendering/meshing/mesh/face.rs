use cgmath::{Point3, Vector3};

use crate::engine_state::{
    rendering::{
        tile_atlas::{TileAtlas, UV_MAX_MAX, UV_MAX_MIN, UV_MIN_MAX, UV_MIN_MIN},
        Vertex,
    },
    voxels::block::{block_side::BlockSide, block_type::BlockType},
};

/// Corner offsets of one face, relative to the block's minimum corner, paired with
/// the atlas UV corner each of them samples. The four corners wind so that the
/// triangles `0-1-2` and `2-3-0` face outward.
type FaceTemplate = [([f32; 3], usize); 4];

/// Vertex templates indexed by `BlockSide`.
const FACE_TEMPLATES: [FaceTemplate; 6] = [
    // TOP
    [
        ([1.0, 1.0, 1.0], UV_MAX_MAX),
        ([1.0, 1.0, 0.0], UV_MAX_MIN),
        ([0.0, 1.0, 0.0], UV_MIN_MIN),
        ([0.0, 1.0, 1.0], UV_MIN_MAX),
    ],
    // BOTTOM
    [
        ([0.0, 0.0, 1.0], UV_MIN_MAX),
        ([0.0, 0.0, 0.0], UV_MIN_MIN),
        ([1.0, 0.0, 0.0], UV_MAX_MIN),
        ([1.0, 0.0, 1.0], UV_MAX_MAX),
    ],
    // FRONT
    [
        ([1.0, 0.0, 1.0], UV_MAX_MAX),
        ([1.0, 1.0, 1.0], UV_MAX_MIN),
        ([0.0, 1.0, 1.0], UV_MIN_MIN),
        ([0.0, 0.0, 1.0], UV_MIN_MAX),
    ],
    // BACK
    [
        ([0.0, 0.0, 0.0], UV_MIN_MAX),
        ([0.0, 1.0, 0.0], UV_MIN_MIN),
        ([1.0, 1.0, 0.0], UV_MAX_MIN),
        ([1.0, 0.0, 0.0], UV_MAX_MAX),
    ],
    // LEFT
    [
        ([0.0, 0.0, 1.0], UV_MIN_MAX),
        ([0.0, 1.0, 1.0], UV_MIN_MIN),
        ([0.0, 1.0, 0.0], UV_MAX_MIN),
        ([0.0, 0.0, 0.0], UV_MAX_MAX),
    ],
    // RIGHT
    [
        ([1.0, 0.0, 0.0], UV_MIN_MAX),
        ([1.0, 1.0, 0.0], UV_MIN_MIN),
        ([1.0, 1.0, 1.0], UV_MAX_MIN),
        ([1.0, 0.0, 1.0], UV_MAX_MAX),
    ],
];

/// Represents a single visible quad face of a voxel in the mesh.
///
/// A face is identified by the chunk-local position of its block, the block type
/// (which selects the atlas tile) and the side of the block it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Minimum corner of the block in chunk coordinates
    pub position: Point3<i32>,
    /// The block type, used for tile lookup
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for a voxel at the given chunk-local coordinates.
    pub fn new(position: Point3<i32>, block_type: BlockType, block_side: BlockSide) -> Self {
        Face {
            position,
            block_type,
            block_side,
        }
    }

    /// Generates the four corner vertices of this face.
    ///
    /// Each corner gets one corner of the tile's UV rectangle and the side's
    /// directional tint.
    ///
    /// # Arguments
    /// * `atlas` - Resolves the face's tile id to atlas coordinates
    pub fn vertices(&self, atlas: &dyn TileAtlas) -> [Vertex; 4] {
        let uv = atlas.uv_rect(self.block_type.tile_for_side(self.block_side));
        let tint = self.block_side.tint();
        let origin = self.position.cast::<f32>().unwrap_or(Point3::new(0.0, 0.0, 0.0));

        FACE_TEMPLATES[self.block_side as usize]
            .map(|(offset, uv_corner)| Vertex::new(origin + Vector3::from(offset), uv[uv_corner], tint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::tile_atlas::GridTileAtlas;
    use cgmath::InnerSpace;

    fn to_vector(vertex: &Vertex) -> Vector3<f32> {
        Vector3::from(vertex.position)
    }

    #[test]
    fn faces_wind_outward_and_lie_on_their_side() {
        let atlas = GridTileAtlas::default();
        for side in BlockSide::all() {
            let face = Face::new(Point3::new(2, 3, 4), BlockType::STONE, side);
            let vertices = face.vertices(&atlas);

            let a = to_vector(&vertices[0]);
            let b = to_vector(&vertices[1]);
            let c = to_vector(&vertices[2]);
            let winding = (b - a).cross(c - a).normalize();
            let normal = side.normal().cast::<f32>().unwrap();
            assert!(
                (winding - normal).magnitude() < 1e-5,
                "{:?} winds towards {:?}",
                side,
                winding
            );

            for vertex in &vertices {
                assert_eq!(vertex.tint, [side.tint(); 3]);
                let local = to_vector(vertex) - Vector3::new(2.0, 3.0, 4.0);
                for axis in 0..3 {
                    assert!(local[axis] == 0.0 || local[axis] == 1.0);
                }
            }
        }
    }

    #[test]
    fn every_uv_corner_is_used_once() {
        let atlas = GridTileAtlas::default();
        let face = Face::new(Point3::new(0, 0, 0), BlockType::GRASS, BlockSide::TOP);
        let vertices = face.vertices(&atlas);
        let uv = atlas.uv_rect(BlockType::GRASS.tile_for_side(BlockSide::TOP));

        for corner in uv {
            assert_eq!(
                vertices.iter().filter(|v| v.tex_coords == corner).count(),
                1
            );
        }
    }
}
