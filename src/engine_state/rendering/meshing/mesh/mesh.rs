//! Mesh data structures for voxel rendering.
//!
//! This module provides the vertex/index container produced for each chunk and the
//! upload state machine shared between the meshing workers and the renderer.

use super::face::Face;
use crate::engine_state::rendering::{tile_atlas::TileAtlas, Vertex};

/// Upload lifecycle of a chunk mesh.
///
/// `Uninitialized → ReadyToUpload → Uploaded`, and back to `ReadyToUpload`
/// every time a rebuilt mesh replaces the previous one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MeshState {
    /// No geometry has been built yet.
    #[default]
    Uninitialized,
    /// Geometry was rebuilt and the renderer has not consumed it yet.
    ReadyToUpload,
    /// The renderer holds the current geometry.
    Uploaded,
}

/// A chunk's renderable geometry.
///
/// Vertices are in chunk-local space; every visible face contributes four vertices
/// and six indices (two triangles sharing the diagonal).
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    /// The vertex data of every visible face
    pub vertices: Vec<Vertex>,
    /// Triangle list indexing into `vertices`
    pub indices: Vec<u32>,
    /// Upload state
    pub state: MeshState,
}

impl Mesh {
    /// Creates a new, empty mesh in the `Uninitialized` state.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Appends one face: its four corner vertices and the six indices forming
    /// two triangles.
    pub fn add_face(&mut self, face: &Face, atlas: &dyn TileAtlas) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices(atlas));
        self.indices.extend(Self::generate_face_indices(base));
    }

    /// Generates index data for a face whose first vertex sits at `base`.
    ///
    /// # Returns
    /// Six indices forming the triangles `0-1-2` and `2-3-0` of the face.
    pub fn generate_face_indices(base: u32) -> [u32; 6] {
        [base, base + 1, base + 2, base + 2, base + 3, base]
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Whether the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
