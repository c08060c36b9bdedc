//! Mesh generation for voxel rendering.
//!
//! This module converts chunk block data into renderable triangle meshes.
//!
//! # Architecture
//! - [`Mesh`]: Vertex and index data of one chunk plus its upload state
//! - [`Face`]: A single visible block face and its four vertices
//! - [`culled`]: The face-culling builder that walks a chunk and emits visible faces

mod culled;
mod face;
mod mesh;

pub use culled::culled;
pub use face::Face;
pub use mesh::*;
