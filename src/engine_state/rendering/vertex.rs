//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format emitted by the mesh builder. The layout is
//! plain-old-data so a renderer can upload a mesh's vertex slice as raw bytes.

use cgmath::Point3;

/// A vertex in the voxel rendering pipeline.
///
/// Represents a single corner of a block face in chunk-local space with its atlas
/// texture coordinates and a shading tint.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Tint: 3x f32 (12 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the owning chunk's origin
    pub position: [f32; 3],
    /// UV texture coordinates inside the atlas (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Per-channel brightness multiplier
    pub tint: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex with a uniform grey tint.
    ///
    /// # Arguments
    /// * `pos` - The chunk-local position of the vertex
    /// * `tex_coords` - Atlas texture coordinates
    /// * `tint` - Brightness applied equally to all three channels
    pub fn new(pos: Point3<f32>, tex_coords: [f32; 2], tint: f32) -> Self {
        Vertex {
            position: [pos.x, pos.y, pos.z],
            tex_coords,
            tint: [tint; 3],
        }
    }

    /// Returns the vertex data as raw bytes for upload.
    pub fn slice_as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}
