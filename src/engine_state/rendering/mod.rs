//! Rendering side of the voxel engine.
//!
//! This module turns chunks into drawable geometry and hands it to a graphics backend.
//! The backend itself lives outside the core and is reached through the [`Renderer`]
//! trait: the core decides *what* to upload and draw, the backend decides *how*.
//!
//! Per frame, [`WorldRenderer::render`] uploads every mesh that was rebuilt since the
//! last frame and then draws the chunks within the configured draw distance.

use cgmath::{InnerSpace, Matrix4, Point2, Point3, Vector3};
use log::debug;

use super::voxels::{
    chunk::{CHUNK_HEIGHT, CHUNK_WIDTH},
    world::World,
};
use meshing::mesh::{Mesh, MeshState};

pub mod meshing;
pub mod tasks;
pub mod tile_atlas;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;

/// A graphics backend able to hold chunk meshes and draw them.
///
/// Chunk positions identify the GPU-side buffers; a backend keeps at most one buffer
/// set per chunk.
pub trait Renderer {
    /// Pushes a chunk's geometry to the GPU, replacing whatever was stored for it.
    ///
    /// Called again with new data every time the chunk is remeshed.
    fn upload(&mut self, position: Point2<i32>, mesh: &Mesh);

    /// Draws a previously uploaded chunk.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinate
    /// * `mesh` - The geometry that was uploaded for it
    /// * `transform` - Model matrix moving chunk-local vertices into world space
    fn draw(&mut self, position: Point2<i32>, mesh: &Mesh, transform: Matrix4<f32>);
}

/// What a frame did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Meshes pushed to the backend this frame
    pub uploaded: usize,
    /// Chunks drawn this frame
    pub drawn: usize,
}

/// Feeds the chunks of a world to a [`Renderer`].
#[derive(Clone, Copy, Debug)]
pub struct WorldRenderer {
    draw_distance: u32,
}

impl WorldRenderer {
    /// Creates a world renderer.
    ///
    /// # Arguments
    /// * `draw_distance` - Radius, in chunk widths, beyond which chunks are skipped
    pub fn new(draw_distance: u32) -> Self {
        WorldRenderer { draw_distance }
    }

    /// Radius in chunk widths.
    pub fn draw_distance(&self) -> u32 {
        self.draw_distance
    }

    /// Uploads rebuilt meshes and draws the chunks around `camera`.
    ///
    /// Empty meshes are uploaded, so the backend drops stale geometry of a chunk
    /// whose last block was removed, but they are never drawn.
    pub fn render(&self, world: &World, renderer: &mut dyn Renderer, camera: Point3<f32>) -> RenderStats {
        let mut stats = RenderStats::default();
        let max_distance = (self.draw_distance as i32 * CHUNK_WIDTH) as f32;

        for (&position, chunk) in world.chunks() {
            {
                let mut chunk = chunk.get_mut();
                if chunk.mesh.state == MeshState::ReadyToUpload {
                    renderer.upload(position, &chunk.mesh);
                    chunk.mesh.state = MeshState::Uploaded;
                    stats.uploaded += 1;
                }
            }

            let chunk = chunk.get();
            if chunk.mesh.state != MeshState::Uploaded || chunk.mesh.is_empty() {
                continue;
            }
            if distance_to_chunk(camera, position) >= max_distance {
                continue;
            }
            renderer.draw(position, &chunk.mesh, chunk_transform(position));
            stats.drawn += 1;
        }

        if stats.uploaded > 0 {
            debug!("Uploaded {} chunk meshes", stats.uploaded);
        }
        stats
    }
}

/// Model matrix of the chunk at `position`.
pub fn chunk_transform(position: Point2<i32>) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(
        (position.x * CHUNK_WIDTH) as f32,
        0.0,
        (position.y * CHUNK_WIDTH) as f32,
    ))
}

/// Distance from `camera` to the closest point of the chunk's bounding box.
fn distance_to_chunk(camera: Point3<f32>, position: Point2<i32>) -> f32 {
    let min_x = (position.x * CHUNK_WIDTH) as f32;
    let min_z = (position.y * CHUNK_WIDTH) as f32;
    let width = CHUNK_WIDTH as f32;

    let closest = Point3::new(
        camera.x.clamp(min_x, min_x + width),
        camera.y.clamp(0.0, CHUNK_HEIGHT as f32),
        camera.z.clamp(min_z, min_z + width),
    );
    (closest - camera).magnitude()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{block::block_type::BlockType, chunk::Chunk};
    use cgmath::{SquareMatrix, Vector4};

    #[derive(Default)]
    struct RecordingRenderer {
        uploads: Vec<Point2<i32>>,
        draws: Vec<(Point2<i32>, Matrix4<f32>)>,
    }

    impl Renderer for RecordingRenderer {
        fn upload(&mut self, position: Point2<i32>, _mesh: &Mesh) {
            self.uploads.push(position);
        }

        fn draw(&mut self, position: Point2<i32>, _mesh: &Mesh, transform: Matrix4<f32>) {
            self.draws.push((position, transform));
        }
    }

    fn meshed_world(positions: &[Point2<i32>]) -> World {
        let mut world = World::new();
        for &position in positions {
            let chunk = world.add_chunk(position).unwrap();
            let mut chunk = chunk.get_mut();
            let mut blocks = Chunk::empty_blocks();
            blocks[0] = BlockType::STONE;
            chunk.install_generated_blocks(blocks);
            let revision = chunk.revision();
            let mesh = meshing::mesh::culled(&chunk, &Default::default(), &tile_atlas::GridTileAtlas::default());
            chunk.install_mesh(mesh, revision);
        }
        world
    }

    #[test]
    fn rebuilt_meshes_upload_exactly_once() {
        let world = meshed_world(&[Point2::new(0, 0), Point2::new(1, 0)]);
        let renderer = WorldRenderer::new(6);
        let mut backend = RecordingRenderer::default();

        let first = renderer.render(&world, &mut backend, Point3::new(8.0, 64.0, 8.0));
        assert_eq!(first, RenderStats { uploaded: 2, drawn: 2 });

        let second = renderer.render(&world, &mut backend, Point3::new(8.0, 64.0, 8.0));
        assert_eq!(second, RenderStats { uploaded: 0, drawn: 2 });
        assert_eq!(backend.uploads.len(), 2);

        let chunk = world.get_chunk(Point2::new(0, 0)).unwrap();
        assert_eq!(chunk.get().mesh.state, MeshState::Uploaded);
    }

    #[test]
    fn far_chunks_are_skipped() {
        let world = meshed_world(&[Point2::new(0, 0), Point2::new(3, 0)]);
        let renderer = WorldRenderer::new(2);
        let mut backend = RecordingRenderer::default();

        let stats = renderer.render(&world, &mut backend, Point3::new(8.0, 64.0, 8.0));
        assert_eq!(stats.uploaded, 2);
        assert_eq!(stats.drawn, 1);
        assert_eq!(backend.draws[0].0, Point2::new(0, 0));
    }

    #[test]
    fn camera_inside_a_chunk_is_at_distance_zero() {
        assert_eq!(distance_to_chunk(Point3::new(4.0, 10.0, 4.0), Point2::new(0, 0)), 0.0);
        assert_eq!(distance_to_chunk(Point3::new(-3.0, 10.0, 4.0), Point2::new(0, 0)), 3.0);
        assert_eq!(distance_to_chunk(Point3::new(4.0, 260.0, 4.0), Point2::new(0, 0)), 4.0);
    }

    #[test]
    fn transforms_translate_by_chunk_width() {
        let transform = chunk_transform(Point2::new(2, -1));
        let origin = transform * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin, Vector4::new(32.0, 0.0, -16.0, 1.0));
        assert_eq!(chunk_transform(Point2::new(0, 0)), Matrix4::identity());
    }

    #[test]
    fn empty_meshes_are_uploaded_but_not_drawn() {
        let mut world = World::new();
        let chunk = world.add_chunk(Point2::new(0, 0)).unwrap();
        {
            let mut chunk = chunk.get_mut();
            chunk.install_generated_blocks(Chunk::empty_blocks());
            let revision = chunk.revision();
            chunk.install_mesh(Mesh::new(), revision);
        }

        let mut backend = RecordingRenderer::default();
        let stats = WorldRenderer::new(6).render(&world, &mut backend, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(stats, RenderStats { uploaded: 1, drawn: 0 });
    }
}
