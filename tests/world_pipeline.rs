use cgmath::{Matrix4, Point2, Point3, Vector3};
use std::time::{Duration, Instant};

use voxel_engine_core::{
    config::WorldConfig,
    engine_state::{
        input::BlockEdit,
        rendering::{
            meshing::mesh::{culled, Mesh},
            tile_atlas::GridTileAtlas,
            Renderer,
        },
        scheduler::SchedulerConfig,
        voxels::{block::block_type::BlockType, chunk::CHUNK_HEIGHT, world::World},
    },
    EngineState,
};

fn engine(size: u32) -> EngineState {
    EngineState::new(WorldConfig {
        seed: 4242,
        size: Some(size),
        scheduler: SchedulerConfig {
            worker_threads: 2,
            tasks_per_worker: 2,
        },
        ..WorldConfig::default()
    })
}

fn settle(engine: &mut EngineState) {
    let deadline = Instant::now() + Duration::from_secs(120);
    loop {
        engine.tick();
        if engine.pending_chunks() == 0 && engine.scheduler().in_flight() == 0 {
            return;
        }
        assert!(Instant::now() < deadline, "world did not settle");
        std::thread::sleep(Duration::from_millis(1));
    }
}

fn top_block(world: &World, x: i32, z: i32) -> BlockType {
    (0..CHUNK_HEIGHT)
        .rev()
        .map(|y| world.get_block(Point3::new(x, y, z)))
        .find(|&block| block != BlockType::AIR)
        .unwrap_or(BlockType::AIR)
}

#[derive(Default)]
struct CountingRenderer {
    uploads: usize,
    draws: usize,
}

impl Renderer for CountingRenderer {
    fn upload(&mut self, _position: Point2<i32>, _mesh: &Mesh) {
        self.uploads += 1;
    }

    fn draw(&mut self, _position: Point2<i32>, _mesh: &Mesh, _transform: Matrix4<f32>) {
        self.draws += 1;
    }
}

#[test]
fn generated_terrain_is_capped_with_grass_and_drawn() {
    let mut engine = engine(1);
    settle(&mut engine);

    for z in 0..16 {
        for x in 0..16 {
            assert_eq!(top_block(engine.world(), x, z), BlockType::GRASS, "column ({}, {})", x, z);
        }
    }

    let mut renderer = CountingRenderer::default();
    let stats = engine.render(&mut renderer, Point3::new(8.0, 100.0, 8.0));
    assert_eq!(stats.uploaded, 1);
    assert_eq!(stats.drawn, 1);
    assert_eq!((renderer.uploads, renderer.draws), (1, 1));
}

#[test]
fn a_second_tick_does_not_regenerate() {
    let mut engine = engine(1);
    assert_eq!(engine.tick().generation_requests, 1);
    assert_eq!(engine.tick().generation_requests, 0);
    settle(&mut engine);
    assert_eq!(engine.tick().generation_requests, 0);
}

#[test]
fn same_seed_produces_the_same_world() {
    let mut first = engine(1);
    let mut second = engine(1);
    settle(&mut first);
    settle(&mut second);

    let chunk_a = first.world().get_chunk(Point2::new(0, 0)).unwrap();
    let chunk_b = second.world().get_chunk(Point2::new(0, 0)).unwrap();
    assert!(chunk_a.get().blocks() == chunk_b.get().blocks());
}

#[test]
fn loaded_neighbors_cull_border_faces() {
    let mut engine = engine(2);
    settle(&mut engine);

    let chunk = engine.world().get_chunk(Point2::new(0, 0)).unwrap();
    let chunk = chunk.get();
    let isolated = culled(&chunk, &Default::default(), &GridTileAtlas::default());
    assert!(chunk.mesh.face_count() < isolated.face_count());
}

#[test]
fn breaking_a_block_remeshes_its_chunk() {
    let mut engine = engine(1);
    settle(&mut engine);

    let mut renderer = CountingRenderer::default();
    engine.render(&mut renderer, Point3::new(8.0, 100.0, 8.0));

    let top = (0..CHUNK_HEIGHT)
        .rev()
        .find(|&y| engine.world().get_block(Point3::new(8, y, 8)) != BlockType::AIR)
        .unwrap();
    let origin = Point3::new(8.5, top as f32 + 2.5, 8.5);
    let hit = engine
        .edit_block(BlockEdit::Break, origin, Vector3::new(0.0, -1.0, 0.0))
        .unwrap();
    assert_eq!(hit.block, Point3::new(8, top, 8));
    assert_eq!(engine.pending_chunks(), 1);

    settle(&mut engine);
    let stats = engine.render(&mut renderer, Point3::new(8.0, 100.0, 8.0));
    assert_eq!(stats.uploaded, 1);
    assert_eq!(top_block(engine.world(), 8, 8), BlockType::DIRT);
}
