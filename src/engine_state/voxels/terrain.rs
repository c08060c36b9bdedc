//! # Terrain Synthesis
//!
//! Fills a chunk from the world seed and its coordinate alone, so any chunk can be
//! regenerated at any time and in any order. Neighboring chunks are never read.
//!
//! ## Algorithm
//!
//! For every column the generator samples two domain-warped height fields and a
//! masking field at the scaled world coordinate:
//!
//! * `height1 = combined1 * amplitude / 6 - 4`
//! * `height2 = combined2 * amplitude / 5 + 6`, replaced by `height1` wherever the
//!   mask exceeds `misc_threshold`
//! * `height = max(height1, height2) / 2`
//!
//! Cells at or below `height` become stone, everything above is air. A second pass
//! dresses the surface: on top of the highest stone cell of each column it stacks
//! `dirt_depth` dirt cells capped by one grass cell.

use cgmath::{Point2, Point3};
use fastrand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    block::block_type::BlockType,
    chunk::{Chunk, CHUNK_HEIGHT, CHUNK_WIDTH},
};
use crate::engine_state::noise::{CombinedNoise, Noise, OctaveNoise};

/// Octave count of the two height fields' sources.
pub const HEIGHT_OCTAVES: usize = 8;
/// Octave count of the masking field.
pub const MISC_OCTAVES: usize = 6;

/// Tunable constants of the terrain shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// World coordinates are multiplied by this before sampling noise
    pub noise_scale: f64,
    /// Range the normalized height noise is stretched to
    pub amplitude: f64,
    /// Mask value above which the second height field is suppressed
    pub misc_threshold: f64,
    /// Dirt cells stacked on the stone surface below the grass cap
    pub dirt_depth: u32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        TerrainSettings {
            noise_scale: 0.013,
            amplitude: 256.0,
            misc_threshold: 0.5,
            dirt_depth: 4,
        }
    }
}

/// Deterministic chunk synthesizer.
///
/// Shared read-only between generation workers.
pub struct TerrainGenerator {
    seed: u32,
    settings: TerrainSettings,
    height1: CombinedNoise,
    height2: CombinedNoise,
    misc: OctaveNoise,
}

impl TerrainGenerator {
    /// Builds the noise stack for a world seed.
    ///
    /// Three octave sources are seeded from one random stream: the first height
    /// field warps source 0 by source 1, the second warps source 1 by source 2.
    /// The masking field draws its seeds from the same stream afterwards.
    pub fn new(seed: u32, settings: TerrainSettings) -> Self {
        let mut rng = Rng::with_seed(seed as u64);
        let sources: Vec<Vec<u32>> = (0..3)
            .map(|_| (0..HEIGHT_OCTAVES).map(|_| rng.u32(..)).collect())
            .collect();
        let source = |i: usize| -> Box<dyn Noise> { Box::new(OctaveNoise::from_seeds(&sources[i])) };

        TerrainGenerator {
            seed,
            settings,
            height1: CombinedNoise::new(source(0), source(1)),
            height2: CombinedNoise::new(source(1), source(2)),
            misc: OctaveNoise::new(MISC_OCTAVES, &mut rng),
        }
    }

    /// The world seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The terrain constants in use.
    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    /// Computes the surface height of the world column at `(world_x, world_z)`.
    ///
    /// Cells with `y <= height` are solid.
    pub fn column_height(&self, world_x: i32, world_z: i32) -> f64 {
        let x = world_x as f64 * self.settings.noise_scale;
        let z = world_z as f64 * self.settings.noise_scale;
        let amplitude = self.settings.amplitude;

        let height1 = self.height1.compute(x, z) * amplitude / 6.0 - 4.0;
        let mut height2 = self.height2.compute(x, z) * amplitude / 5.0 + 6.0;
        if self.misc.compute(x, z) > self.settings.misc_threshold {
            height2 = height1;
        }

        height1.max(height2) / 2.0
    }

    /// Synthesizes the blocks of the chunk at `position`.
    ///
    /// # Returns
    /// A full block array in chunk index order, ready for
    /// [`Chunk::install_generated_blocks`].
    pub fn generate(&self, position: Point2<i32>) -> Box<[BlockType]> {
        let mut blocks = Chunk::empty_blocks();

        for z in 0..CHUNK_WIDTH {
            for x in 0..CHUNK_WIDTH {
                let height = self.column_height(
                    position.x * CHUNK_WIDTH + x,
                    position.y * CHUNK_WIDTH + z,
                );
                for y in 0..CHUNK_HEIGHT {
                    if y as f64 > height {
                        break;
                    }
                    if let Some(index) = Chunk::block_index(Point3::new(x, y, z)) {
                        blocks[index] = BlockType::STONE;
                    }
                }
            }
        }

        self.dress_surface(&mut blocks);
        blocks
    }

    /// Stacks dirt and a grass cap on every stone cell that has air above it.
    fn dress_surface(&self, blocks: &mut [BlockType]) {
        let get = |blocks: &[BlockType], local: Point3<i32>| {
            Chunk::block_index(local)
                .map(|index| blocks[index])
                .unwrap_or(BlockType::AIR)
        };
        let set = |blocks: &mut [BlockType], local: Point3<i32>, block: BlockType| {
            if let Some(index) = Chunk::block_index(local) {
                blocks[index] = block;
            }
        };

        for z in 0..CHUNK_WIDTH {
            for y in 0..CHUNK_HEIGHT {
                for x in 0..CHUNK_WIDTH {
                    let local = Point3::new(x, y, z);
                    let above = Point3::new(x, y + 1, z);
                    if get(blocks, local) != BlockType::STONE
                        || get(blocks, above) != BlockType::AIR
                    {
                        continue;
                    }

                    let depth = self.settings.dirt_depth as i32;
                    for offset in 1..=depth {
                        set(blocks, Point3::new(x, y + offset, z), BlockType::DIRT);
                    }
                    set(blocks, Point3::new(x, y + depth + 1, z), BlockType::GRASS);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_of_column(blocks: &[BlockType], x: i32, z: i32) -> Option<i32> {
        (0..CHUNK_HEIGHT).rev().find(|&y| {
            Chunk::block_index(Point3::new(x, y, z))
                .map(|index| blocks[index] != BlockType::AIR)
                .unwrap_or(false)
        })
    }

    fn block(blocks: &[BlockType], x: i32, y: i32, z: i32) -> BlockType {
        Chunk::block_index(Point3::new(x, y, z))
            .map(|index| blocks[index])
            .unwrap_or(BlockType::AIR)
    }

    #[test]
    fn same_seed_and_position_regenerate_identically() {
        let a = TerrainGenerator::new(1337, TerrainSettings::default());
        let b = TerrainGenerator::new(1337, TerrainSettings::default());
        let position = Point2::new(-3, 7);
        assert_eq!(a.generate(position), b.generate(position));
    }

    #[test]
    fn columns_are_stone_then_dirt_then_grass() {
        let generator = TerrainGenerator::new(1337, TerrainSettings::default());
        let blocks = generator.generate(Point2::new(0, 0));
        let depth = generator.settings().dirt_depth as i32;

        let mut dressed_columns = 0;
        for z in 0..CHUNK_WIDTH {
            for x in 0..CHUNK_WIDTH {
                let Some(top) = top_of_column(&blocks, x, z) else {
                    continue;
                };
                dressed_columns += 1;
                assert_eq!(block(&blocks, x, top, z), BlockType::GRASS);
                for y in (top - depth)..top {
                    assert_eq!(block(&blocks, x, y, z), BlockType::DIRT);
                }
                for y in 0..(top - depth) {
                    assert_eq!(block(&blocks, x, y, z), BlockType::STONE);
                }
            }
        }
        assert!(dressed_columns > 0);
    }

    #[test]
    fn stone_surface_follows_the_column_height() {
        let generator = TerrainGenerator::new(9, TerrainSettings::default());
        let blocks = generator.generate(Point2::new(2, -1));
        let depth = generator.settings().dirt_depth as i32;

        for (x, z) in [(0, 0), (7, 3), (15, 15)] {
            let height = generator.column_height(2 * CHUNK_WIDTH + x, -CHUNK_WIDTH + z);
            if height < 0.0 {
                assert_eq!(top_of_column(&blocks, x, z), None);
                continue;
            }
            let stone_top = height.floor() as i32;
            assert_eq!(top_of_column(&blocks, x, z), Some(stone_top + depth + 1));
        }
    }

    #[test]
    fn dirt_depth_is_configurable() {
        let settings = TerrainSettings {
            dirt_depth: 1,
            ..TerrainSettings::default()
        };
        let generator = TerrainGenerator::new(4, settings);
        let blocks = generator.generate(Point2::new(0, 0));
        let dirt = blocks.iter().filter(|&&b| b == BlockType::DIRT).count();
        let grass = blocks.iter().filter(|&&b| b == BlockType::GRASS).count();
        assert_eq!(dirt, grass);
    }
}
