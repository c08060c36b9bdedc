//! Tile atlas lookup.
//!
//! The atlas is a single square texture subdivided into equally sized tiles and
//! addressed by tile id, row-major from the top-left corner. Loading the atlas image
//! and its metadata file belongs to the application; the core only needs the UV math.

use log::error;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::TileId;

/// Four texture coordinates of a tile, ordered
/// `[(u_min, v_max), (u_max, v_max), (u_max, v_min), (u_min, v_min)]`.
pub type TileUv = [[f32; 2]; 4];

/// Index into a [`TileUv`] of the `(u_min, v_max)` corner.
pub const UV_MIN_MAX: usize = 0;
/// Index into a [`TileUv`] of the `(u_max, v_max)` corner.
pub const UV_MAX_MAX: usize = 1;
/// Index into a [`TileUv`] of the `(u_max, v_min)` corner.
pub const UV_MAX_MIN: usize = 2;
/// Index into a [`TileUv`] of the `(u_min, v_min)` corner.
pub const UV_MIN_MIN: usize = 3;

/// Resolves a tile id to its rectangle inside the atlas texture.
///
/// Shared with meshing workers, hence the `Send + Sync` bound.
pub trait TileAtlas: Send + Sync {
    /// Returns the four texture coordinates of `tile_id`.
    fn uv_rect(&self, tile_id: TileId) -> TileUv;
}

/// Atlas metadata describing a square grid of square tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTileAtlas {
    /// Edge length of one tile, in pixels
    pub tile_size: u32,
    /// Edge length of the whole atlas, in pixels
    pub map_size: u32,
}

impl Default for GridTileAtlas {
    fn default() -> Self {
        GridTileAtlas {
            tile_size: 16,
            map_size: 256,
        }
    }
}

impl GridTileAtlas {
    /// Creates atlas metadata for a `map_size`² texture of `tile_size`² tiles.
    pub fn new(tile_size: u32, map_size: u32) -> Self {
        GridTileAtlas {
            tile_size,
            map_size,
        }
    }

    /// Number of tiles along one edge of the atlas.
    pub fn tiles_per_row(&self) -> u32 {
        if self.tile_size == 0 {
            return 0;
        }
        self.map_size / self.tile_size
    }

    /// Total number of addressable tiles.
    pub fn tile_count(&self) -> u32 {
        self.tiles_per_row() * self.tiles_per_row()
    }
}

impl TileAtlas for GridTileAtlas {
    /// Computes the UV rectangle of a tile, inset by one texel on every edge so
    /// filtering never samples the neighboring tile.
    ///
    /// Unknown tile ids are logged and resolve to an all-zero rectangle.
    fn uv_rect(&self, tile_id: TileId) -> TileUv {
        if tile_id >= self.tile_count() {
            error!(
                "Invalid tile ID {} for a {}px atlas of {}px tiles",
                tile_id, self.map_size, self.tile_size
            );
            return [[0.0; 2]; 4];
        }

        let tiles_per_row = self.tiles_per_row();
        let tile_span = 1.0 / tiles_per_row as f32;
        let pixel_size = 1.0 / self.map_size as f32;

        let column = (tile_id % tiles_per_row) as f32;
        let row = (tile_id / tiles_per_row) as f32;

        let u_min = column * tile_span + pixel_size;
        let v_min = row * tile_span + pixel_size;
        let u_max = (column + 1.0) * tile_span - pixel_size;
        let v_max = (row + 1.0) * tile_span - pixel_size;

        let mut uv = [[0.0; 2]; 4];
        uv[UV_MIN_MAX] = [u_min, v_max];
        uv[UV_MAX_MAX] = [u_max, v_max];
        uv[UV_MAX_MIN] = [u_max, v_min];
        uv[UV_MIN_MIN] = [u_min, v_min];
        uv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn first_tile_is_inset_by_one_texel() {
        let atlas = GridTileAtlas::new(16, 256);
        let uv = atlas.uv_rect(0);
        let texel = 1.0 / 256.0;

        assert!(approx(uv[UV_MIN_MIN][0], texel));
        assert!(approx(uv[UV_MIN_MIN][1], texel));
        assert!(approx(uv[UV_MAX_MAX][0], 1.0 / 16.0 - texel));
        assert!(approx(uv[UV_MAX_MAX][1], 1.0 / 16.0 - texel));
    }

    #[test]
    fn tiles_wrap_to_the_next_row() {
        let atlas = GridTileAtlas::new(16, 64);
        assert_eq!(atlas.tiles_per_row(), 4);

        // Tile 5 sits in column 1 of row 1.
        let uv = atlas.uv_rect(5);
        let texel = 1.0 / 64.0;
        assert!(approx(uv[UV_MIN_MIN][0], 0.25 + texel));
        assert!(approx(uv[UV_MIN_MIN][1], 0.25 + texel));
        assert!(approx(uv[UV_MAX_MAX][0], 0.5 - texel));
        assert!(approx(uv[UV_MAX_MAX][1], 0.5 - texel));
    }

    #[test]
    fn out_of_range_tile_resolves_to_zero() {
        let atlas = GridTileAtlas::new(16, 32);
        assert_eq!(atlas.uv_rect(4), [[0.0; 2]; 4]);
        assert_eq!(GridTileAtlas::new(0, 32).uv_rect(0), [[0.0; 2]; 4]);
    }
}
