//! # Ray Casting
//!
//! Grid traversal for block picking. The ray walks the voxel grid one cell at a time
//! (a 3-D DDA): on each step it advances along the axis whose next cell boundary is
//! closest, so it visits exactly the cells the ray passes through, in order.

use cgmath::{InnerSpace, Point3, Vector3};

use super::{block::block_type::BlockType, chunk::CHUNK_HEIGHT, world::World};

/// The first opaque block hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayHit {
    /// World coordinate of the hit block
    pub block: Point3<i32>,
    /// Outward normal of the face the ray entered through
    pub normal: Vector3<i32>,
    /// The block that was hit
    pub block_type: BlockType,
}

impl RayHit {
    /// The empty cell in front of the hit face, where a placed block goes.
    pub fn adjacent(&self) -> Point3<i32> {
        self.block + self.normal
    }
}

/// Parametric distance from `origin` to the first cell boundary along one axis.
fn initial_t_max(origin: f32, cell: i32, direction: f32) -> f32 {
    if direction > 0.0 {
        (cell as f32 + 1.0 - origin) / direction
    } else if direction < 0.0 {
        (cell as f32 - origin) / direction
    } else {
        f32::INFINITY
    }
}

/// Parametric distance between two cell boundaries along one axis.
fn t_delta(direction: f32) -> f32 {
    if direction == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / direction).abs()
    }
}

/// Whether the cell containing `coordinate` has an `i32` index.
fn fits_block_range(coordinate: f32) -> bool {
    let cell = coordinate.floor();
    cell >= i32::MIN as f32 && cell < i32::MAX as f32
}

fn step(direction: f32) -> i32 {
    if direction > 0.0 {
        1
    } else if direction < 0.0 {
        -1
    } else {
        0
    }
}

/// Casts a ray through the world and reports the first opaque block it enters.
///
/// The cell containing `origin` itself is never reported. X is only stepped when its
/// boundary is strictly closest; a tie between Y and Z steps Z. The walk stops early
/// once the ray is above or below the world and not heading back into it.
///
/// # Arguments
/// * `world` - The world to query
/// * `origin` - Start of the ray in world space
/// * `direction` - Direction of the ray; need not be normalized
/// * `max_distance` - Distance, in blocks, after which the ray gives up
///
/// # Returns
/// The hit, or `None` if nothing opaque lies within `max_distance`. A zero direction,
/// a non-finite `max_distance` and an origin outside the `i32` block range also give
/// `None`.
pub fn cast(
    world: &World,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> Option<RayHit> {
    let length = direction.magnitude();
    if length == 0.0 || !length.is_finite() || !max_distance.is_finite() {
        return None;
    }
    if ![origin.x, origin.y, origin.z].iter().all(|&c| fits_block_range(c)) {
        return None;
    }
    let direction = direction / length;

    let mut block = World::world_to_block(origin);
    let step = Vector3::new(step(direction.x), step(direction.y), step(direction.z));
    let delta = Vector3::new(t_delta(direction.x), t_delta(direction.y), t_delta(direction.z));
    let mut t_max = Vector3::new(
        initial_t_max(origin.x, block.x, direction.x),
        initial_t_max(origin.y, block.y, direction.y),
        initial_t_max(origin.z, block.z, direction.z),
    );

    loop {
        let axis = if t_max.x < t_max.y && t_max.x < t_max.z {
            0
        } else if t_max.y < t_max.z {
            1
        } else {
            2
        };

        block[axis] = block[axis].checked_add(step[axis])?;
        let traveled = t_max[axis];
        t_max[axis] += delta[axis];

        if traveled > max_distance {
            return None;
        }
        if (block.y < 0 && step.y <= 0) || (block.y >= CHUNK_HEIGHT && step.y >= 0) {
            return None;
        }

        let block_type = world.get_block(block);
        if block_type.is_opaque() {
            let mut normal = Vector3::new(0, 0, 0);
            normal[axis] = -step[axis];
            return Some(RayHit {
                block,
                normal,
                block_type,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point2;

    fn single_block_world(block: Point3<i32>) -> World {
        let mut world = World::new();
        world.add_chunk(Point2::new(0, 0));
        world.add_chunk(Point2::new(-1, 0));
        world.set_block(block, BlockType::STONE);
        world
    }

    #[test]
    fn straight_down_hits_the_top_face() {
        let world = single_block_world(Point3::new(0, 0, 0));
        let hit = cast(
            &world,
            Point3::new(0.5, 10.0, 0.5),
            Vector3::new(0.0, -1.0, 0.0),
            30.0,
        )
        .unwrap();

        assert_eq!(hit.block, Point3::new(0, 0, 0));
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
        assert_eq!(hit.block_type, BlockType::STONE);
        assert_eq!(hit.adjacent(), Point3::new(0, 1, 0));
    }

    #[test]
    fn rays_give_up_past_max_distance() {
        let world = single_block_world(Point3::new(0, 0, 0));
        let origin = Point3::new(0.5, 10.0, 0.5);
        let down = Vector3::new(0.0, -1.0, 0.0);
        assert!(cast(&world, origin, down, 5.0).is_none());
        assert!(cast(&world, origin, Vector3::new(0.0, 1.0, 0.0), 30.0).is_none());
        assert!(cast(&world, origin, Vector3::new(0.0, 0.0, 0.0), 30.0).is_none());
    }

    #[test]
    fn side_hits_report_the_entered_face() {
        let world = single_block_world(Point3::new(-3, 4, 2));
        let hit = cast(
            &world,
            Point3::new(5.5, 4.5, 2.5),
            Vector3::new(-1.0, 0.0, 0.0),
            30.0,
        )
        .unwrap();
        assert_eq!(hit.block, Point3::new(-3, 4, 2));
        assert_eq!(hit.normal, Vector3::new(1, 0, 0));
    }

    #[test]
    fn diagonal_rays_walk_every_crossed_cell() {
        let world = single_block_world(Point3::new(3, 3, 0));
        let hit = cast(
            &world,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(1.0, 1.0, 0.0),
            30.0,
        )
        .unwrap();
        assert_eq!(hit.block, Point3::new(3, 3, 0));
        // Exact corner crossings step along Y first, so the block is entered along X.
        assert_eq!(hit.normal, Vector3::new(-1, 0, 0));
    }

    #[test]
    fn unbounded_distances_are_rejected() {
        let world = single_block_world(Point3::new(0, 0, 0));
        let origin = Point3::new(0.5, 10.0, 0.5);
        let up = Vector3::new(0.0, 1.0, 0.0);
        assert!(cast(&world, origin, up, f32::INFINITY).is_none());
        assert!(cast(&world, origin, -up, f32::INFINITY).is_none());
        assert!(cast(&world, origin, -up, f32::NAN).is_none());
    }

    #[test]
    fn origins_beyond_the_block_range_do_not_overflow() {
        let world = single_block_world(Point3::new(0, 0, 0));
        let east = Vector3::new(1.0, 0.0, 0.0);
        assert!(cast(&world, Point3::new(3.0e9, 10.0, 0.5), east, 30.0).is_none());
        assert!(cast(&world, Point3::new(-3.0e9, 10.0, 0.5), -east, 30.0).is_none());
        assert!(cast(&world, Point3::new(f32::NAN, 10.0, 0.5), east, 30.0).is_none());

        // Largest cell below i32::MAX as f32; stepping past i32::MAX ends the walk.
        let edge = Point3::new(2_147_483_520.0, 10.0, 0.5);
        assert!(cast(&world, edge, east, 1000.0).is_none());
    }

    #[test]
    fn rays_leaving_the_world_vertically_stop() {
        let world = single_block_world(Point3::new(0, 0, 0));
        let up = Vector3::new(0.0, 1.0, 0.0);
        assert!(cast(&world, Point3::new(0.5, 250.5, 0.5), up, 1.0e6).is_none());
        assert!(cast(&world, Point3::new(0.5, -3.5, 0.5), -up, 1.0e6).is_none());
    }

    #[test]
    fn rays_from_above_the_world_still_reach_the_ground() {
        let world = single_block_world(Point3::new(0, 0, 0));
        let hit = cast(
            &world,
            Point3::new(0.5, 300.5, 0.5),
            Vector3::new(0.0, -1.0, 0.0),
            400.0,
        )
        .unwrap();
        assert_eq!(hit.block, Point3::new(0, 0, 0));
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
    }
}
