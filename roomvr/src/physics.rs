//! Collision gate for player translation.

use cgmath::{EuclideanSpace, Point3, Vector3};
use collision::{Aabb3, Discrete, Sphere};

use crate::player_log;

/// Radius of the sphere standing in for the player's body.
pub const PLAYER_RADIUS: f32 = 0.25;

/// A static volume the player can never occupy.
#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    /// Precomputed world-space bound.
    pub bounds: Aabb3<f32>,
}

impl Obstacle {
    pub fn from_bounds(min: Point3<f32>, max: Point3<f32>) -> Obstacle {
        Obstacle {
            bounds: Aabb3::new(min, max),
        }
    }

    pub fn from_center_half_extents(center: Vector3<f32>, half: Vector3<f32>) -> Obstacle {
        Obstacle {
            bounds: Aabb3::new(
                Point3::from_vec(center - half),
                Point3::from_vec(center + half),
            ),
        }
    }
}

/// All-or-nothing move gate. Any overlap between the player sphere at the
/// proposed position and an obstacle bound rejects the whole move and
/// keeps the current position; there is no sliding and no correction.
pub fn try_move(
    current: Vector3<f32>,
    proposed: Vector3<f32>,
    obstacles: &[Obstacle],
) -> Vector3<f32> {
    let body = Sphere {
        center: Point3::from_vec(proposed),
        radius: PLAYER_RADIUS,
    };

    for obstacle in obstacles {
        if body.intersects(&obstacle.bounds) {
            player_log!(trace, "move to {:?} blocked by {:?}", proposed, obstacle.bounds);
            return current;
        }
    }
    proposed
}
