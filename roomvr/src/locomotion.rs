//! Smooth locomotion: left stick translates, right stick turns.

use cgmath::{InnerSpace, Quaternion, Rad, Rotation3, Vector2, Vector3, Zero, vec3};

/// Tuning for smooth locomotion.
#[derive(Clone, Copy, Debug)]
pub struct LocomotionConfig {
    /// Translation speed, world units per second.
    pub move_speed: f32,
    /// Yaw speed, radians per second.
    pub rotate_speed: f32,
    /// Axis magnitudes at or below this contribute nothing.
    pub dead_zone: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        LocomotionConfig {
            move_speed: 1.5,
            rotate_speed: 1.2,
            dead_zone: 0.2,
        }
    }
}

/// Position and yaw of the locomoting viewer. The single source of truth
/// for where the player is; translation lands here only after the
/// collision gate accepts it.
#[derive(Clone, Copy, Debug)]
pub struct PlayerTransform {
    pub position: Vector3<f32>,
    pub yaw: Rad<f32>,
}

impl PlayerTransform {
    pub fn at(position: Vector3<f32>) -> PlayerTransform {
        PlayerTransform {
            position,
            yaw: Rad(0.0),
        }
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        Quaternion::from_angle_y(self.yaw)
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.rotation() * vec3(0.0, 0.0, -1.0)
    }
}

/// Translation and yaw change proposed for one frame, before gating.
#[derive(Clone, Copy, Debug)]
pub struct ProposedMove {
    pub translation: Vector3<f32>,
    pub yaw_delta: Rad<f32>,
}

/// Turn this frame's stick samples into a proposed move.
///
/// Left stick: vertical axis walks along the flattened viewer forward,
/// horizontal axis strafes along the right-hand vector. Right stick:
/// horizontal axis yaws. Translation and rotation are independent; both
/// may apply in the same step. Either stick may be absent.
pub fn step(
    config: &LocomotionConfig,
    delta: f32,
    left_stick: Option<Vector2<f32>>,
    right_stick: Option<Vector2<f32>>,
    viewer_forward: Vector3<f32>,
) -> ProposedMove {
    let mut translation = Vector3::zero();
    let mut yaw_delta = Rad(0.0);

    if let (Some(stick), Some(forward)) = (left_stick, flatten(viewer_forward)) {
        // Pushing the stick forward reports a negative axis value
        if stick.y.abs() > config.dead_zone {
            translation += forward * (-stick.y * config.move_speed * delta);
        }
        if stick.x.abs() > config.dead_zone {
            let right = forward.cross(Vector3::unit_y()).normalize();
            translation += right * (stick.x * config.move_speed * delta);
        }
    }

    if let Some(stick) = right_stick {
        if stick.x.abs() > config.dead_zone {
            yaw_delta = Rad(-stick.x * config.rotate_speed * delta);
        }
    }

    ProposedMove {
        translation,
        yaw_delta,
    }
}

/// Project onto the ground plane and normalize; `None` when the viewer
/// looks straight up or down and no walk direction exists.
fn flatten(forward: Vector3<f32>) -> Option<Vector3<f32>> {
    let flat = vec3(forward.x, 0.0, forward.z);
    if flat.magnitude2() <= 1e-8 {
        None
    } else {
        Some(flat.normalize())
    }
}
