//! Pointer feedback: the laser line and the pulsing ring indicator.

use cgmath::{EuclideanSpace, InnerSpace, Matrix3, One, Point3, Quaternion, Vector3, vec3};

use crate::input_context::Pose;
use crate::interaction::RayHit;

/// Colors and dimensions of the pointer affordance.
#[derive(Clone, Copy, Debug)]
pub struct PointerStyle {
    /// Laser color while nothing is targeted.
    pub neutral_ray_color: Vector3<f32>,
    /// Laser color while a surface is targeted.
    pub targeting_ray_color: Vector3<f32>,
    pub indicator_color: Vector3<f32>,
    /// Laser length while nothing is targeted, in world units.
    pub default_ray_length: f32,
    /// How far the indicator floats off the surface, back toward the hand.
    pub surface_offset: f32,
    pub indicator_inner_radius: f32,
    pub indicator_outer_radius: f32,
}

impl Default for PointerStyle {
    fn default() -> Self {
        Self {
            neutral_ray_color: vec3(1.0, 0.0, 0.0),
            targeting_ray_color: vec3(0.0, 1.0, 0.0),
            indicator_color: vec3(0.0, 0.0, 1.0),
            default_ray_length: 10.0,
            surface_offset: 0.01,
            indicator_inner_radius: 0.01,
            indicator_outer_radius: 0.013,
        }
    }
}

/// Ring marker at the hit point.
#[derive(Clone, Copy, Debug)]
pub struct IndicatorState {
    pub visible: bool,
    pub position: Point3<f32>,
    pub rotation: Quaternion<f32>,
    /// Uniform scale, driven by the pulse animation.
    pub scale: f32,
}

/// Everything a renderer needs to draw one controller's pointer.
/// Recomputed from scratch every frame; never partially updated.
#[derive(Clone, Copy, Debug)]
pub struct PointerVisual {
    pub ray_length: f32,
    pub ray_color: Vector3<f32>,
    pub indicator: IndicatorState,
}

impl PointerVisual {
    /// The resting state: full-length neutral laser, hidden indicator.
    pub fn neutral(style: &PointerStyle) -> PointerVisual {
        PointerVisual {
            ray_length: style.default_ray_length,
            ray_color: style.neutral_ray_color,
            indicator: IndicatorState {
                visible: false,
                position: Point3::origin(),
                rotation: Quaternion::one(),
                scale: 1.0,
            },
        }
    }
}

/// Recompute one controller's pointer visual from this frame's resolver
/// result. With a hit the laser shortens to the hit distance and the
/// indicator lands just off the surface, facing the viewer; without one
/// the laser resets and the indicator hides.
pub fn update(
    pose: &Pose,
    hit: Option<&RayHit>,
    viewer_position: Point3<f32>,
    pulse_scale: f32,
    style: &PointerStyle,
) -> PointerVisual {
    let mut visual = PointerVisual::neutral(style);
    visual.indicator.scale = pulse_scale;

    if let Some(hit) = hit {
        visual.ray_length = hit.distance;
        visual.ray_color = style.targeting_ray_color;

        let toward_surface = (hit.point - Point3::from_vec(pose.position)).normalize();
        visual.indicator.position = hit.point - toward_surface * style.surface_offset;
        visual.indicator.rotation = face_towards(visual.indicator.position, viewer_position);
        visual.indicator.visible = true;
    }

    visual
}

/// Rotation that points an object's local +Z at `target`.
fn face_towards(from: Point3<f32>, target: Point3<f32>) -> Quaternion<f32> {
    let z = target - from;
    if z.magnitude2() <= f32::EPSILON {
        return Quaternion::one();
    }
    let z = z.normalize();
    let x = Vector3::unit_y().cross(z);
    // Degenerate when looking straight up or down
    let x = if x.magnitude2() <= 1e-8 {
        Vector3::unit_x()
    } else {
        x.normalize()
    };
    let y = z.cross(x);
    Quaternion::from(Matrix3::from_cols(x, y, z))
}
