//! Controller ray casting against the interactable surfaces of the room.

use cgmath::{EuclideanSpace, InnerSpace, Point3};
use collision::{Aabb3, Continuous, Ray3};
use ordered_float::OrderedFloat;

use crate::effect::Effect;
use crate::input_context::Pose;
use crate::input_log;
use crate::media::MediaKey;

/// What activating a surface does to the media resource behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenAction {
    Play,
    Stop,
}

/// A targetable surface. A panel is a compound shape, so it carries one
/// world-space volume per part; all parts share the index and action tag.
#[derive(Clone, Debug)]
pub struct Interactable {
    pub index: u32,
    pub action: ScreenAction,
    pub volumes: Vec<Aabb3<f32>>,
}

impl Interactable {
    pub fn new(index: u32, action: ScreenAction, volumes: Vec<Aabb3<f32>>) -> Interactable {
        Interactable {
            index,
            action,
            volumes,
        }
    }
}

/// One ray intersection, tagged with the surface it struck.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub point: Point3<f32>,
    pub distance: f32,
    pub index: u32,
    pub action: ScreenAction,
}

/// Every intersection of the controller's forward ray with the
/// interactable set, sorted by distance ascending.
pub fn resolve_all(pose: &Pose, interactables: &[Interactable]) -> Vec<RayHit> {
    let origin = Point3::from_vec(pose.position);
    let direction = pose.forward().normalize();
    let ray = Ray3::new(origin, direction);

    let mut hits = Vec::new();
    for interactable in interactables {
        for volume in &interactable.volumes {
            if let Some(point) = volume.intersection(&ray) {
                hits.push(RayHit {
                    point,
                    distance: (point - origin).magnitude(),
                    index: interactable.index,
                    action: interactable.action,
                });
            }
        }
    }
    hits.sort_by_key(|hit| OrderedFloat(hit.distance));
    hits
}

/// Nearest intersection, if any. Drives the pointer visual.
pub fn resolve(pose: &Pose, interactables: &[Interactable]) -> Option<RayHit> {
    resolve_all(pose, interactables).into_iter().next()
}

/// Select-press handling: re-resolve and act on the first hit in distance
/// order. Every surface carries a playback tag, so the nearest hit always
/// qualifies; exactly one effect per press, later hits are ignored.
pub fn handle_select_start(pose: &Pose, interactables: &[Interactable]) -> Effect {
    match resolve_all(pose, interactables).first() {
        Some(hit) => {
            input_log!(
                debug,
                "select hit surface {} ({:?}) at {:.2}m",
                hit.index,
                hit.action,
                hit.distance
            );
            let key = MediaKey(hit.index);
            match hit.action {
                ScreenAction::Play => Effect::PlayMedia { key },
                ScreenAction::Stop => Effect::PauseMedia { key },
            }
        }
        None => Effect::NoEffect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{One, Quaternion, vec3};

    fn facing_minus_z(position: cgmath::Vector3<f32>) -> Pose {
        Pose {
            position,
            rotation: Quaternion::one(),
        }
    }

    fn slab(index: u32, action: ScreenAction, z: f32) -> Interactable {
        Interactable::new(
            index,
            action,
            vec![Aabb3::new(
                Point3::new(-1.0, -1.0, z - 0.05),
                Point3::new(1.0, 1.0, z + 0.05),
            )],
        )
    }

    #[test]
    fn misses_return_nothing() {
        let pose = facing_minus_z(vec3(0.0, 0.0, 0.0));
        let panels = vec![slab(1, ScreenAction::Play, 5.0)];

        assert!(resolve(&pose, &panels).is_none());
        assert_eq!(handle_select_start(&pose, &panels), Effect::NoEffect);
    }

    #[test]
    fn nearest_hit_wins() {
        let pose = facing_minus_z(vec3(0.0, 0.0, 0.0));
        let panels = vec![
            slab(1, ScreenAction::Play, -8.0),
            slab(2, ScreenAction::Stop, -3.0),
        ];

        let hit = resolve(&pose, &panels).unwrap();
        assert_eq!(hit.index, 2);
        assert!((hit.distance - 2.95).abs() < 1e-5);
    }

    #[test]
    fn compound_volumes_share_their_tag() {
        let pose = facing_minus_z(vec3(0.0, 0.0, 0.0));
        let panel = Interactable::new(
            4,
            ScreenAction::Play,
            vec![
                // Bezel ahead of the plate; both belong to surface 4
                Aabb3::new(Point3::new(-1.2, -1.2, -6.2), Point3::new(1.2, 1.2, -6.1)),
                Aabb3::new(Point3::new(-1.0, -1.0, -6.0), Point3::new(1.0, 1.0, -5.9)),
            ],
        );

        let hits = resolve_all(&pose, &[panel]);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 4);
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn one_press_dispatches_one_effect() {
        let pose = facing_minus_z(vec3(0.0, 0.0, 0.0));
        // Two overlapping surfaces: the nearer one's tag decides
        let panels = vec![
            slab(3, ScreenAction::Play, -4.0),
            slab(5, ScreenAction::Stop, -4.5),
        ];

        assert_eq!(
            handle_select_start(&pose, &panels),
            Effect::PlayMedia { key: MediaKey(3) }
        );
    }

    #[test]
    fn ray_follows_controller_rotation() {
        use cgmath::{Deg, Rotation3};
        // Rotated 90 degrees left: forward becomes -X
        let pose = Pose {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::from_angle_y(Deg(90.0)),
        };
        let panel = Interactable::new(
            1,
            ScreenAction::Play,
            vec![Aabb3::new(
                Point3::new(-4.1, -1.0, -1.0),
                Point3::new(-3.9, 1.0, 1.0),
            )],
        );

        let hit = resolve(&pose, &[panel]).unwrap();
        assert!((hit.distance - 3.9).abs() < 1e-4);
    }
}
