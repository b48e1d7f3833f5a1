//! Scene assembly: turns the declarative screen layout into the immutable
//! interactable and obstacle registries the frame loop reads.
//!
//! Assembly is a distinct phase. Nothing here runs once the frame loop
//! starts, and the built [`RoomRegistry`] is never mutated afterwards.

pub mod screen_data;

pub use screen_data::{ScreenDef, load_screens, stock_screens};

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3, vec3};
use collision::Aabb3;

use crate::interaction::{Interactable, ScreenAction};
use crate::physics::Obstacle;
use crate::room_log;

/// Physical size of a wall screen, world units.
pub const SCREEN_WIDTH: f32 = 2.5;
pub const SCREEN_HEIGHT: f32 = 1.8;
const SCREEN_DEPTH: f32 = 0.04;

/// How far the terminal pedestal stands out from its screen.
const TERMINAL_STANDOFF: f32 = 0.43;
const TERMINAL_BUTTON_HEIGHT: f32 = 0.9;
const TERMINAL_BUTTON_SPACING: f32 = 0.08;
const TERMINAL_BUTTON_HALF: f32 = 0.05;

/// Immutable product of the assembly phase.
pub struct RoomRegistry {
    interactables: Vec<Interactable>,
    obstacles: Vec<Obstacle>,
}

impl RoomRegistry {
    pub fn interactables(&self) -> &[Interactable] {
        &self.interactables
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

/// Accumulates surfaces and volumes during assembly, then freezes them.
#[derive(Default)]
pub struct RoomBuilder {
    interactables: Vec<Interactable>,
    obstacles: Vec<Obstacle>,
}

impl RoomBuilder {
    pub fn new() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// One screen contributes a playable panel, a play/stop terminal in
    /// front of it, a backing wall slab, and the pedestal the terminal
    /// stands on.
    pub fn add_screen(mut self, def: &ScreenDef) -> Self {
        let center = def.position_vec();
        let normal = def.normal_vec().normalize();
        let (width_axis, up_axis) = panel_axes(normal);

        // The panel is a compound surface: picture plate plus bezel
        let plate = panel_bounds(center, normal, SCREEN_WIDTH, SCREEN_HEIGHT, SCREEN_DEPTH);
        let bezel = panel_bounds(
            center - normal * SCREEN_DEPTH,
            normal,
            SCREEN_WIDTH + 0.1,
            SCREEN_HEIGHT + 0.1,
            SCREEN_DEPTH / 2.0,
        );
        self.interactables.push(Interactable::new(
            def.id,
            ScreenAction::Play,
            vec![plate, bezel],
        ));

        // Terminal buttons float above a pedestal between screen and viewer
        let terminal_base = vec3(
            center.x + normal.x * TERMINAL_STANDOFF,
            0.0,
            center.z + normal.z * TERMINAL_STANDOFF,
        );
        let button_row = terminal_base + up_axis * TERMINAL_BUTTON_HEIGHT;
        let button_half = vec3(
            TERMINAL_BUTTON_HALF,
            TERMINAL_BUTTON_HALF,
            TERMINAL_BUTTON_HALF,
        );
        self.interactables.push(Interactable::new(
            def.id,
            ScreenAction::Play,
            vec![centered_bounds(
                button_row + width_axis * TERMINAL_BUTTON_SPACING,
                button_half,
            )],
        ));
        self.interactables.push(Interactable::new(
            def.id,
            ScreenAction::Stop,
            vec![centered_bounds(
                button_row - width_axis * TERMINAL_BUTTON_SPACING,
                button_half,
            )],
        ));

        // Solid geometry the collision gate must know about
        let slab_center = vec3(center.x, SCREEN_HEIGHT / 2.0 + 0.35, center.z) - normal * 0.1;
        self.obstacles.push(Obstacle {
            bounds: panel_bounds(slab_center, normal, SCREEN_WIDTH + 0.7, 2.5, 0.14),
        });
        self.obstacles.push(Obstacle::from_center_half_extents(
            terminal_base + vec3(0.0, 0.45, 0.0),
            vec3(0.15, 0.45, 0.15),
        ));

        self
    }

    pub fn add_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Four walls boxing in a square room centered on the origin.
    pub fn add_perimeter_walls(mut self, half_size: f32, height: f32, thickness: f32) -> Self {
        let offset = half_size + thickness / 2.0;
        let y = height / 2.0;
        let long = half_size + thickness;
        for (center, half) in [
            (vec3(0.0, y, -offset), vec3(long, y, thickness / 2.0)),
            (vec3(0.0, y, offset), vec3(long, y, thickness / 2.0)),
            (vec3(-offset, y, 0.0), vec3(thickness / 2.0, y, long)),
            (vec3(offset, y, 0.0), vec3(thickness / 2.0, y, long)),
        ] {
            self.obstacles
                .push(Obstacle::from_center_half_extents(center, half));
        }
        self
    }

    pub fn build(self) -> RoomRegistry {
        room_log!(
            info,
            "room assembled: {} interactables, {} obstacles",
            self.interactables.len(),
            self.obstacles.len()
        );
        RoomRegistry {
            interactables: self.interactables,
            obstacles: self.obstacles,
        }
    }
}

/// The demo room: the stock screen layout inside a 20x20 walled floor.
pub fn assemble_stock_room() -> RoomRegistry {
    let mut builder = RoomBuilder::new().add_perimeter_walls(10.0, 4.0, 0.2);
    for def in stock_screens() {
        builder = builder.add_screen(&def);
    }
    builder.build()
}

/// In-plane axes of a panel facing along `normal`.
fn panel_axes(normal: Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let width_axis = Vector3::unit_y().cross(normal);
    let width_axis = if width_axis.magnitude2() <= 1e-8 {
        Vector3::unit_x()
    } else {
        width_axis.normalize()
    };
    let up_axis = normal.cross(width_axis).normalize();
    (width_axis, up_axis)
}

/// World-space bound of an oriented panel. Exact for the axis-aligned
/// normals of the stock layout, conservative for anything tilted.
fn panel_bounds(
    center: Vector3<f32>,
    normal: Vector3<f32>,
    width: f32,
    height: f32,
    depth: f32,
) -> Aabb3<f32> {
    let (width_axis, up_axis) = panel_axes(normal);
    let half = vec3(
        width_axis.x.abs() * width / 2.0 + up_axis.x.abs() * height / 2.0 + normal.x.abs() * depth / 2.0,
        width_axis.y.abs() * width / 2.0 + up_axis.y.abs() * height / 2.0 + normal.y.abs() * depth / 2.0,
        width_axis.z.abs() * width / 2.0 + up_axis.z.abs() * height / 2.0 + normal.z.abs() * depth / 2.0,
    );
    centered_bounds(center, half)
}

fn centered_bounds(center: Vector3<f32>, half: Vector3<f32>) -> Aabb3<f32> {
    Aabb3::new(
        Point3::from_vec(center - half),
        Point3::from_vec(center + half),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_context::Pose;
    use crate::interaction;
    use cgmath::{One, Quaternion};

    #[test]
    fn stock_room_has_three_surfaces_per_screen() {
        let room = assemble_stock_room();
        let screens = stock_screens();
        assert_eq!(room.interactables().len(), screens.len() * 3);
        // Walls plus a slab and pedestal per screen
        assert_eq!(room.obstacles().len(), 4 + screens.len() * 2);
    }

    #[test]
    fn panel_bounds_align_with_the_facing_axis() {
        let bounds = panel_bounds(vec3(0.0, 1.8, 6.0), vec3(0.0, 0.0, 1.0), 2.5, 1.8, 0.04);
        assert!((bounds.max.x - bounds.min.x - 2.5).abs() < 1e-5);
        assert!((bounds.max.y - bounds.min.y - 1.8).abs() < 1e-5);
        assert!((bounds.max.z - bounds.min.z - 0.04).abs() < 1e-5);
    }

    #[test]
    fn viewer_at_spawn_can_target_the_front_screen() {
        let room = assemble_stock_room();
        // Standing at the spawn point, eye height, facing -Z
        let pose = Pose {
            position: vec3(0.0, 1.6, 8.0),
            rotation: Quaternion::one(),
        };

        let hit = interaction::resolve(&pose, room.interactables()).unwrap();
        assert_eq!(hit.index, 1);
        assert_eq!(hit.action, ScreenAction::Play);
        // Screen 1's plate front face sits at z = 6.09
        assert!((hit.distance - 1.91).abs() < 1e-4);
    }

    #[test]
    fn stop_button_sits_left_of_the_play_button() {
        let room = assemble_stock_room();
        let stop_pose = Pose {
            position: vec3(-TERMINAL_BUTTON_SPACING, TERMINAL_BUTTON_HEIGHT, 8.0),
            rotation: Quaternion::one(),
        };
        let hit = interaction::resolve(&stop_pose, room.interactables()).unwrap();
        assert_eq!(hit.index, 1);
        assert_eq!(hit.action, ScreenAction::Stop);
    }

    #[test]
    fn spawn_point_is_outside_every_obstacle() {
        let room = assemble_stock_room();
        let spawn = vec3(0.0, 0.2, 8.0);
        let accepted = crate::physics::try_move(vec3(0.0, 0.2, 7.0), spawn, room.obstacles());
        assert_eq!(accepted, spawn);
    }
}
