//! Controller interaction and locomotion for a walled VR media room.
//!
//! Two tracked 6-DoF controllers drive everything: the left stick walks
//! and strafes, the right stick turns, and a select press on either hand
//! ray-casts into the room to start or stop the media stream behind the
//! targeted surface. Scene assembly (`room`) and media playback (`media`)
//! are collaborators; the [`Game`] frame loop only reads the registries
//! they build and emits [`Effect`]s for them to act on.

pub mod animation;
pub mod effect;
pub mod input_context;
pub mod interaction;
pub mod locomotion;
pub mod logging;
mod macros;
pub mod media;
pub mod physics;
pub mod pointer;
pub mod room;
pub mod time;
pub mod vr_config;

pub use effect::Effect;
pub use input_context::{
    ControllerEvent, ControllerEventKind, ControllerId, FrameSample, GamepadHandle, InputContext,
    Pose, TrackedSample,
};
pub use locomotion::{LocomotionConfig, PlayerTransform};
pub use media::{MediaDispatcher, MediaKey, MediaRegistry, MediaRequest};
pub use pointer::{PointerStyle, PointerVisual};
pub use room::{RoomBuilder, RoomRegistry};
pub use time::Time;
pub use vr_config::Handedness;

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::{EuclideanSpace, Point3, Vector3, vec3};

use animation::{PulseAnimation, TickScheduler};

/// Tunables fixed at startup.
#[derive(Clone, Copy, Debug)]
pub struct GameOptions {
    pub player_start: Vector3<f32>,
    pub locomotion: LocomotionConfig,
    pub pointer_style: PointerStyle,
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            player_start: vec3(0.0, 0.2, 8.0),
            locomotion: LocomotionConfig::default(),
            pointer_style: PointerStyle::default(),
        }
    }
}

/// One controller's pointer affordance plus its pulse animation. The
/// pulse is shared with the tick scheduler.
struct HandPointer {
    visual: PointerVisual,
    pulse: Rc<RefCell<PulseAnimation>>,
}

impl HandPointer {
    fn new(style: &PointerStyle, scheduler: &mut TickScheduler) -> HandPointer {
        let pulse = Rc::new(RefCell::new(PulseAnimation::new()));
        scheduler.register(pulse.clone());
        HandPointer {
            visual: PointerVisual::neutral(style),
            pulse,
        }
    }
}

/// Owns the interaction/locomotion core and advances it in a fixed order
/// once per frame. Single-threaded by design: every subsystem runs
/// synchronously inside [`Game::update`], and the only asynchronous work
/// (media playback) leaves through the dispatcher without a join point.
pub struct Game {
    options: GameOptions,
    input: InputContext,
    player: PlayerTransform,
    room: RoomRegistry,
    media: MediaDispatcher,
    scheduler: TickScheduler,
    left_pointer: HandPointer,
    right_pointer: HandPointer,
}

impl Game {
    pub fn new(options: GameOptions, room: RoomRegistry, media: MediaDispatcher) -> Game {
        let mut scheduler = TickScheduler::new();
        let left_pointer = HandPointer::new(&options.pointer_style, &mut scheduler);
        let right_pointer = HandPointer::new(&options.pointer_style, &mut scheduler);

        Game {
            player: PlayerTransform::at(options.player_start),
            input: InputContext::new(),
            options,
            room,
            media,
            scheduler,
            left_pointer,
            right_pointer,
        }
    }

    /// Queue a controller event for the next update. Events never take
    /// effect mid-frame.
    pub fn queue_event(&mut self, event: ControllerEvent) {
        self.input.queue_event(event);
    }

    /// Advance one frame: drain events, move the player, refresh both
    /// pointers. Returns the actions collaborators must dispatch.
    pub fn update(&mut self, time: &Time, frame: &FrameSample) -> Vec<Effect> {
        let delta = time.elapsed_secs();

        // Fresh tracking first, so select presses resolve against the
        // pose the user actually pointed with.
        self.input.apply_sample(frame);

        let mut effects = Vec::new();
        for event in self.input.drain_events() {
            match event.kind {
                // Connection changes were applied by the tracker itself
                ControllerEventKind::Connected { .. } | ControllerEventKind::Disconnected => {}
                ControllerEventKind::SelectStart => {
                    let pose = self.input.controller(event.controller).pose;
                    let effect =
                        interaction::handle_select_start(&pose, self.room.interactables());
                    if effect != Effect::NoEffect {
                        effects.push(effect);
                    }
                }
                // Recognized, but nothing is bound to release yet
                ControllerEventKind::SelectEnd => {}
            }
        }

        // Locomotion proposes, the collision gate disposes. Yaw is never
        // gated.
        let proposed = locomotion::step(
            &self.options.locomotion,
            delta,
            self.input.left.thumbstick(),
            self.input.right.thumbstick(),
            frame.head.forward(),
        );
        self.player.yaw += proposed.yaw_delta;
        let candidate = self.player.position + proposed.translation;
        self.player.position =
            physics::try_move(self.player.position, candidate, self.room.obstacles());

        // Advance animations, then rebuild both pointer visuals from
        // scratch. The two hands are independent; order is irrelevant.
        self.scheduler.tick(delta);
        let viewer = Point3::from_vec(frame.head.position);
        for id in [ControllerId::Left, ControllerId::Right] {
            let pose = self.input.controller(id).pose;
            let hit = interaction::resolve(&pose, self.room.interactables());
            let pulse_scale = self.hand_pointer(id).pulse.borrow().scale();
            let visual = pointer::update(
                &pose,
                hit.as_ref(),
                viewer,
                pulse_scale,
                &self.options.pointer_style,
            );
            self.hand_pointer_mut(id).visual = visual;
        }

        effects
    }

    /// Forward this frame's effects into the media channel. Fire and
    /// forget: outcomes come back only as log lines.
    pub fn handle_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::NoEffect => {}
                Effect::PlayMedia { key } => self.media.request(MediaRequest::Play(key)),
                Effect::PauseMedia { key } => self.media.request(MediaRequest::Pause(key)),
            }
        }
    }

    pub fn player_transform(&self) -> &PlayerTransform {
        &self.player
    }

    pub fn pointer_visual(&self, id: ControllerId) -> &PointerVisual {
        &self.hand_pointer(id).visual
    }

    pub fn room(&self) -> &RoomRegistry {
        &self.room
    }

    fn hand_pointer(&self, id: ControllerId) -> &HandPointer {
        match id {
            ControllerId::Left => &self.left_pointer,
            ControllerId::Right => &self.right_pointer,
        }
    }

    fn hand_pointer_mut(&mut self, id: ControllerId) -> &mut HandPointer {
        match id {
            ControllerId::Left => &mut self.left_pointer,
            ControllerId::Right => &mut self.right_pointer,
        }
    }
}
