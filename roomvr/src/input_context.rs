use cgmath::{One, Quaternion, Vector2, Vector3, Zero, vec2};

use crate::input_log;
use crate::vr_config::Handedness;

/// Identifies a controller slot. Fixed at construction, unlike the
/// [`Handedness`] label which is whatever the device reports on connect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerId {
    Left,
    Right,
}

/// Opaque handle to the platform-level gamepad behind a controller,
/// recorded on connect and cleared on disconnect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GamepadHandle(pub u32);

/// World-space pose of a tracked device.
#[derive(Clone, Copy, Debug)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Pose {
    pub fn identity() -> Pose {
        Pose {
            position: Vector3::zero(),
            rotation: Quaternion::one(),
        }
    }

    /// Device forward axis: local -Z rotated into world space.
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * Vector3::new(0.0, 0.0, -1.0)
    }
}

/// Discrete controller events. The platform layer queues these as they
/// arrive; the frame loop drains the queue exactly once per frame, so no
/// handler can mutate state mid-frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControllerEventKind {
    Connected {
        gamepad: GamepadHandle,
        handedness: Handedness,
    },
    Disconnected,
    SelectStart,
    SelectEnd,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerEvent {
    pub controller: ControllerId,
    pub kind: ControllerEventKind,
}

/// Per-frame tracking snapshot for one device.
#[derive(Clone, Copy, Debug)]
pub struct TrackedSample {
    pub pose: Pose,
    pub axes: Option<[f32; 4]>,
}

impl TrackedSample {
    pub fn pose_only(pose: Pose) -> TrackedSample {
        TrackedSample { pose, axes: None }
    }
}

/// Per-frame tracking snapshot supplied by the platform layer.
#[derive(Clone, Copy, Debug)]
pub struct FrameSample {
    pub head: Pose,
    pub left: TrackedSample,
    pub right: TrackedSample,
}

/// Live state for one tracked controller.
#[derive(Clone, Copy, Debug)]
pub struct ControllerState {
    pub id: ControllerId,
    pub pose: Pose,
    pub axes: Option<[f32; 4]>,
    pub gamepad: Option<GamepadHandle>,
    pub handedness: Option<Handedness>,
    pub connected: bool,
}

impl ControllerState {
    fn new(id: ControllerId) -> ControllerState {
        ControllerState {
            id,
            pose: Pose::identity(),
            axes: None,
            gamepad: None,
            handedness: None,
            connected: false,
        }
    }

    /// Thumbstick sample, present only while a gamepad is connected.
    /// Axes 2/3 carry the stick; 0/1 are the (unused) touchpad.
    pub fn thumbstick(&self) -> Option<Vector2<f32>> {
        self.axes.map(|axes| vec2(axes[2], axes[3]))
    }

    fn handle_connected(&mut self, gamepad: GamepadHandle, handedness: Handedness) {
        self.gamepad = Some(gamepad);
        self.handedness = Some(handedness);
        self.connected = true;
        input_log!(debug, "controller {:?} connected as {:?}", self.id, handedness);
    }

    fn handle_disconnected(&mut self) {
        self.gamepad = None;
        self.handedness = None;
        self.axes = None;
        self.connected = false;
        input_log!(debug, "controller {:?} disconnected", self.id);
    }

    fn apply_sample(&mut self, sample: &TrackedSample) {
        self.pose = sample.pose;
        // Axis data only counts while the gamepad is known; a pose keeps
        // tracking after a gamepad drops.
        self.axes = if self.connected && self.gamepad.is_some() {
            sample.axes
        } else {
            None
        };
    }
}

/// Both controllers plus the pending event queue.
pub struct InputContext {
    pub left: ControllerState,
    pub right: ControllerState,
    queue: Vec<ControllerEvent>,
}

impl InputContext {
    pub fn new() -> InputContext {
        InputContext {
            left: ControllerState::new(ControllerId::Left),
            right: ControllerState::new(ControllerId::Right),
            queue: Vec::new(),
        }
    }

    pub fn queue_event(&mut self, event: ControllerEvent) {
        self.queue.push(event);
    }

    /// Drains queued events, applying connection changes to the tracked
    /// state and handing everything back for frame-level dispatch.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        let events = std::mem::take(&mut self.queue);
        for event in &events {
            match event.kind {
                ControllerEventKind::Connected {
                    gamepad,
                    handedness,
                } => self
                    .controller_mut(event.controller)
                    .handle_connected(gamepad, handedness),
                ControllerEventKind::Disconnected => {
                    self.controller_mut(event.controller).handle_disconnected()
                }
                ControllerEventKind::SelectStart | ControllerEventKind::SelectEnd => {}
            }
        }
        events
    }

    /// Refresh both poses and axis samples from this frame's tracking data.
    pub fn apply_sample(&mut self, frame: &FrameSample) {
        self.left.apply_sample(&frame.left);
        self.right.apply_sample(&frame.right);
    }

    pub fn controller(&self, id: ControllerId) -> &ControllerState {
        match id {
            ControllerId::Left => &self.left,
            ControllerId::Right => &self.right,
        }
    }

    fn controller_mut(&mut self, id: ControllerId) -> &mut ControllerState {
        match id {
            ControllerId::Left => &mut self.left,
            ControllerId::Right => &mut self.right,
        }
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::new()
    }
}
