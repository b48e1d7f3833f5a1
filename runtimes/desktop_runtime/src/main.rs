// Desktop runtime - drives the media room frame loop without VR hardware.
//
// Useful for automation and manual verification: synthetic tracking and
// controller input walk the player toward the front screen, press play on
// it, and back away, while every media request lands in the log instead
// of a real playback stack.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use cgmath::{vec2, vec3, Rotation, Vector2, Vector3};
use clap::Parser;
use tracing::info;

use roomvr::media::{AudioOutput, AudioOutputState, MediaResult, MediaSource};
use roomvr::room::{load_screens, stock_screens, RoomBuilder};
use roomvr::{
    ControllerEvent, ControllerEventKind, ControllerId, FrameSample, Game, GameOptions,
    GamepadHandle, Handedness, MediaKey, MediaRegistry, Pose, Time, TrackedSample,
};

#[derive(Parser)]
#[command(name = "desktop_runtime")]
#[command(about = "Drives the media room frame loop with synthetic tracking input")]
struct Args {
    /// Screen layout JSON (defaults to the built-in room)
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value = "600")]
    frames: u32,

    /// Fixed timestep in seconds
    #[arg(long, default_value = "0.016")]
    timestep: f32,
}

/// Media source that logs instead of decoding anything.
struct LoggedMediaSource {
    title: String,
    url: String,
    muted: bool,
}

impl MediaSource for LoggedMediaSource {
    fn play(&mut self) -> MediaResult {
        info!("play: {} ({})", self.title, self.url);
        Ok(())
    }

    fn pause(&mut self) -> MediaResult {
        info!("pause: {}", self.title);
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn muted(&self) -> bool {
        self.muted
    }
}

/// Audio output that starts suspended, like a browser context would.
struct LoggedAudioOutput {
    state: AudioOutputState,
}

impl AudioOutput for LoggedAudioOutput {
    fn state(&self) -> AudioOutputState {
        self.state
    }

    fn resume(&mut self) -> MediaResult {
        info!("audio output resumed");
        self.state = AudioOutputState::Running;
        Ok(())
    }
}

fn main() -> Result<()> {
    roomvr::logging::init_logging();
    let args = Args::parse();

    let screens = match &args.layout {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading layout {}", path.display()))?;
            load_screens(&json).with_context(|| format!("parsing layout {}", path.display()))?
        }
        None => stock_screens(),
    };
    info!("simulating room with {} screens", screens.len());

    let mut builder = RoomBuilder::new().add_perimeter_walls(10.0, 4.0, 0.2);
    for def in &screens {
        builder = builder.add_screen(def);
    }
    let room = builder.build();

    let (dispatcher, mut registry) = MediaRegistry::new();
    for def in &screens {
        registry.insert(
            MediaKey(def.id),
            Box::new(LoggedMediaSource {
                title: def.title.clone(),
                url: def.url.clone(),
                muted: true,
            }),
        );
    }
    registry.set_audio_output(Box::new(LoggedAudioOutput {
        state: AudioOutputState::Suspended,
    }));

    // The registry drains the request channel on its own thread; the
    // frame loop never waits for it.
    let media_worker = std::thread::spawn(move || registry.run());

    let mut game = Game::new(GameOptions::default(), room, dispatcher);
    for (controller, handedness) in [
        (ControllerId::Left, Handedness::Left),
        (ControllerId::Right, Handedness::Right),
    ] {
        game.queue_event(ControllerEvent {
            controller,
            kind: ControllerEventKind::Connected {
                gamepad: GamepadHandle(controller as u32),
                handedness,
            },
        });
    }

    let mut time = Time::zero();
    for frame_index in 0..args.frames {
        if let Some(event) = scripted_event(frame_index, args.frames) {
            game.queue_event(event);
        }

        let frame = synthesize_frame(&game, scripted_sticks(frame_index, args.frames));
        time = time.advanced_by(Duration::from_secs_f32(args.timestep));
        let effects = game.update(&time, &frame);
        game.handle_effects(effects);
    }

    let player = game.player_transform();
    info!(
        "simulation done after {:.1}s: position {:?}, yaw {:.2} rad",
        time.total_secs(),
        player.position,
        player.yaw.0
    );

    // Closing the game drops the dispatcher, which shuts the worker down
    drop(game);
    media_worker
        .join()
        .map_err(|_| anyhow::anyhow!("media worker panicked"))?;
    Ok(())
}

/// Walk toward the front screen for the first third of the run, stand
/// still while pressing play, then turn in place for the rest.
fn scripted_sticks(frame_index: u32, total: u32) -> (Vector2<f32>, Vector2<f32>) {
    let phase = frame_index as f32 / total.max(1) as f32;
    if phase < 0.33 {
        (vec2(0.0, -1.0), vec2(0.0, 0.0))
    } else if phase < 0.66 {
        (vec2(0.0, 0.0), vec2(0.0, 0.0))
    } else {
        (vec2(0.0, 0.0), vec2(0.4, 0.0))
    }
}

/// One select press on the right hand midway through the run.
fn scripted_event(frame_index: u32, total: u32) -> Option<ControllerEvent> {
    let press_at = total / 2;
    if frame_index == press_at {
        Some(ControllerEvent {
            controller: ControllerId::Right,
            kind: ControllerEventKind::SelectStart,
        })
    } else if frame_index == press_at + 1 {
        Some(ControllerEvent {
            controller: ControllerId::Right,
            kind: ControllerEventKind::SelectEnd,
        })
    } else {
        None
    }
}

/// Head and hands ride along with the player transform, the way a real
/// rig parents the camera and controllers to the locomoting group.
fn synthesize_frame(game: &Game, sticks: (Vector2<f32>, Vector2<f32>)) -> FrameSample {
    let player = game.player_transform();
    let rotation = player.rotation();
    let (left_stick, right_stick) = sticks;

    let mount = |offset: Vector3<f32>, stick: Vector2<f32>| TrackedSample {
        pose: Pose {
            position: player.position + rotation.rotate_vector(offset),
            rotation,
        },
        axes: Some([0.0, 0.0, stick.x, stick.y]),
    };

    FrameSample {
        head: Pose {
            position: player.position + vec3(0.0, 1.4, 0.0),
            rotation,
        },
        left: mount(vec3(-0.2, 1.0, -0.1), left_stick),
        right: mount(vec3(0.2, 1.0, -0.1), right_stick),
    }
}
