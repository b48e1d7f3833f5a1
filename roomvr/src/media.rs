//! Media resource collaborator.
//!
//! The frame loop never touches a media source directly: select actions
//! become [`MediaRequest`]s pushed into a one-way channel with no join
//! point. The registry on the other end performs each request best-effort;
//! failures are logged and swallowed, never fed back into core state.

use std::collections::HashMap;
use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::media_log;

/// Keys a media resource by the id of the screen that fronts it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MediaKey(pub u32);

/// One-way request into the media collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaRequest {
    Play(MediaKey),
    Pause(MediaKey),
}

pub type MediaResult = Result<(), Box<dyn Error>>;

/// An addressable, possibly remote media stream. Both operations may be
/// rejected by the backing platform; callers treat them as best-effort.
pub trait MediaSource: Send {
    fn play(&mut self) -> MediaResult;
    fn pause(&mut self) -> MediaResult;
    fn set_muted(&mut self, muted: bool);
    fn muted(&self) -> bool;
}

/// Shared audio output that may start suspended until a user gesture
/// (platform autoplay rules).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioOutputState {
    Suspended,
    Running,
}

pub trait AudioOutput: Send {
    fn state(&self) -> AudioOutputState;
    fn resume(&mut self) -> MediaResult;
}

/// Sending half, owned by the frame loop. Requests are fire-and-forget:
/// a closed channel is logged and the request dropped.
#[derive(Clone)]
pub struct MediaDispatcher {
    tx: Sender<MediaRequest>,
}

impl MediaDispatcher {
    pub fn request(&self, request: MediaRequest) {
        if self.tx.send(request).is_err() {
            media_log!(warn, "media channel closed, dropping {:?}", request);
        }
    }
}

/// Receiving half: owns the media sources and the optional shared audio
/// output, and is the single point where media failures are swallowed.
pub struct MediaRegistry {
    rx: Receiver<MediaRequest>,
    sources: HashMap<MediaKey, Box<dyn MediaSource>>,
    audio_output: Option<Box<dyn AudioOutput>>,
}

impl MediaRegistry {
    pub fn new() -> (MediaDispatcher, MediaRegistry) {
        let (tx, rx) = mpsc::channel();
        (
            MediaDispatcher { tx },
            MediaRegistry {
                rx,
                sources: HashMap::new(),
                audio_output: None,
            },
        )
    }

    pub fn insert(&mut self, key: MediaKey, source: Box<dyn MediaSource>) {
        self.sources.insert(key, source);
    }

    pub fn set_audio_output(&mut self, output: Box<dyn AudioOutput>) {
        self.audio_output = Some(output);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Drain every pending request without blocking. Returns how many were
    /// handled. Suitable for a same-thread pump once per frame.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(request) = self.rx.try_recv() {
            self.handle(request);
            handled += 1;
        }
        handled
    }

    /// Block on the channel until every dispatcher is dropped. Suitable
    /// for running the registry on its own worker thread.
    pub fn run(mut self) {
        while let Ok(request) = self.rx.recv() {
            self.handle(request);
        }
        media_log!(debug, "media channel closed, registry shutting down");
    }

    fn handle(&mut self, request: MediaRequest) {
        match request {
            MediaRequest::Play(key) => {
                // A play press is a user gesture: wake the shared audio
                // output and unmute before asking the stream to start.
                self.resume_audio_output();
                match self.sources.get_mut(&key) {
                    Some(source) => {
                        source.set_muted(false);
                        if let Err(err) = source.play() {
                            media_log!(warn, "play request for {:?} failed: {}", key, err);
                        }
                    }
                    None => media_log!(warn, "play request for unknown media {:?}", key),
                }
            }
            MediaRequest::Pause(key) => match self.sources.get_mut(&key) {
                Some(source) => {
                    if let Err(err) = source.pause() {
                        media_log!(warn, "pause request for {:?} failed: {}", key, err);
                    }
                }
                None => media_log!(warn, "pause request for unknown media {:?}", key),
            },
        }
    }

    fn resume_audio_output(&mut self) {
        if let Some(output) = self.audio_output.as_mut() {
            if output.state() == AudioOutputState::Suspended {
                if let Err(err) = output.resume() {
                    media_log!(warn, "audio output resume failed: {}", err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CallLog(Arc<Mutex<Vec<String>>>);

    impl CallLog {
        fn push(&self, entry: impl Into<String>) {
            self.0.lock().unwrap().push(entry.into());
        }

        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeSource {
        name: &'static str,
        log: CallLog,
        muted: bool,
        fail_play: bool,
    }

    impl FakeSource {
        fn new(name: &'static str, log: CallLog) -> Box<FakeSource> {
            Box::new(FakeSource {
                name,
                log,
                muted: true,
                fail_play: false,
            })
        }

        fn failing(name: &'static str, log: CallLog) -> Box<FakeSource> {
            let mut source = Self::new(name, log);
            source.fail_play = true;
            source
        }
    }

    impl MediaSource for FakeSource {
        fn play(&mut self) -> MediaResult {
            self.log.push(format!("{}:play", self.name));
            if self.fail_play {
                Err("playback rejected".into())
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) -> MediaResult {
            self.log.push(format!("{}:pause", self.name));
            Ok(())
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn muted(&self) -> bool {
            self.muted
        }
    }

    struct FakeAudioOutput {
        state: AudioOutputState,
        log: CallLog,
    }

    impl AudioOutput for FakeAudioOutput {
        fn state(&self) -> AudioOutputState {
            self.state
        }

        fn resume(&mut self) -> MediaResult {
            self.log.push("audio:resume");
            self.state = AudioOutputState::Running;
            Ok(())
        }
    }

    #[test]
    fn play_targets_exactly_one_source() {
        let log = CallLog::default();
        let (dispatcher, mut registry) = MediaRegistry::new();
        registry.insert(MediaKey(3), FakeSource::new("three", log.clone()));
        registry.insert(MediaKey(4), FakeSource::new("four", log.clone()));

        dispatcher.request(MediaRequest::Play(MediaKey(3)));
        assert_eq!(registry.pump(), 1);
        assert_eq!(log.entries(), vec!["three:play"]);
    }

    #[test]
    fn play_resumes_suspended_audio_and_unmutes() {
        let log = CallLog::default();
        let (dispatcher, mut registry) = MediaRegistry::new();
        registry.insert(MediaKey(1), FakeSource::new("one", log.clone()));
        registry.set_audio_output(Box::new(FakeAudioOutput {
            state: AudioOutputState::Suspended,
            log: log.clone(),
        }));

        dispatcher.request(MediaRequest::Play(MediaKey(1)));
        registry.pump();
        assert_eq!(log.entries(), vec!["audio:resume", "one:play"]);

        // A second play finds the output running and skips the resume
        dispatcher.request(MediaRequest::Play(MediaKey(1)));
        registry.pump();
        assert_eq!(log.entries(), vec!["audio:resume", "one:play", "one:play"]);
    }

    #[test]
    fn failures_are_swallowed() {
        let log = CallLog::default();
        let (dispatcher, mut registry) = MediaRegistry::new();
        registry.insert(MediaKey(1), FakeSource::failing("one", log.clone()));

        dispatcher.request(MediaRequest::Play(MediaKey(1)));
        dispatcher.request(MediaRequest::Pause(MediaKey(1)));
        dispatcher.request(MediaRequest::Play(MediaKey(9)));
        assert_eq!(registry.pump(), 3);
        assert_eq!(log.entries(), vec!["one:play", "one:pause"]);
    }

    #[test]
    fn dropped_registry_does_not_panic_the_dispatcher() {
        let (dispatcher, registry) = MediaRegistry::new();
        drop(registry);
        dispatcher.request(MediaRequest::Pause(MediaKey(1)));
    }
}
