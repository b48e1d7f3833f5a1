use crate::media::MediaKey;

/// Action produced by an update step. The frame loop never performs
/// side effects itself; it returns these for the owner to dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    NoEffect,
    PlayMedia { key: MediaKey },
    PauseMedia { key: MediaKey },
}
