//! The media element seam.
//!
//! The controller drives exactly one element through this trait. A browser
//! binding would wrap an HTML video element; the terminal viewer uses
//! [`SimulatedElement`](crate::tui::SimulatedElement).

use crate::media::MediaSource;

/// HTML media `readyState` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

impl ReadyState {
    /// Whether data for the current position is available.
    ///
    /// At `HaveMetadata` or below a `play()` call would be ignored, so the
    /// controller waits for `canplay` instead.
    pub fn can_play(self) -> bool {
        self > ReadyState::HaveMetadata
    }
}

/// Error returned when the element refuses to start playback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("play() rejected: {reason}")]
pub struct PlayRejected {
    pub reason: String,
}

impl PlayRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A single controllable media element.
pub trait MediaElement {
    /// Assign a new source. Events the element emits for this source must
    /// carry `generation`.
    fn set_source(&mut self, source: &MediaSource, generation: u64);

    /// Remove the current source (no poster, no video).
    fn clear_source(&mut self);

    /// Current readiness of the assigned source.
    fn ready_state(&self) -> ReadyState;

    /// Seek to `secs` into the current source.
    fn set_current_time(&mut self, secs: f64);

    /// Position in the current source, in seconds.
    fn current_time(&self) -> f64;

    /// Start playback.
    fn play(&mut self) -> Result<(), PlayRejected>;

    /// Pause playback.
    fn pause(&mut self);

    fn is_paused(&self) -> bool;
}

/// A native media notification, tagged with the generation of the source
/// that was current when the element emitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub generation: u64,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(generation: u64, kind: MediaEventKind) -> Self {
        Self { generation, kind }
    }
}

/// Media notification kinds the controller subscribes to.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// `canplay`: enough data to start playback
    CanPlay,
    /// `timeupdate`: playback position changed
    TimeUpdate(f64),
    /// `play`
    Playing,
    /// `pause` (also fired when playback reaches the end)
    Paused,
    /// Poster image finished loading
    PosterLoaded,
    /// Network or decode failure
    Error(String),
}
