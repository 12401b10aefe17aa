//! Playback state machine.
//!
//! `transition` is pure: it takes the current state and one input and
//! returns the next state plus the effects to perform on the element.
//! The controller applies the effects in order.
//!
//! ```text
//!   Empty ──select──▶ Loading ──canplay──▶ Ready-Paused ◀──▶ Ready-Playing
//!     ▲                  ▲                      │                 │
//!     └──── clear ───────┴───── select (other event) ─────────────┘
//! ```

use crate::media::MediaSource;

use super::element::{MediaEvent, MediaEventKind};

/// The four controller phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No active event, no source
    #[default]
    Empty,
    /// Source assigned, waiting for `canplay`
    Loading,
    ReadyPaused,
    ReadyPlaying,
}

impl Phase {
    pub fn is_ready(self) -> bool {
        matches!(self, Phase::ReadyPaused | Phase::ReadyPlaying)
    }

    /// Short label for status displays.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Empty => "empty",
            Phase::Loading => "loading",
            Phase::ReadyPaused => "paused",
            Phase::ReadyPlaying => "playing",
        }
    }
}

/// Controller state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub phase: Phase,
    /// Source currently assigned to the element
    pub source: Option<MediaSource>,
    /// Bumped on every source assignment or clear; media events carrying
    /// an older value are stale
    pub generation: u64,
    /// Desired playing flag
    pub want_playing: bool,
    /// Current video offset in seconds, `None` while empty
    pub offset: Option<f64>,
    /// Seek to apply once the loading source can play
    pub pending_seek: Option<f64>,
    /// Whether the poster of the current source has loaded
    pub poster_ready: bool,
}

impl PlayerState {
    /// Event id of the assigned source.
    pub fn event_id(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.event_id.as_str())
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    /// Show `source` at `offset`. Same event: seek. Other event: reload.
    Select { source: MediaSource, offset: f64 },
    /// Active event became undefined
    Clear,
    /// Seek within the current source
    Seek(f64),
    /// Desired playing flag changed
    SetPlaying(bool),
    /// Native media notification
    Media(MediaEvent),
}

/// Imperative operations on the element, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AssignSource { source: MediaSource, generation: u64 },
    ClearSource,
    SetCurrentTime(f64),
    Play,
    Pause,
}

/// What the controller reports upward after a media notification.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackReport {
    /// Element position advanced
    TimeUpdate(f64),
    /// Element started playing
    Playing,
    /// Element paused (including end of media)
    Paused,
    /// Media failed; the source is not retried
    Failed(String),
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PlayerState,
    pub effects: Vec<Effect>,
    pub report: Option<PlaybackReport>,
    /// The input was a media event for a superseded generation and was ignored
    pub stale: bool,
}

impl Transition {
    fn to(state: PlayerState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            report: None,
            stale: false,
        }
    }

    fn reporting(mut self, report: PlaybackReport) -> Self {
        self.report = Some(report);
        self
    }
}

/// Compute the next state and effects for `input`.
pub fn transition(state: &PlayerState, input: PlayerInput) -> Transition {
    let mut next = state.clone();
    match input {
        PlayerInput::Select { source, offset } => {
            if state.phase != Phase::Empty && state.event_id() == Some(source.event_id.as_str()) {
                return seek(next, offset);
            }
            let mut effects = Vec::with_capacity(2);
            // Stop the old source before swapping so it cannot keep playing.
            if state.phase == Phase::ReadyPlaying {
                effects.push(Effect::Pause);
            }
            next.generation += 1;
            effects.push(Effect::AssignSource {
                source: source.clone(),
                generation: next.generation,
            });
            next.phase = Phase::Loading;
            next.source = Some(source);
            next.offset = Some(offset);
            next.pending_seek = Some(offset);
            next.poster_ready = false;
            Transition::to(next, effects)
        }
        PlayerInput::Clear => {
            if state.phase == Phase::Empty {
                return Transition::to(next, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if state.phase == Phase::ReadyPlaying {
                effects.push(Effect::Pause);
            }
            effects.push(Effect::ClearSource);
            next.generation += 1;
            next.phase = Phase::Empty;
            next.source = None;
            next.offset = None;
            next.pending_seek = None;
            next.poster_ready = false;
            Transition::to(next, effects)
        }
        PlayerInput::Seek(offset) => seek(next, offset),
        PlayerInput::SetPlaying(playing) => {
            next.want_playing = playing;
            let effects = match (state.phase, playing) {
                (Phase::ReadyPaused, true) => {
                    next.phase = Phase::ReadyPlaying;
                    vec![Effect::Play]
                }
                (Phase::ReadyPlaying, false) => {
                    next.phase = Phase::ReadyPaused;
                    vec![Effect::Pause]
                }
                // Empty: nothing to drive. Loading: deferred to canplay.
                _ => Vec::new(),
            };
            Transition::to(next, effects)
        }
        PlayerInput::Media(event) => media(next, event),
    }
}

fn seek(mut next: PlayerState, offset: f64) -> Transition {
    let effects = match next.phase {
        Phase::Empty => return Transition::to(next, Vec::new()),
        // The source swap has not committed yet; hold the seek.
        Phase::Loading => {
            next.pending_seek = Some(offset);
            Vec::new()
        }
        Phase::ReadyPaused | Phase::ReadyPlaying => vec![Effect::SetCurrentTime(offset)],
    };
    next.offset = Some(offset);
    Transition::to(next, effects)
}

fn media(mut next: PlayerState, event: MediaEvent) -> Transition {
    if event.generation != next.generation || next.phase == Phase::Empty {
        return Transition {
            state: next,
            effects: Vec::new(),
            report: None,
            stale: true,
        };
    }

    match event.kind {
        MediaEventKind::CanPlay => {
            if next.phase != Phase::Loading {
                // Re-buffering after a seek fires canplay again.
                return Transition::to(next, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if let Some(offset) = next.pending_seek.take() {
                effects.push(Effect::SetCurrentTime(offset));
            }
            if next.want_playing {
                effects.push(Effect::Play);
                next.phase = Phase::ReadyPlaying;
            } else {
                effects.push(Effect::Pause);
                next.phase = Phase::ReadyPaused;
            }
            Transition::to(next, effects)
        }
        MediaEventKind::TimeUpdate(secs) => {
            next.offset = Some(secs);
            Transition::to(next, Vec::new()).reporting(PlaybackReport::TimeUpdate(secs))
        }
        MediaEventKind::Playing => {
            next.want_playing = true;
            if next.phase.is_ready() {
                next.phase = Phase::ReadyPlaying;
            }
            Transition::to(next, Vec::new()).reporting(PlaybackReport::Playing)
        }
        MediaEventKind::Paused => {
            next.want_playing = false;
            if next.phase.is_ready() {
                next.phase = Phase::ReadyPaused;
            }
            Transition::to(next, Vec::new()).reporting(PlaybackReport::Paused)
        }
        MediaEventKind::PosterLoaded => {
            next.poster_ready = true;
            Transition::to(next, Vec::new())
        }
        MediaEventKind::Error(message) => {
            Transition::to(next, Vec::new()).reporting(PlaybackReport::Failed(message))
        }
    }
}
