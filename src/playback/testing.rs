//! Recording media element for unit tests.

use crate::media::MediaSource;

use super::element::{MediaElement, PlayRejected, ReadyState};

/// A call made on the element.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetSource { event_id: String, generation: u64 },
    ClearSource,
    SetCurrentTime(f64),
    Play,
    Pause,
}

/// Element double that records every call.
#[derive(Debug)]
pub struct RecordingElement {
    pub calls: Vec<Call>,
    pub current_time: f64,
    pub paused: bool,
    pub ready: ReadyState,
    /// Ready state reported right after a source is assigned
    pub ready_on_assign: ReadyState,
    /// Reject every `play()` call
    pub reject_play: bool,
}

impl Default for RecordingElement {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            current_time: 0.0,
            paused: true,
            ready: ReadyState::HaveNothing,
            ready_on_assign: ReadyState::HaveNothing,
            reject_play: false,
        }
    }
}

impl RecordingElement {
    /// Number of source assignments.
    pub fn loads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::SetSource { .. }))
            .count()
    }

    pub fn play_calls(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Play).count()
    }
}

impl MediaElement for RecordingElement {
    fn set_source(&mut self, source: &MediaSource, generation: u64) {
        self.calls.push(Call::SetSource {
            event_id: source.event_id.clone(),
            generation,
        });
        self.current_time = 0.0;
        self.ready = self.ready_on_assign;
    }

    fn clear_source(&mut self) {
        self.calls.push(Call::ClearSource);
        self.ready = ReadyState::HaveNothing;
    }

    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn set_current_time(&mut self, secs: f64) {
        self.calls.push(Call::SetCurrentTime(secs));
        self.current_time = secs;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn play(&mut self) -> Result<(), PlayRejected> {
        self.calls.push(Call::Play);
        if self.reject_play {
            return Err(PlayRejected::new("not allowed"));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
