//! Playback controller: applies state machine effects to a media element.

use crate::event::Event;
use crate::media::{MediaPaths, MediaSource};

use super::element::{MediaElement, MediaEvent, MediaEventKind, PlayRejected};
use super::state::{transition, Effect, Phase, PlaybackReport, PlayerInput, PlayerState};

/// Owns one media element and keeps it in step with the desired event,
/// offset and playing flag.
pub struct PlaybackController<E: MediaElement> {
    element: E,
    paths: MediaPaths,
    state: PlayerState,
}

impl<E: MediaElement> PlaybackController<E> {
    pub fn new(element: E, paths: MediaPaths) -> Self {
        Self {
            element,
            paths,
            state: PlayerState::default(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// The source currently assigned to the element.
    pub fn source(&self) -> Option<&MediaSource> {
        self.state.source.as_ref()
    }

    /// Show `event` at `offset` seconds, or go empty when `event` is `None`.
    ///
    /// Selecting the already-loaded event only seeks. A report is returned
    /// when the element refused to start playing.
    pub fn select(&mut self, event: Option<&Event>, offset: f64) -> Option<PlaybackReport> {
        let input = match event {
            Some(event) => PlayerInput::Select {
                source: self.paths.source_for(&event.id),
                offset,
            },
            None => PlayerInput::Clear,
        };
        self.dispatch(input)
    }

    /// Seek within the current source.
    pub fn seek(&mut self, offset: f64) -> Option<PlaybackReport> {
        self.dispatch(PlayerInput::Seek(offset))
    }

    /// Set the desired playing flag.
    ///
    /// Returns [`PlaybackReport::Paused`] if the element rejected `play()`.
    pub fn set_playing(&mut self, playing: bool) -> Option<PlaybackReport> {
        self.dispatch(PlayerInput::SetPlaying(playing))
    }

    /// Feed a native media notification. Stale notifications are dropped.
    pub fn handle_media_event(&mut self, event: MediaEvent) -> Option<PlaybackReport> {
        self.dispatch(PlayerInput::Media(event))
    }

    fn dispatch(&mut self, input: PlayerInput) -> Option<PlaybackReport> {
        let t = transition(&self.state, input.clone());
        if t.stale {
            tracing::trace!(?input, generation = self.state.generation, "discarding stale media event");
            return None;
        }
        self.state = t.state;

        let mut assigned = None;
        let mut play_rejected = false;
        for effect in t.effects {
            if let Effect::AssignSource { generation, .. } = &effect {
                assigned = Some(*generation);
            }
            if let Err(e) = self.apply(effect) {
                tracing::debug!("{}", e);
                play_rejected = true;
            }
        }

        if let Some(PlaybackReport::Failed(message)) = &t.report {
            tracing::warn!(
                event_id = self.state.event_id().unwrap_or_default(),
                %message,
                "media error, source will not be retried"
            );
        }

        let mut report = t.report;

        // The element stayed paused, so the state must say so too.
        if play_rejected {
            let paused = MediaEvent::new(self.state.generation, MediaEventKind::Paused);
            report = self.dispatch(PlayerInput::Media(paused)).or(report);
        }

        // A source that is already buffered will not fire canplay again.
        if let Some(generation) = assigned {
            if self.element.ready_state().can_play() {
                let can_play = MediaEvent::new(generation, MediaEventKind::CanPlay);
                report = self.dispatch(PlayerInput::Media(can_play)).or(report);
            }
        }

        report
    }

    fn apply(&mut self, effect: Effect) -> Result<(), PlayRejected> {
        match effect {
            Effect::AssignSource { source, generation } => {
                tracing::debug!(event_id = %source.event_id, generation, "assigning source");
                self.element.set_source(&source, generation);
            }
            Effect::ClearSource => self.element.clear_source(),
            Effect::SetCurrentTime(secs) => self.element.set_current_time(secs),
            Effect::Play => return self.element.play(),
            Effect::Pause => self.element.pause(),
        }
        Ok(())
    }
}
