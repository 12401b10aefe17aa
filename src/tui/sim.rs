//! Simulated media element for the terminal viewer.
//!
//! There is no video decoder in a terminal, so this element models the
//! timing of one: a source buffers for a few ticks before `canplay`, a
//! playing source advances on every tick, and reaching the end pauses.
//! Every notification is queued with the generation of the source it
//! belongs to; the app drains the queue and feeds the viewer.

use std::collections::{HashMap, VecDeque};

use crate::media::MediaSource;
use crate::playback::{MediaElement, MediaEvent, MediaEventKind, PlayRejected, ReadyState};

#[derive(Debug, Clone)]
pub struct SimulatedElement {
    source: Option<MediaSource>,
    generation: u64,
    ready: ReadyState,
    load_delay_ticks: u32,
    ticks_until_ready: u32,
    poster_loaded: bool,
    current_time: f64,
    paused: bool,
    /// Known media lengths by event id
    durations: HashMap<String, f64>,
    queue: VecDeque<MediaEvent>,
}

impl SimulatedElement {
    /// An element that needs `load_delay_ticks` ticks before it can play.
    /// Zero makes every source ready on assignment.
    pub fn new(load_delay_ticks: u32) -> Self {
        Self {
            source: None,
            generation: 0,
            ready: ReadyState::HaveNothing,
            load_delay_ticks,
            ticks_until_ready: 0,
            poster_loaded: false,
            current_time: 0.0,
            paused: true,
            durations: HashMap::new(),
            queue: VecDeque::new(),
        }
    }

    /// Register media lengths, replacing earlier ones.
    pub fn set_durations(&mut self, durations: impl IntoIterator<Item = (String, f64)>) {
        self.durations = durations.into_iter().collect();
    }

    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    pub fn poster_loaded(&self) -> bool {
        self.poster_loaded
    }

    /// Length of the current source, if known.
    pub fn duration(&self) -> Option<f64> {
        self.source
            .as_ref()
            .and_then(|s| self.durations.get(&s.event_id))
            .copied()
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<MediaEvent> {
        self.queue.drain(..).collect()
    }

    /// Advance simulated time by `secs`.
    pub fn tick(&mut self, secs: f64) {
        if self.source.is_none() {
            return;
        }

        if !self.poster_loaded {
            self.poster_loaded = true;
            self.emit(MediaEventKind::PosterLoaded);
        }

        if self.ready == ReadyState::HaveNothing {
            self.ticks_until_ready = self.ticks_until_ready.saturating_sub(1);
            if self.ticks_until_ready == 0 {
                self.become_ready();
            }
            return;
        }

        if self.paused {
            return;
        }

        self.current_time += secs;
        if let Some(duration) = self.duration() {
            if self.current_time >= duration {
                self.current_time = duration;
                self.emit(MediaEventKind::TimeUpdate(self.current_time));
                self.paused = true;
                self.emit(MediaEventKind::Paused);
                return;
            }
        }
        self.emit(MediaEventKind::TimeUpdate(self.current_time));
    }

    fn become_ready(&mut self) {
        self.ready = ReadyState::HaveEnoughData;
        self.emit(MediaEventKind::CanPlay);
    }

    fn emit(&mut self, kind: MediaEventKind) {
        self.queue.push_back(MediaEvent::new(self.generation, kind));
    }
}

impl Default for SimulatedElement {
    fn default() -> Self {
        Self::new(0)
    }
}

impl MediaElement for SimulatedElement {
    fn set_source(&mut self, source: &MediaSource, generation: u64) {
        self.source = Some(source.clone());
        self.generation = generation;
        self.ready = ReadyState::HaveNothing;
        self.poster_loaded = false;
        self.current_time = 0.0;
        self.paused = true;
        self.ticks_until_ready = self.load_delay_ticks;
        if self.load_delay_ticks == 0 {
            self.become_ready();
        }
    }

    fn clear_source(&mut self) {
        self.source = None;
        self.ready = ReadyState::HaveNothing;
        self.poster_loaded = false;
        self.current_time = 0.0;
        self.paused = true;
    }

    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn set_current_time(&mut self, secs: f64) {
        if self.source.is_none() {
            return;
        }
        let upper = self.duration().unwrap_or(f64::INFINITY);
        self.current_time = secs.clamp(0.0, upper);
        self.emit(MediaEventKind::TimeUpdate(self.current_time));
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn play(&mut self) -> Result<(), PlayRejected> {
        if self.source.is_none() {
            return Err(PlayRejected::new("no source"));
        }
        if !self.ready.can_play() {
            return Err(PlayRejected::new("no data buffered"));
        }
        if self.paused {
            self.paused = false;
            self.emit(MediaEventKind::Playing);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.emit(MediaEventKind::Paused);
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
