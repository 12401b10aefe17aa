//! History viewer: the composition root.
//!
//! Holds the marker time and the playing flag as the single source of truth,
//! derives the active event and video offset from them, and drives the
//! playback controller.

use chrono::{DateTime, Duration, Utc};

use crate::event::{Event, EventCatalog};
use crate::playback::{MediaElement, MediaEvent, PlaybackController, PlaybackReport};
use crate::timeline::{self, next_event_start, previous_event_start, TimelineChange};

/// Header content for the current marker position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderView<'a> {
    /// Marker is in a gap, outside the catalog, or the catalog is empty
    NoEvent,
    /// Marker is inside this event
    Event(&'a Event),
}

/// Derived playback state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    /// Offset into the active event's video, `None` without an active event
    pub offset_secs: Option<f64>,
}

/// Viewer behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Advance the marker from element time updates while playing.
    pub follow_playback: bool,
}

pub struct HistoryViewer<E: MediaElement> {
    catalog: EventCatalog,
    marker: DateTime<Utc>,
    is_playing: bool,
    controller: PlaybackController<E>,
    options: ViewerOptions,
    /// Set once a non-empty catalog has been applied
    loaded_once: bool,
}

impl<E: MediaElement> HistoryViewer<E> {
    pub fn new(controller: PlaybackController<E>, marker: DateTime<Utc>, options: ViewerOptions) -> Self {
        Self {
            catalog: EventCatalog::empty(),
            marker,
            is_playing: false,
            controller,
            options,
            loaded_once: false,
        }
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn marker(&self) -> DateTime<Utc> {
        self.marker
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn options(&self) -> ViewerOptions {
        self.options
    }

    pub fn controller(&self) -> &PlaybackController<E> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<E> {
        &mut self.controller
    }

    /// Event containing the marker.
    pub fn active_event(&self) -> Option<&Event> {
        timeline::resolve(self.marker, &self.catalog)
    }

    pub fn header(&self) -> HeaderView<'_> {
        match self.active_event() {
            Some(event) => HeaderView::Event(event),
            None => HeaderView::NoEvent,
        }
    }

    pub fn playback(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            is_playing: self.is_playing,
            offset_secs: self.active_event().map(|e| e.offset_secs(self.marker)),
        }
    }

    /// Replace the catalog with a fresh snapshot.
    ///
    /// The first non-empty catalog moves the marker to the start of the most
    /// recent event. Later refreshes keep the marker, even after an empty
    /// refresh in between, and only reload video if the event under it changed.
    pub fn set_catalog(&mut self, catalog: EventCatalog) {
        self.catalog = catalog;
        tracing::info!(events = self.catalog.len(), "event catalog updated");

        if !self.loaded_once {
            if let Some(latest) = self.catalog.events().last() {
                self.marker = latest.start;
                self.loaded_once = true;
            }
            self.settle();
            return;
        }

        let active_id = self.active_event().map(|e| e.id.clone());
        if active_id.as_deref() != self.controller.state().event_id() {
            self.settle();
        }
    }

    /// Apply a timeline change. Drag feedback only moves the marker.
    pub fn on_timeline_change(&mut self, change: TimelineChange) {
        self.marker = change.marker_time;
        if change.seek_complete {
            self.settle();
        }
    }

    /// Settled jump to `to`.
    pub fn seek_to(&mut self, to: DateTime<Utc>) {
        self.marker = timeline::clamp_to_span(to, &self.catalog);
        self.settle();
    }

    /// Settled jump by `secs` (negative goes back). A step past the
    /// representable time range goes to the catalog edge.
    pub fn step(&mut self, secs: i64) {
        self.seek_to(offset_marker(self.marker, secs, &self.catalog));
    }

    /// Jump to the start of the next event. Returns false at the end.
    pub fn next_event(&mut self) -> bool {
        match next_event_start(self.marker, &self.catalog) {
            Some(start) => {
                self.seek_to(start);
                true
            }
            None => false,
        }
    }

    /// Jump to the start of the current or previous event.
    pub fn previous_event(&mut self) -> bool {
        match previous_event_start(self.marker, &self.catalog) {
            Some(start) => {
                self.seek_to(start);
                true
            }
            None => false,
        }
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
        let report = self.controller.set_playing(playing);
        self.absorb(report);
    }

    /// Play/pause button. Never moves the marker.
    pub fn toggle_playing(&mut self) {
        self.set_playing(!self.is_playing);
    }

    /// Feed a native media notification from the element.
    pub fn on_media_event(&mut self, event: MediaEvent) -> Option<PlaybackReport> {
        let report = self.controller.handle_media_event(event);
        self.absorb(report)
    }

    fn absorb(&mut self, report: Option<PlaybackReport>) -> Option<PlaybackReport> {
        let report = report?;
        match &report {
            PlaybackReport::Playing => self.is_playing = true,
            PlaybackReport::Paused => self.is_playing = false,
            PlaybackReport::TimeUpdate(secs) => {
                if self.options.follow_playback {
                    self.follow(*secs);
                }
            }
            PlaybackReport::Failed(_) => {}
        }
        Some(report)
    }

    fn follow(&mut self, secs: f64) {
        let Some(id) = self.controller.state().event_id() else {
            return;
        };
        if let Some(event) = self.catalog.get(id) {
            self.marker = event.time_at_offset(secs);
        }
    }

    fn settle(&mut self) {
        let event = timeline::resolve(self.marker, &self.catalog);
        let offset = event.map(|e| e.offset_secs(self.marker)).unwrap_or_default();
        let report = self.controller.select(event, offset);
        self.absorb(report);
    }
}

/// `marker` moved by `secs`, clamped to the catalog span. Out-of-range
/// steps land on the span edge in their direction.
pub fn offset_marker(marker: DateTime<Utc>, secs: i64, catalog: &EventCatalog) -> DateTime<Utc> {
    let moved = Duration::try_seconds(secs).and_then(|delta| marker.checked_add_signed(delta));
    match (moved, catalog.span()) {
        (Some(to), _) => to,
        (None, Some((start, end))) => {
            if secs < 0 {
                start
            } else {
                end
            }
        }
        (None, None) => marker,
    }
}
