//! Drag/release tracking for the timeline scrubber.
//!
//! While the user drags, every move produces drag feedback
//! (`seek_complete = false`). Only the release, or a programmatic seek,
//! produces a settled change that may reload video.

use chrono::{DateTime, Utc};

use super::{navigation::clamp_to_span, TimelineChange};
use crate::event::EventCatalog;

/// Scrubber interaction state.
#[derive(Debug, Clone, Default)]
pub struct Scrubber {
    /// Last position reported during the current drag
    drag_position: Option<DateTime<Utc>>,
}

impl Scrubber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_position.is_some()
    }

    /// Move the scrubber during a drag.
    pub fn drag(&mut self, catalog: &EventCatalog, to: DateTime<Utc>) -> TimelineChange {
        let to = clamp_to_span(to, catalog);
        self.drag_position = Some(to);
        TimelineChange::resolve(catalog, to, false)
    }

    /// Release the scrubber, settling on the last drag position.
    ///
    /// Returns `None` when no drag was in progress. The position is resolved
    /// against the catalog current at release time, so a refresh that
    /// arrived mid-drag is honored.
    pub fn release(&mut self, catalog: &EventCatalog) -> Option<TimelineChange> {
        let to = self.drag_position.take()?;
        Some(TimelineChange::resolve(catalog, to, true))
    }

    /// Abandon the current drag without settling.
    pub fn cancel(&mut self) {
        self.drag_position = None;
    }

    /// Current drag position.
    pub fn drag_position(&self) -> Option<DateTime<Utc>> {
        self.drag_position
    }

    /// Programmatic jump. Cancels any drag in progress.
    pub fn seek(&mut self, catalog: &EventCatalog, to: DateTime<Utc>) -> TimelineChange {
        self.drag_position = None;
        TimelineChange::resolve(catalog, clamp_to_span(to, catalog), true)
    }
}
