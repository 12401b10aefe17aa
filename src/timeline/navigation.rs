//! Jumping between events on the timeline.

use chrono::{DateTime, Utc};

use crate::event::EventCatalog;

/// Start of the first event beginning strictly after `marker`.
pub fn next_event_start(marker: DateTime<Utc>, catalog: &EventCatalog) -> Option<DateTime<Utc>> {
    let events = catalog.events();
    let idx = events.partition_point(|e| e.start <= marker);
    events.get(idx).map(|e| e.start)
}

/// Start of the last event beginning strictly before `marker`.
///
/// From inside an event this rewinds to the start of that event; from an
/// event's exact start it goes to the previous event.
pub fn previous_event_start(
    marker: DateTime<Utc>,
    catalog: &EventCatalog,
) -> Option<DateTime<Utc>> {
    let events = catalog.events();
    let idx = events.partition_point(|e| e.start < marker);
    idx.checked_sub(1).map(|i| events[i].start)
}

/// Clamp `marker` into the catalog span. An empty catalog leaves it unchanged.
pub fn clamp_to_span(marker: DateTime<Utc>, catalog: &EventCatalog) -> DateTime<Utc> {
    match catalog.span() {
        Some((start, end)) => marker.clamp(start, end),
        None => marker,
    }
}
