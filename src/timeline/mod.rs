//! Timeline model: marker time to active event resolution.
//!
//! The timeline is a continuous time axis spanned by the catalog. A marker
//! on that axis resolves to the event whose `[start, end)` interval contains
//! it, or to no event when it sits in a gap or outside the catalog.

mod navigation;
mod scrub;

use chrono::{DateTime, Utc};

use crate::event::{Event, EventCatalog};

pub use navigation::{clamp_to_span, next_event_start, previous_event_start};
pub use scrub::Scrubber;

/// Resolve the event containing `marker`.
///
/// Intervals are half-open, so a marker exactly on a boundary belongs to
/// the event that starts there, never to the one that ends there. Only the
/// latest event starting at or before the marker is considered, which is
/// exact for the non-overlapping catalogs the source produces.
pub fn resolve(marker: DateTime<Utc>, catalog: &EventCatalog) -> Option<&Event> {
    let events = catalog.events();
    // Number of events starting at or before the marker.
    let idx = events.partition_point(|e| e.start <= marker);
    let candidate = events.get(idx.checked_sub(1)?)?;
    candidate.contains(marker).then_some(candidate)
}

/// Change notification emitted by the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineChange {
    /// Event containing the marker, if any
    pub event: Option<Event>,
    /// Raw marker position
    pub marker_time: DateTime<Utc>,
    /// True for settled positions (released scrubber, programmatic jump),
    /// false for in-flight drag feedback
    pub seek_complete: bool,
}

impl TimelineChange {
    /// Resolve `marker` against `catalog` and wrap the result.
    pub fn resolve(catalog: &EventCatalog, marker: DateTime<Utc>, seek_complete: bool) -> Self {
        Self {
            event: resolve(marker, catalog).cloned(),
            marker_time: marker,
            seek_complete,
        }
    }

    /// Id of the resolved event.
    pub fn event_id(&self) -> Option<&str> {
        self.event.as_ref().map(|e| e.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{timestamp_from_epoch, RawEvent};

    fn at(secs: f64) -> DateTime<Utc> {
        timestamp_from_epoch(secs).unwrap()
    }

    fn scenario() -> EventCatalog {
        EventCatalog::from_raw(vec![
            RawEvent::closed("b", "person", 250.0, 300.0),
            RawEvent::closed("a", "car", 100.0, 200.0),
        ])
    }

    fn resolved_id(marker: f64, catalog: &EventCatalog) -> Option<String> {
        resolve(at(marker), catalog).map(|e| e.id.clone())
    }

    #[test]
    fn marker_inside_event_resolves_to_it() {
        let catalog = scenario();
        assert_eq!(resolved_id(150.0, &catalog).as_deref(), Some("a"));
        assert_eq!(resolved_id(100.0, &catalog).as_deref(), Some("a"));
        assert_eq!(resolved_id(299.999, &catalog).as_deref(), Some("b"));
    }

    #[test]
    fn marker_in_gap_or_outside_resolves_to_none() {
        let catalog = scenario();
        assert_eq!(resolved_id(225.0, &catalog), None);
        assert_eq!(resolved_id(50.0, &catalog), None);
        assert_eq!(resolved_id(300.0, &catalog), None);
        assert_eq!(resolved_id(1_000.0, &catalog), None);
    }

    #[test]
    fn boundary_with_gap_resolves_to_none() {
        // a ends at 200, b starts at 250: 200 is in neither
        assert_eq!(resolved_id(200.0, &scenario()), None);
    }

    #[test]
    fn overlap_resolves_to_the_later_event() {
        let catalog = EventCatalog::from_raw(vec![
            RawEvent::closed("long", "car", 100.0, 300.0),
            RawEvent::closed("short", "car", 150.0, 160.0),
        ]);
        assert_eq!(catalog.overlapping(), 1);
        assert_eq!(resolved_id(155.0, &catalog).as_deref(), Some("short"));
        assert_eq!(resolved_id(120.0, &catalog).as_deref(), Some("long"));
        // Past the later event the earlier one is not looked at.
        assert_eq!(resolved_id(200.0, &catalog), None);
    }

    #[test]
    fn shared_boundary_belongs_to_following_event() {
        let catalog = EventCatalog::from_raw(vec![
            RawEvent::closed("a", "car", 100.0, 200.0),
            RawEvent::closed("b", "car", 200.0, 300.0),
        ]);
        assert_eq!(resolved_id(200.0, &catalog).as_deref(), Some("b"));
        assert_eq!(resolved_id(199.999_999, &catalog).as_deref(), Some("a"));
    }

    #[test]
    fn empty_catalog_resolves_to_none() {
        assert!(resolve(at(10.0), &EventCatalog::empty()).is_none());
    }

    #[test]
    fn resolution_is_idempotent() {
        let catalog = scenario();
        for marker in [50.0, 100.0, 150.0, 200.0, 225.0, 250.0, 275.0, 300.0] {
            let first = TimelineChange::resolve(&catalog, at(marker), true);
            let second = TimelineChange::resolve(&catalog, at(marker), true);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn scenario_offsets() {
        let catalog = scenario();
        let change = TimelineChange::resolve(&catalog, at(150.0), true);
        assert_eq!(change.event_id(), Some("a"));
        assert_eq!(change.event.unwrap().offset_secs(at(150.0)), 50.0);

        let change = TimelineChange::resolve(&catalog, at(225.0), true);
        assert_eq!(change.event_id(), None);

        let change = TimelineChange::resolve(&catalog, at(250.0), true);
        assert_eq!(change.event_id(), Some("b"));
        assert_eq!(change.event.unwrap().offset_secs(at(250.0)), 0.0);
    }

    #[test]
    fn brute_force_matches_binary_search() {
        let catalog = EventCatalog::from_raw(vec![
            RawEvent::closed("a", "car", 10.0, 20.0),
            RawEvent::closed("b", "car", 20.0, 25.0),
            RawEvent::closed("c", "car", 40.0, 41.0),
            RawEvent::closed("d", "car", 60.0, 90.0),
        ]);
        let mut marker = 0.0;
        while marker < 100.0 {
            let expected = catalog.events().iter().find(|e| e.contains(at(marker)));
            assert_eq!(resolve(at(marker), &catalog), expected, "marker {}", marker);
            marker += 0.5;
        }
    }
}
