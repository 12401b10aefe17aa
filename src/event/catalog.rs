//! Normalization of fetched records into the ordered event catalog.
//!
//! The events endpoint returns newest-first and includes events that are
//! still in progress. The catalog keeps only closed, well-formed events,
//! sorted ascending by start time.

use chrono::{DateTime, Utc};

use super::{timestamp_from_epoch, Event, RawEvent};

/// Counters describing what normalization dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    /// Records received from the source
    pub received: usize,
    /// In-progress records (no end time)
    pub open: usize,
    /// Records missing an id or a usable start/end time
    pub malformed: usize,
}

impl CatalogStats {
    /// Number of records that made it into the catalog.
    pub fn kept(&self) -> usize {
        self.received - self.open - self.malformed
    }
}

/// Ordered, closed-segment-only collection of events.
///
/// Immutable once built; a refresh replaces the whole catalog. Events are
/// expected not to overlap: timeline resolution only looks at the latest
/// event starting at or before the marker, so a marker inside an earlier,
/// longer event that is overlapped by a later one resolves to the later one
/// or to nothing. Overlaps are counted and logged by [`EventCatalog::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    /// An empty catalog (the state while data is loading).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize raw records, discarding the drop statistics.
    pub fn from_raw(records: Vec<RawEvent>) -> Self {
        Self::normalize(records).0
    }

    /// Normalize raw records into a catalog.
    ///
    /// Open events and malformed records are dropped rather than failing the
    /// whole batch. The result is sorted ascending by start time.
    pub fn normalize(records: Vec<RawEvent>) -> (Self, CatalogStats) {
        let mut stats = CatalogStats {
            received: records.len(),
            ..CatalogStats::default()
        };

        let mut events: Vec<Event> = Vec::with_capacity(records.len());
        for record in records {
            if record.end_time.is_none() {
                stats.open += 1;
                continue;
            }
            match to_event(record) {
                Some(event) => events.push(event),
                None => stats.malformed += 1,
            }
        }

        // Newest-first input: reversing first makes the stable sort a no-op
        // in the common case while still tolerating out-of-order records.
        events.reverse();
        events.sort_by_key(|e| e.start);

        if stats.open > 0 || stats.malformed > 0 {
            tracing::debug!(
                open = stats.open,
                malformed = stats.malformed,
                kept = events.len(),
                "dropped event records during normalization"
            );
        }

        let catalog = Self { events };
        let overlapping = catalog.overlapping();
        if overlapping > 0 {
            tracing::warn!(
                overlapping,
                "catalog has overlapping events; the later event wins inside an overlap"
            );
        }

        (catalog, stats)
    }

    /// Number of events that start before an earlier event has ended.
    pub fn overlapping(&self) -> usize {
        let mut latest_end: Option<DateTime<Utc>> = None;
        let mut count = 0;
        for event in &self.events {
            if latest_end.is_some_and(|end| event.start < end) {
                count += 1;
            }
            latest_end = latest_end.max(Some(event.end));
        }
        count
    }

    /// Build directly from already-closed events (sorted on the way in).
    pub fn from_events(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.start);
        Self { events }
    }

    /// Events in ascending start order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Look up an event by id.
    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Time span covered by the catalog: first start to last end.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.events.first()?;
        let end = self.events.iter().map(|e| e.end).max()?;
        Some((first.start, end))
    }
}

fn to_event(record: RawEvent) -> Option<Event> {
    let id = record.id.filter(|id| !id.is_empty())?;
    let start = timestamp_from_epoch(record.start_time?)?;
    let end = timestamp_from_epoch(record.end_time?)?;
    if end < start {
        return None;
    }
    Some(Event {
        id,
        camera: record.camera.unwrap_or_default(),
        label: record.label.unwrap_or_default(),
        start,
        end,
    })
}
