//! Recorded camera events and their wire representation.
//!
//! An event is one closed detection segment (`[start, end)`) recorded by a
//! camera. The API delivers raw records with epoch-second timestamps; the
//! [`catalog`] module normalizes them into an ordered [`EventCatalog`].

pub mod catalog;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub use catalog::{CatalogStats, EventCatalog};

/// An event record as returned by the events endpoint.
///
/// Every field is optional so a single malformed record never fails
/// deserialization of the whole list. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub camera: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Epoch seconds (fractional)
    #[serde(default)]
    pub start_time: Option<f64>,
    /// Epoch seconds (fractional), absent while the event is still in progress
    #[serde(default)]
    pub end_time: Option<f64>,
}

impl RawEvent {
    /// Build a closed raw record (mostly useful for tests and fixtures).
    pub fn closed(id: &str, label: &str, start: f64, end: f64) -> Self {
        Self {
            id: Some(id.to_string()),
            camera: None,
            label: Some(label.to_string()),
            start_time: Some(start),
            end_time: Some(end),
        }
    }

    /// Build an open (in-progress) raw record.
    pub fn open(id: &str, label: &str, start: f64) -> Self {
        Self {
            end_time: None,
            ..Self::closed(id, label, start, start)
        }
    }
}

/// A closed recorded segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event identifier, keys the poster and manifest URLs
    pub id: String,
    /// Camera name (empty when the source did not report one)
    pub camera: String,
    /// Detection label ("person", "car", ...)
    pub label: String,
    /// Inclusive start of the segment
    pub start: DateTime<Utc>,
    /// Exclusive end of the segment
    pub end: DateTime<Utc>,
}

impl Event {
    /// Whether `at` lies inside `[start, end)`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    /// Segment length.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Segment length in seconds.
    pub fn duration_secs(&self) -> f64 {
        duration_to_secs(self.duration())
    }

    /// Offset of `at` into this event's video, clamped to `[0, duration]`.
    pub fn offset_secs(&self, at: DateTime<Utc>) -> f64 {
        duration_to_secs(at - self.start).clamp(0.0, self.duration_secs())
    }

    /// Absolute time of a video offset inside this event.
    pub fn time_at_offset(&self, offset_secs: f64) -> DateTime<Utc> {
        self.start + secs_to_duration(offset_secs.clamp(0.0, self.duration_secs()))
    }
}

impl From<&Event> for RawEvent {
    fn from(event: &Event) -> Self {
        Self {
            id: Some(event.id.clone()),
            camera: (!event.camera.is_empty()).then(|| event.camera.clone()),
            label: Some(event.label.clone()),
            start_time: Some(timestamp_to_epoch(event.start)),
            end_time: Some(timestamp_to_epoch(event.end)),
        }
    }
}

/// Convert fractional epoch seconds into a UTC timestamp.
///
/// Whole seconds and the fractional part are converted separately so
/// microsecond precision survives for present-day epoch values.
/// Returns `None` for non-finite or out-of-range input.
pub fn timestamp_from_epoch(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let mut nanos = ((secs - whole) * 1_000_000.0).round() as u32 * 1_000;
    let mut whole = whole as i64;
    if nanos >= 1_000_000_000 {
        whole += 1;
        nanos -= 1_000_000_000;
    }
    Utc.timestamp_opt(whole, nanos).single()
}

/// Convert a UTC timestamp into fractional epoch seconds.
pub fn timestamp_to_epoch(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_micros()) / 1_000_000.0
}

/// Seconds (fractional) in a chrono duration, at microsecond granularity.
pub fn duration_to_secs(d: Duration) -> f64 {
    match d.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => d.num_seconds() as f64,
    }
}

/// Chrono duration from fractional seconds, at microsecond granularity.
pub fn secs_to_duration(secs: f64) -> Duration {
    Duration::microseconds((secs * 1_000_000.0).round() as i64)
}
