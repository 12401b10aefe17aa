//! Text formatting shared by the CLI and the terminal viewer.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::event::{timestamp_from_epoch, Event};
use crate::viewer::HeaderView;

/// Header text shown when the marker is not inside any event.
pub const NO_EVENT: &str = "No event found";

/// Format a duration in seconds to MM:SS format.
///
/// Fractional seconds are truncated; negative values format as zero.
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the time of day only.
pub fn format_clock(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// One-line description of an event.
pub fn event_line(event: &Event) -> String {
    let label = if event.label.is_empty() {
        "event"
    } else {
        event.label.as_str()
    };
    let mut line = label.to_string();
    if !event.camera.is_empty() {
        line.push_str(&format!(" @ {}", event.camera));
    }
    line.push_str(&format!(
        "  {} - {} ({})",
        format_timestamp(event.start),
        format_clock(event.end),
        format_duration(event.duration_secs())
    ));
    line
}

/// Header text for the current marker position.
pub fn header_text(view: HeaderView<'_>) -> String {
    match view {
        HeaderView::NoEvent => NO_EVENT.to_string(),
        HeaderView::Event(event) => event_line(event),
    }
}

/// Parse a marker time given as RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC),
/// or fractional epoch seconds.
pub fn parse_time(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(secs) = input.parse::<f64>() {
        return timestamp_from_epoch(secs);
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
