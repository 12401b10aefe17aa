//! Per-event media resources.
//!
//! Every event has a poster image and a streaming manifest at deterministic
//! paths keyed only by the event id.

use std::fmt;

/// The poster and manifest URLs of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    /// Event the source belongs to
    pub event_id: String,
    /// Poster (thumbnail) image
    pub poster_url: String,
    /// HLS manifest
    pub manifest_url: String,
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.manifest_url)
    }
}

/// Builds media URLs relative to an API host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPaths {
    host: String,
}

impl MediaPaths {
    /// Create for an API host such as `http://nvr.local:5000`.
    ///
    /// A trailing slash is ignored.
    pub fn new(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
        }
    }

    pub fn poster_url(&self, event_id: &str) -> String {
        format!("{}/api/events/{}/thumbnail.jpg", self.host, event_id)
    }

    pub fn manifest_url(&self, event_id: &str) -> String {
        format!("{}/vod/event/{}/index.m3u8", self.host, event_id)
    }

    /// Both URLs for an event.
    pub fn source_for(&self, event_id: &str) -> MediaSource {
        MediaSource {
            event_id: event_id.to_string(),
            poster_url: self.poster_url(event_id),
            manifest_url: self.manifest_url(event_id),
        }
    }
}
