//! Events endpoint query.

use chrono::{DateTime, Duration, Utc};

/// Filter for the events list: one camera, events after a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub camera: Option<String>,
    /// Only events starting after this epoch second
    pub after: Option<i64>,
    pub limit: Option<u32>,
}

impl EventQuery {
    /// Events for `camera` from the last `lookback_hours` before `now`.
    /// Zero hours means no time filter.
    pub fn recent(camera: Option<&str>, lookback_hours: u32, now: DateTime<Utc>) -> Self {
        let after = (lookback_hours > 0)
            .then(|| (now - Duration::hours(i64::from(lookback_hours))).timestamp());
        Self {
            camera: camera.map(str::to_string),
            after,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Query parameters as key/value pairs, in a stable order. Empty when
    /// no filter is set.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(camera) = &self.camera {
            pairs.push(("camera", camera.clone()));
        }
        if let Some(after) = self.after {
            pairs.push(("after", after.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}
