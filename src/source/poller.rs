//! Background catalog refresh.
//!
//! Fetches on a dedicated thread and sends results back via a channel.
//! A fetch whose catalog equals the previous one is not sent, so the UI
//! only re-resolves when data actually changed.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Utc;

use super::{EventQuery, EventSource, SourceError};
use crate::event::{CatalogStats, EventCatalog};

/// Result of one poll.
#[derive(Debug)]
pub enum CatalogUpdate {
    /// A catalog that differs from the previously sent one
    Catalog {
        catalog: EventCatalog,
        stats: CatalogStats,
    },
    /// The fetch failed; the previous catalog stays in use
    Failed(String),
}

/// Query parameters for each poll. `after` is recomputed every cycle.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub camera: Option<String>,
    pub lookback_hours: u32,
    pub limit: Option<u32>,
    pub interval: Duration,
}

/// Handle to the polling thread. Dropping it stops the thread.
pub struct CatalogPoller {
    updates: Receiver<CatalogUpdate>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CatalogPoller {
    /// Start polling `source`. The first fetch happens immediately.
    pub fn spawn(source: Box<dyn EventSource>, settings: PollSettings) -> Self {
        let (update_tx, updates) = mpsc::channel();
        let (stop, stop_rx) = mpsc::channel();
        let handle = thread::spawn(move || poll_loop(source, settings, update_tx, stop_rx));
        Self {
            updates,
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Next pending update, without blocking.
    pub fn try_next(&self) -> Option<CatalogUpdate> {
        self.updates.try_recv().ok()
    }

    /// Wait up to `timeout` for the next update.
    pub fn next_timeout(&self, timeout: Duration) -> Option<CatalogUpdate> {
        self.updates.recv_timeout(timeout).ok()
    }
}

impl Drop for CatalogPoller {
    fn drop(&mut self) {
        // Closing the stop channel wakes the worker out of its wait.
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Fetch once and normalize.
pub fn fetch_catalog(
    source: &dyn EventSource,
    query: &EventQuery,
) -> Result<(EventCatalog, CatalogStats), SourceError> {
    let records = source.fetch(query)?;
    Ok(EventCatalog::normalize(records))
}

fn poll_loop(
    source: Box<dyn EventSource>,
    settings: PollSettings,
    update_tx: Sender<CatalogUpdate>,
    stop_rx: Receiver<()>,
) {
    let mut last: Option<EventCatalog> = None;
    let mut last_failure: Option<String> = None;
    loop {
        let query = EventQuery::recent(settings.camera.as_deref(), settings.lookback_hours, Utc::now())
            .with_limit(settings.limit);

        let update = match fetch_catalog(source.as_ref(), &query) {
            Ok((catalog, stats)) => {
                last_failure = None;
                if last.as_ref() == Some(&catalog) {
                    None
                } else {
                    last = Some(catalog.clone());
                    Some(CatalogUpdate::Catalog { catalog, stats })
                }
            }
            Err(e) => {
                let message = e.to_string();
                if last_failure.as_deref() == Some(message.as_str()) {
                    None
                } else {
                    tracing::warn!(source = %source.describe(), "event fetch failed: {}", message);
                    last_failure = Some(message.clone());
                    Some(CatalogUpdate::Failed(message))
                }
            }
        };

        if let Some(update) = update {
            // Receiver gone: the viewer exited.
            if update_tx.send(update).is_err() {
                return;
            }
        }

        match stop_rx.recv_timeout(settings.interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}
