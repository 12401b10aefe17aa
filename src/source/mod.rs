//! Event sources: where raw event records come from.
//!
//! - [`HttpEventSource`]: the NVR events endpoint
//! - [`FileEventSource`]: a JSON array on disk (offline review, fixtures)
//!
//! [`CatalogPoller`] refreshes a source on an interval from a background
//! thread and hands normalized catalogs to the UI thread.

mod error;
mod file;
mod http;
mod poller;
mod query;

pub use error::SourceError;
pub use file::FileEventSource;
pub use http::HttpEventSource;
pub use poller::{fetch_catalog, CatalogPoller, CatalogUpdate, PollSettings};
pub use query::EventQuery;

use crate::event::RawEvent;

/// Something that can list raw event records.
pub trait EventSource: Send {
    /// Human-readable description for logs and errors.
    fn describe(&self) -> String;

    /// Fetch the records matching `query`.
    fn fetch(&self, query: &EventQuery) -> Result<Vec<RawEvent>, SourceError>;
}
