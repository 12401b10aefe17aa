//! Event source errors.

use std::path::PathBuf;

/// Errors that can occur while fetching event records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Events file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read events file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid events JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}
