//! Events from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use super::{EventQuery, EventSource, SourceError};
use crate::event::RawEvent;

/// Reads a JSON array of event records, as saved from the events endpoint.
///
/// The query's camera and `after` filters are applied locally so a saved
/// dump behaves like the live endpoint.
#[derive(Debug, Clone)]
pub struct FileEventSource {
    path: PathBuf,
}

impl FileEventSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for FileEventSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self, query: &EventQuery) -> Result<Vec<RawEvent>, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::FileNotFound {
                path: self.path.clone(),
            });
        }
        let content = fs::read_to_string(&self.path)?;
        let records: Vec<RawEvent> = serde_json::from_str(&content)?;

        let mut records: Vec<RawEvent> = records
            .into_iter()
            .filter(|r| match (&query.camera, &r.camera) {
                (Some(wanted), Some(camera)) => wanted == camera,
                _ => true,
            })
            .filter(|r| match (query.after, r.start_time) {
                (Some(after), Some(start)) => start > after as f64,
                _ => true,
            })
            .collect();
        if let Some(limit) = query.limit {
            records.truncate(limit as usize);
        }
        Ok(records)
    }
}
