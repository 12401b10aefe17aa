//! Integration tests for event sources and the background poller

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use camhist::source::{
    fetch_catalog, CatalogPoller, CatalogUpdate, EventQuery, EventSource, FileEventSource,
    PollSettings, SourceError,
};

use crate::helpers::{fixture, load_fixture, temp_fixture};

fn everything() -> EventQuery {
    EventQuery::recent(None, 0, Utc::now())
}

fn settings() -> PollSettings {
    PollSettings {
        camera: None,
        lookback_hours: 0,
        limit: None,
        interval: Duration::from_millis(20),
    }
}

fn ids(update: &CatalogUpdate) -> Vec<String> {
    match update {
        CatalogUpdate::Catalog { catalog, .. } => {
            catalog.events().iter().map(|e| e.id.clone()).collect()
        }
        CatalogUpdate::Failed(message) => panic!("unexpected failure: {}", message),
    }
}

/// Replace `path` in one step so the poller never reads a half-written file.
fn replace(path: &Path, content: &str) {
    let staging = path.with_extension("tmp");
    fs::write(&staging, content).unwrap();
    fs::rename(&staging, path).unwrap();
}

#[test]
fn fixture_catalog_skips_open_and_malformed_records() {
    let source = FileEventSource::new(fixture("events.json"));
    let (catalog, stats) = fetch_catalog(&source, &everything()).unwrap();

    assert_eq!(stats.received, 5);
    assert_eq!(stats.open, 1);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.kept(), 3);
    let ids: Vec<&str> = catalog.events().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1700000000.0-a", "1700000100.0-b", "1700000300.5-c"]);
}

#[test]
fn camera_filter_applies_to_file_source() {
    let source = FileEventSource::new(fixture("events.json"));
    let query = EventQuery::recent(Some("driveway"), 0, Utc::now());
    let (catalog, _stats) = fetch_catalog(&source, &query).unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.events()[0].camera, "driveway");
}

#[test]
fn lookback_excludes_old_fixture_events() {
    let source = FileEventSource::new(fixture("events.json"));
    let query = EventQuery::recent(None, 24, Utc::now());
    let (catalog, stats) = fetch_catalog(&source, &query).unwrap();

    assert!(catalog.is_empty());
    assert_eq!(stats.received, 0);
}

#[test]
fn missing_file_is_a_typed_error() {
    let source = FileEventSource::new("/nonexistent/events.json");
    assert!(matches!(
        source.fetch(&everything()),
        Err(SourceError::FileNotFound { .. })
    ));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let (_dir, path) = temp_fixture("events.json");
    fs::write(&path, "{ not json").unwrap();
    let source = FileEventSource::new(&path);
    assert!(matches!(
        source.fetch(&everything()),
        Err(SourceError::Parse(_))
    ));
}

#[test]
fn poller_delivers_changes_once() {
    let (_dir, path) = temp_fixture("events.json");
    let poller = CatalogPoller::spawn(Box::new(FileEventSource::new(&path)), settings());

    let first = poller
        .next_timeout(Duration::from_secs(5))
        .expect("initial catalog");
    assert_eq!(ids(&first).len(), 3);

    // Unchanged file: nothing new across several poll cycles.
    assert!(poller.next_timeout(Duration::from_millis(100)).is_none());

    replace(
        &path,
        r#"[{"id": "e", "camera": "front", "label": "cat", "start_time": 1700000500.0, "end_time": 1700000510.0}]"#,
    );
    let second = poller
        .next_timeout(Duration::from_secs(5))
        .expect("refreshed catalog");
    assert_eq!(ids(&second), vec!["e".to_string()]);
}

#[test]
fn poller_reports_a_failure_once_and_recovers() {
    let (_dir, path) = temp_fixture("events.json");
    let poller = CatalogPoller::spawn(Box::new(FileEventSource::new(&path)), settings());
    poller
        .next_timeout(Duration::from_secs(5))
        .expect("initial catalog");

    fs::remove_file(&path).unwrap();
    match poller.next_timeout(Duration::from_secs(5)) {
        Some(CatalogUpdate::Failed(message)) => assert!(message.contains("not found")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(poller.next_timeout(Duration::from_millis(100)).is_none());

    // Same contents as before the failure: no new catalog to report.
    replace(&path, &load_fixture("events.json"));
    assert!(poller.next_timeout(Duration::from_millis(200)).is_none());
}
