//! End-to-end viewer scenarios over the fixture catalog and a simulated element

use chrono::{DateTime, Utc};

use camhist::event::timestamp_from_epoch;
use camhist::media::MediaPaths;
use camhist::playback::{
    MediaElement, MediaEvent, MediaEventKind, Phase, PlaybackController, PlaybackReport,
};
use camhist::source::{fetch_catalog, EventQuery, FileEventSource};
use camhist::timeline::Scrubber;
use camhist::tui::SimulatedElement;
use camhist::viewer::HeaderView;
use camhist::{EventCatalog, HistoryViewer, ViewerOptions};

use crate::helpers::fixture;

fn at(secs: f64) -> DateTime<Utc> {
    timestamp_from_epoch(secs).unwrap()
}

fn fixture_catalog() -> EventCatalog {
    let source = FileEventSource::new(fixture("events.json"));
    let query = EventQuery::recent(None, 0, Utc::now());
    let (catalog, _stats) = fetch_catalog(&source, &query).unwrap();
    catalog
}

/// A viewer whose element buffers for two ticks before it can play.
fn viewer(follow_playback: bool) -> HistoryViewer<SimulatedElement> {
    let catalog = fixture_catalog();
    let mut element = SimulatedElement::new(2);
    element.set_durations(
        catalog
            .events()
            .iter()
            .map(|e| (e.id.clone(), e.duration_secs())),
    );
    let controller = PlaybackController::new(element, MediaPaths::new("http://nvr:5000"));
    let mut viewer = HistoryViewer::new(controller, at(0.0), ViewerOptions { follow_playback });
    viewer.set_catalog(catalog);
    viewer
}

/// Advance the element and feed everything it emitted back to the viewer.
fn tick(viewer: &mut HistoryViewer<SimulatedElement>, secs: f64) -> Vec<PlaybackReport> {
    viewer.controller_mut().element_mut().tick(secs);
    let mut reports = Vec::new();
    loop {
        let events = viewer.controller_mut().element_mut().drain_events();
        if events.is_empty() {
            return reports;
        }
        for event in events {
            reports.extend(viewer.on_media_event(event));
        }
    }
}

fn active_id(viewer: &HistoryViewer<SimulatedElement>) -> Option<String> {
    viewer.active_event().map(|e| e.id.clone())
}

#[test]
fn first_catalog_selects_the_latest_event() {
    let viewer = viewer(false);
    assert_eq!(viewer.marker(), at(1_700_000_300.5));
    assert_eq!(active_id(&viewer).as_deref(), Some("1700000300.5-c"));
    assert_eq!(viewer.controller().phase(), Phase::Loading);
    assert_eq!(
        viewer.controller().source().unwrap().manifest_url,
        "http://nvr:5000/vod/event/1700000300.5-c/index.m3u8"
    );
}

#[test]
fn dragging_across_events_loads_only_on_release() {
    let mut viewer = viewer(false);
    let mut scrubber = Scrubber::new();
    let loaded = viewer.controller().state().generation;

    for secs in [1_700_000_025.0, 1_700_000_070.0, 1_700_000_130.0] {
        let change = scrubber.drag(viewer.catalog(), at(secs));
        viewer.on_timeline_change(change);
        assert_eq!(viewer.marker(), at(secs));
        assert_eq!(viewer.controller().state().generation, loaded);
        assert_eq!(viewer.controller().state().event_id(), Some("1700000300.5-c"));
    }
    assert!(matches!(viewer.header(), HeaderView::Event(e) if e.id == "1700000100.0-b"));

    let change = scrubber.release(viewer.catalog()).unwrap();
    viewer.on_timeline_change(change);
    assert_eq!(viewer.controller().state().generation, loaded + 1);
    assert_eq!(viewer.controller().state().event_id(), Some("1700000100.0-b"));
    assert_eq!(viewer.playback().offset_secs, Some(30.0));

    tick(&mut viewer, 0.1);
    assert_eq!(viewer.controller().phase(), Phase::Loading);
    tick(&mut viewer, 0.1);
    assert_eq!(viewer.controller().phase(), Phase::ReadyPaused);
    assert_eq!(viewer.controller().element().current_time(), 30.0);
    assert!(viewer.controller().state().poster_ready);
}

#[test]
fn settling_in_a_gap_clears_the_video() {
    let mut viewer = viewer(false);
    viewer.seek_to(at(1_700_000_070.0));

    assert_eq!(viewer.header(), HeaderView::NoEvent);
    assert_eq!(viewer.playback().offset_secs, None);
    assert_eq!(viewer.controller().phase(), Phase::Empty);
    assert!(viewer.controller().element().source().is_none());
}

#[test]
fn play_follows_the_video_to_the_end() {
    let mut viewer = viewer(true);
    viewer.seek_to(at(1_700_000_130.0));
    viewer.set_playing(true);
    assert_eq!(viewer.controller().phase(), Phase::Loading);

    let reports = [tick(&mut viewer, 0.1), tick(&mut viewer, 0.1)].concat();
    assert!(reports.contains(&PlaybackReport::Playing));
    assert_eq!(viewer.controller().phase(), Phase::ReadyPlaying);

    tick(&mut viewer, 10.0);
    assert_eq!(viewer.marker(), at(1_700_000_140.0));
    assert!(viewer.is_playing());

    tick(&mut viewer, 10.0);
    let reports = tick(&mut viewer, 10.0);
    assert_eq!(
        reports,
        vec![PlaybackReport::TimeUpdate(60.0), PlaybackReport::Paused]
    );
    assert!(!viewer.is_playing());
    assert_eq!(viewer.controller().phase(), Phase::ReadyPaused);
    assert_eq!(viewer.marker(), at(1_700_000_160.0));
}

#[test]
fn without_follow_the_marker_stays_put_while_playing() {
    let mut viewer = viewer(false);
    viewer.seek_to(at(1_700_000_010.0));
    viewer.set_playing(true);
    tick(&mut viewer, 0.1);
    tick(&mut viewer, 0.1);
    tick(&mut viewer, 5.0);

    assert!(viewer.is_playing());
    assert_eq!(viewer.marker(), at(1_700_000_010.0));
    assert_eq!(viewer.controller().element().current_time(), 15.0);
}

#[test]
fn events_from_a_superseded_source_are_ignored() {
    let mut viewer = viewer(false);
    let old = viewer.controller().state().generation;
    viewer.seek_to(at(1_700_000_010.0));
    let before = viewer.controller().state().clone();

    let late = MediaEvent::new(old, MediaEventKind::Error("decode failed".to_string()));
    assert_eq!(viewer.on_media_event(late), None);
    let late = MediaEvent::new(old, MediaEventKind::CanPlay);
    assert_eq!(viewer.on_media_event(late), None);
    assert_eq!(viewer.controller().state(), &before);
}

#[test]
fn refresh_keeps_the_loaded_event() {
    let mut viewer = viewer(false);
    tick(&mut viewer, 0.1);
    tick(&mut viewer, 0.1);
    let generation = viewer.controller().state().generation;

    viewer.set_catalog(fixture_catalog());
    assert_eq!(viewer.controller().state().generation, generation);
    assert_eq!(viewer.controller().phase(), Phase::ReadyPaused);
}

#[test]
fn event_navigation_walks_the_fixture() {
    let mut viewer = viewer(false);
    assert!(viewer.previous_event());
    assert_eq!(active_id(&viewer).as_deref(), Some("1700000100.0-b"));
    assert!(viewer.previous_event());
    assert_eq!(active_id(&viewer).as_deref(), Some("1700000000.0-a"));
    assert!(!viewer.previous_event());
    assert!(viewer.next_event());
    assert!(viewer.next_event());
    assert_eq!(active_id(&viewer).as_deref(), Some("1700000300.5-c"));
    assert!(!viewer.next_event());
}
