//! Integration tests for the events and resolve commands (CLI)

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, run_camhist};

/// Run with a config path that does not exist, so defaults apply.
fn run(args: &[&str]) -> (String, String, i32) {
    let dir = TempDir::new().unwrap();
    run_camhist(&dir.path().join("config.toml"), args)
}

fn events_file() -> String {
    fixture("events.json").display().to_string()
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run(&["--help"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("scrub through"));
    for sub in ["events", "resolve", "view", "config", "completions"] {
        assert!(stdout.contains(sub), "missing {} in help", sub);
    }
}

#[test]
fn resolve_without_time_is_usage_error() {
    let (_stdout, stderr, exit_code) = run(&["resolve"]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<TIME>"));
}

// ============================================================================
// events
// ============================================================================

#[test]
fn events_lists_closed_events_oldest_first() {
    let (stdout, stderr, exit_code) = run(&["events", "--file", &events_file()]);
    assert_eq!(exit_code, 0, "stderr: {}", stderr);

    let a = stdout.find("1700000000.0-a").expect("event a listed");
    let b = stdout.find("1700000100.0-b").expect("event b listed");
    let c = stdout.find("1700000300.5-c").expect("event c listed");
    assert!(a < b && b < c);
    assert!(!stdout.contains("1700000400.0-d"), "open event must be skipped");
    assert!(stderr.contains("3 events (1 in progress, 1 malformed skipped)"));
}

#[test]
fn events_json_is_sorted_wire_records() {
    let (stdout, _stderr, exit_code) = run(&["events", "--json", "--file", &events_file()]);
    assert_eq!(exit_code, 0);

    let records: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    let starts: Vec<f64> = records
        .iter()
        .map(|r| r["start_time"].as_f64().unwrap())
        .collect();
    assert_eq!(starts, vec![1_700_000_000.0, 1_700_000_100.0, 1_700_000_300.5]);
    assert_eq!(records[1]["camera"], "driveway");
}

#[test]
fn events_camera_filter() {
    let (stdout, _stderr, exit_code) =
        run(&["events", "--file", &events_file(), "--camera", "driveway"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("1700000100.0-b"));
    assert!(!stdout.contains("1700000000.0-a"));
}

#[test]
fn events_missing_file_fails() {
    let (_stdout, stderr, exit_code) = run(&["events", "--file", "/nonexistent/events.json"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Events file not found"));
}

#[test]
fn events_unreachable_host_fails_with_context() {
    let (_stdout, stderr, exit_code) = run(&["events", "--host", "http://127.0.0.1:9"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to list events from http://127.0.0.1:9"));
}

// ============================================================================
// resolve
// ============================================================================

#[test]
fn resolve_inside_event_prints_offset_and_media() {
    let (stdout, _stderr, exit_code) = run(&["resolve", "1700000025", "--file", &events_file()]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("person @ front"));
    assert!(stdout.contains("offset: 00:25"));
    assert!(stdout.contains("http://localhost:5000/vod/event/1700000000.0-a/index.m3u8"));
    assert!(stdout.contains("http://localhost:5000/api/events/1700000000.0-a/thumbnail.jpg"));
}

#[test]
fn resolve_accepts_rfc3339() {
    let (stdout, _stderr, exit_code) =
        run(&["resolve", "2023-11-14T22:13:45Z", "--file", &events_file()]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("offset: 00:25"));
}

#[test]
fn resolve_in_gap_reports_no_event() {
    let (stdout, _stderr, exit_code) = run(&["resolve", "1700000070", "--file", &events_file()]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), "No event found");
}

#[test]
fn resolve_at_event_end_is_a_gap() {
    let (stdout, _stderr, _) = run(&["resolve", "1700000050", "--file", &events_file()]);
    assert_eq!(stdout.trim(), "No event found");
    let (stdout, _stderr, _) = run(&["resolve", "1700000100", "--file", &events_file()]);
    assert!(stdout.contains("car @ driveway"));
    assert!(stdout.contains("offset: 00:00"));
}

#[test]
fn resolve_outside_catalog_reports_no_event() {
    let (stdout, _stderr, _) = run(&["resolve", "1600000000", "--file", &events_file()]);
    assert_eq!(stdout.trim(), "No event found");
}

#[test]
fn resolve_uses_host_override_for_media() {
    Command::cargo_bin("camhist")
        .unwrap()
        .env("CAMHIST_CONFIG", "/nonexistent/camhist/config.toml")
        .args(["resolve", "1700000310", "--file", &events_file()])
        .args(["--host", "http://nvr.lan:5000/"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "http://nvr.lan:5000/vod/event/1700000300.5-c/index.m3u8",
        ))
        .stdout(predicate::str::contains("offset: 00:09"));
}

#[test]
fn resolve_rejects_garbage_time() {
    Command::cargo_bin("camhist")
        .unwrap()
        .env("CAMHIST_CONFIG", "/nonexistent/camhist/config.toml")
        .args(["resolve", "yesterday", "--file", &events_file()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid time 'yesterday'"));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn completions_for_bash() {
    let (stdout, _stderr, exit_code) = run(&["completions", "bash"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("camhist"));
    assert!(stdout.contains("resolve"));
}
