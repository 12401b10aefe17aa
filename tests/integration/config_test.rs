//! Integration tests for configuration loading and the config command

use std::fs;

use tempfile::TempDir;

use camhist::Config;

use crate::helpers::{fixture, run_camhist};

#[test]
fn config_show_prints_effective_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[api]\ncamera = \"garage\"\n").unwrap();

    let (stdout, _stderr, exit_code) = run_camhist(&path, &["config", "show"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("camera = \"garage\""));
    assert!(stdout.contains("seek_step_secs = 5"));
    assert!(stdout.contains(&path.display().to_string()));
}

#[test]
fn command_line_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[api]\nhost = \"http://from-file:5000\"\n").unwrap();

    let (stdout, _stderr, _) = run_camhist(&path, &["config", "show", "--host", "http://cli:1"]);
    assert!(stdout.contains("host = \"http://cli:1\""));
}

#[test]
fn broken_config_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[api\nhost =").unwrap();

    let events = fixture("events.json").display().to_string();
    let (_stdout, stderr, exit_code) = run_camhist(&path, &["events", "--file", &events]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to parse config file"));
    assert!(stderr.contains("config.toml"));
}

#[test]
fn migrate_yes_adds_missing_sections_and_keeps_comments() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "# home nvr\n[api]\nhost = \"http://nvr:5000\"\n").unwrap();

    let (stdout, _stderr, exit_code) = run_camhist(&path, &["config", "migrate", "--yes"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("missing field(s)"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# home nvr"));
    assert!(content.contains("[playback]"));
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.host, "http://nvr:5000");
    assert_eq!(config.playback.seek_step_secs, 5);

    let (stdout, _stderr, _) = run_camhist(&path, &["config", "migrate", "--yes"]);
    assert!(stdout.contains("already up to date"));
}

#[test]
fn migrate_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let (_stdout, _stderr, exit_code) = run_camhist(&path, &["config", "migrate", "-y"]);
    assert_eq!(exit_code, 0);
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn migrate_without_yes_in_non_interactive_mode_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[api]\n").unwrap();

    let (stdout, _stderr, exit_code) = run_camhist(&path, &["config", "migrate"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("No changes made"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "[api]\n");
}
