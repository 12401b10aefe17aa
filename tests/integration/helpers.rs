//! Shared helpers for integration tests

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Directory holding the test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path to a fixture file.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Read a fixture file to a string.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).expect("fixture should be readable")
}

/// Copy a fixture into a fresh temp directory; returns the directory (keep it
/// alive) and the copy's path.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(name);
    fs::write(&path, load_fixture(name)).expect("copy fixture");
    (dir, path)
}

/// Run camhist with an isolated config file; returns (stdout, stderr, exit code).
pub fn run_camhist(config_path: &std::path::Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_camhist"))
        .args(args)
        .env("CAMHIST_CONFIG", config_path)
        .env_remove("CAMHIST_LOG")
        .output()
        .expect("Failed to execute camhist");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}
