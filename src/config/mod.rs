//! Configuration management
//!
//! Settings live in `<config dir>/camhist/config.toml`. Every field has a
//! default, so a partial (or missing) file is always valid.

mod migrate;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use migrate::{migrate_config, MigrateResult};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Event API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the NVR (events endpoint and media paths hang off it)
    #[serde(default = "default_host")]
    pub host: String,
    /// Camera to review; empty means all cameras
    #[serde(default)]
    pub camera: String,
    /// How far back to list events (0 = no limit)
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u32,
    /// Seconds between catalog refreshes
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Maximum events per fetch (0 = server default)
    #[serde(default)]
    pub limit: u32,
}

fn default_host() -> String {
    "http://localhost:5000".to_string()
}

fn default_lookback_hours() -> u32 {
    24
}

fn default_poll_interval_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            camera: String::new(),
            lookback_hours: default_lookback_hours(),
            poll_interval_secs: default_poll_interval_secs(),
            limit: 0,
        }
    }
}

impl ApiConfig {
    pub fn camera(&self) -> Option<&str> {
        (!self.camera.is_empty()).then_some(self.camera.as_str())
    }

    pub fn limit(&self) -> Option<u32> {
        (self.limit > 0).then_some(self.limit)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

/// Viewer playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Seconds moved by the step-seek keys
    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: i64,
    /// Advance the timeline marker while video plays
    #[serde(default)]
    pub follow_playback: bool,
    /// UI tick length in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Ticks the simulated element buffers before it can play
    #[serde(default = "default_load_delay_ticks")]
    pub load_delay_ticks: u32,
}

fn default_seek_step_secs() -> i64 {
    5
}

fn default_tick_ms() -> u64 {
    100
}

fn default_load_delay_ticks() -> u32 {
    3
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: default_seek_step_secs(),
            follow_playback: false,
            tick_ms: default_tick_ms(),
            load_delay_ticks: default_load_delay_ticks(),
        }
    }
}

impl PlaybackConfig {
    /// Step-seek length in seconds, between one second and one day.
    pub fn seek_step(&self) -> i64 {
        self.seek_step_secs.clamp(1, 86_400)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when CAMHIST_LOG is unset (e.g. "warn", "camhist=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file; empty logs to stderr (the interactive viewer logs nothing then)
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

impl LoggingConfig {
    pub fn file(&self) -> Option<PathBuf> {
        (!self.file.is_empty()).then(|| PathBuf::from(expand_home(&self.file)))
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).display().to_string(),
        _ => path.to_string(),
    }
}

impl Config {
    /// Path of the configuration file.
    ///
    /// `CAMHIST_CONFIG` overrides the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("CAMHIST_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("camhist").join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file is missing.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save to the configuration file, creating its directory.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
