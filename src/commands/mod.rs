//! Subcommand handlers

pub mod config;
pub mod events;
pub mod resolve;
pub mod view;

use chrono::Utc;

use camhist::cli::Cli;
use camhist::source::{EventQuery, EventSource, FileEventSource, HttpEventSource, PollSettings};
use camhist::Config;

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(host) = &cli.host {
        config.api.host = host.clone();
    }
    if let Some(camera) = &cli.camera {
        config.api.camera = camera.clone();
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = path.display().to_string();
    }
}

/// The source selected by `--file`, or the configured API host.
pub fn event_source(cli: &Cli, config: &Config) -> Box<dyn EventSource> {
    match &cli.file {
        Some(path) => Box::new(FileEventSource::new(path)),
        None => Box::new(HttpEventSource::new(&config.api.host)),
    }
}

/// Saved files are reviewed in full; the API is asked for recent events only.
fn lookback_hours(cli: &Cli, config: &Config) -> u32 {
    if cli.file.is_some() {
        0
    } else {
        config.api.lookback_hours
    }
}

/// Query for a one-shot fetch.
pub fn query(cli: &Cli, config: &Config, limit: Option<u32>) -> EventQuery {
    EventQuery::recent(config.api.camera(), lookback_hours(cli, config), Utc::now())
        .with_limit(limit.or(config.api.limit()))
}

/// Settings for the background poller.
pub fn poll_settings(cli: &Cli, config: &Config) -> PollSettings {
    PollSettings {
        camera: config.api.camera().map(str::to_string),
        lookback_hours: lookback_hours(cli, config),
        limit: config.api.limit(),
        interval: config.api.poll_interval(),
    }
}
