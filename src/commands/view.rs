//! `view` subcommand: interactive timeline viewer

use anyhow::{Context, Result};
use chrono::Utc;

use camhist::cli::Cli;
use camhist::format::parse_time;
use camhist::media::MediaPaths;
use camhist::playback::PlaybackController;
use camhist::source::CatalogPoller;
use camhist::tui::{SimulatedElement, ViewerApp};
use camhist::{Config, HistoryViewer, ViewerOptions};

use super::{event_source, poll_settings};

#[cfg(not(tarpaulin_include))]
pub fn handle(cli: &Cli, config: &Config, at: Option<&str>, follow: bool) -> Result<()> {
    let start_at = at
        .map(|t| parse_time(t).with_context(|| format!("Invalid time '{}'", t)))
        .transpose()?;

    let element = SimulatedElement::new(config.playback.load_delay_ticks);
    let controller = PlaybackController::new(element, MediaPaths::new(&config.api.host));
    let options = ViewerOptions {
        follow_playback: follow || config.playback.follow_playback,
    };
    let viewer = HistoryViewer::new(controller, Utc::now(), options);

    let source = event_source(cli, config);
    tracing::info!(source = %source.describe(), "starting viewer");
    let poller = CatalogPoller::spawn(source, poll_settings(cli, config));

    ViewerApp::new(viewer, Some(poller), &config.playback)
        .start_at(start_at)
        .run()
}
