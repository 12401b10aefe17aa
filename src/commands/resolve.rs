//! `resolve` subcommand: which event covers a point in time

use anyhow::{Context, Result};

use camhist::cli::Cli;
use camhist::format::{event_line, format_duration, parse_time, NO_EVENT};
use camhist::media::MediaPaths;
use camhist::source::fetch_catalog;
use camhist::timeline::TimelineChange;
use camhist::Config;

use super::{event_source, query};

#[cfg(not(tarpaulin_include))]
pub fn handle(cli: &Cli, config: &Config, time: &str) -> Result<()> {
    let at = parse_time(time).with_context(|| {
        format!(
            "Invalid time '{}': expected RFC 3339, 'YYYY-MM-DD HH:MM:SS' or epoch seconds",
            time
        )
    })?;

    let source = event_source(cli, config);
    let (catalog, _) = fetch_catalog(source.as_ref(), &query(cli, config, None))
        .with_context(|| format!("Failed to list events from {}", source.describe()))?;

    let change = TimelineChange::resolve(&catalog, at, true);
    println!("{}", describe(&change, &MediaPaths::new(&config.api.host)));
    Ok(())
}

/// Header line, offset and media URLs for a resolved marker.
pub fn describe(change: &TimelineChange, paths: &MediaPaths) -> String {
    let Some(event) = &change.event else {
        return NO_EVENT.to_string();
    };
    let offset = event.offset_secs(change.marker_time);
    let source = paths.source_for(&event.id);
    format!(
        "{}\noffset: {} ({:.3}s)\nvideo:  {}\nposter: {}",
        event_line(event),
        format_duration(offset),
        offset,
        source.manifest_url,
        source.poster_url
    )
}
