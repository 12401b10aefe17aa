//! `events` subcommand: print the normalized catalog

use anyhow::{Context, Result};
use unicode_width::UnicodeWidthStr;

use camhist::cli::Cli;
use camhist::event::{CatalogStats, EventCatalog, RawEvent};
use camhist::format::{format_clock, format_duration, format_timestamp};
use camhist::source::fetch_catalog;
use camhist::theme::current_theme;
use camhist::Config;

use super::{event_source, query};

#[cfg(not(tarpaulin_include))]
pub fn handle(cli: &Cli, config: &Config, limit: Option<u32>, json: bool) -> Result<()> {
    let source = event_source(cli, config);
    let (catalog, stats) = fetch_catalog(source.as_ref(), &query(cli, config, limit))
        .with_context(|| format!("Failed to list events from {}", source.describe()))?;

    if json {
        let records: Vec<RawEvent> = catalog.events().iter().map(RawEvent::from).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No events found.");
    } else {
        print!("{}", render_table(&catalog));
    }
    eprintln!("{}", current_theme().secondary_text(&summary(&stats)));
    Ok(())
}

/// One line per event, columns padded to the widest entry.
pub fn render_table(catalog: &EventCatalog) -> String {
    let rows: Vec<[String; 5]> = catalog
        .events()
        .iter()
        .map(|e| {
            [
                format!("{} - {}", format_timestamp(e.start), format_clock(e.end)),
                format_duration(e.duration_secs()),
                e.label.clone(),
                e.camera.clone(),
                e.id.clone(),
            ]
        })
        .collect();

    let header = ["TIME", "LENGTH", "LABEL", "CAMERA", "ID"].map(str::to_string);
    let mut widths = [0usize; 5];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == row.len() {
                line.push_str(cell);
            } else {
                line.push_str(cell);
                line.push_str(&" ".repeat(widths[i] - cell.width() + 2));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// `3 events (1 in progress, 2 malformed skipped)`
pub fn summary(stats: &CatalogStats) -> String {
    let mut notes = Vec::new();
    if stats.open > 0 {
        notes.push(format!("{} in progress", stats.open));
    }
    if stats.malformed > 0 {
        notes.push(format!("{} malformed skipped", stats.malformed));
    }
    let noun = if stats.kept() == 1 { "event" } else { "events" };
    if notes.is_empty() {
        format!("{} {}", stats.kept(), noun)
    } else {
        format!("{} {} ({})", stats.kept(), noun, notes.join(", "))
    }
}
