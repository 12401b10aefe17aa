//! Command-line interface definition
//!
//! Lives in the library so xtask can generate the man page from it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Version with build date, e.g. `0.1.0 (2026-01-31)`.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CAMHIST_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "camhist")]
#[command(author, version = VERSION, about = "Browse and play back recorded camera events")]
#[command(long_about = "camhist lists recorded camera events and lets you scrub through \
them on a timeline. Gaps between recordings show \"No event found\"; settling the \
marker inside an event loads that event's video at the matching offset.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Read events from a JSON file instead of the API
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// API host, e.g. http://nvr.local:5000 (overrides config)
    #[arg(long, global = true, value_name = "URL")]
    pub host: Option<String>,

    /// Only show events from this camera (overrides config)
    #[arg(long, global = true)]
    pub camera: Option<String>,

    /// Write logs to this file (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List events, oldest first
    #[command(long_about = "List the normalized event catalog, oldest first.\n\n\
In-progress events (no end time yet) and malformed records are skipped.")]
    Events {
        /// Maximum number of events to request
        #[arg(long)]
        limit: Option<u32>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which event covers a point in time
    #[command(long_about = "Resolve a time to the event recorded at that moment and \
the offset into its video.\n\n\
TIME may be RFC 3339 (2024-05-01T12:00:00Z), 'YYYY-MM-DD HH:MM:SS' in UTC, \
or epoch seconds.")]
    Resolve {
        /// Point in time to resolve
        time: String,
    },

    /// Open the interactive timeline viewer
    View {
        /// Start with the marker at this time instead of the latest event
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
        /// Advance the marker while video plays
        #[arg(long)]
        follow: bool,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Open the configuration file in $EDITOR
    Edit,
    /// Add missing fields to the configuration file
    Migrate {
        /// Apply without asking
        #[arg(long, short)]
        yes: bool,
    },
}
