//! camhist command-line entry point

mod commands;

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use camhist::cli::{Cli, Commands, ConfigCommands, VERSION};
use camhist::config::LoggingConfig;
use camhist::Config;

/// Install the log subscriber.
///
/// `CAMHIST_LOG` wins over the configured level. Without a log file, logs go
/// to stderr, except for the viewer: the terminal belongs to the TUI then.
fn init_logging(logging: &LoggingConfig, interactive: bool) -> Result<()> {
    let env_filter = std::env::var("CAMHIST_LOG").unwrap_or_else(|_| logging.level.clone());

    match logging.file() {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter.as_str())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter.as_str())
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Editing or migrating must work even when the current file is broken.
    let mut config = match &cli.command {
        Commands::Completions { .. }
        | Commands::Config(ConfigCommands::Edit)
        | Commands::Config(ConfigCommands::Migrate { .. }) => Config::default(),
        _ => Config::load()?,
    };
    commands::apply_overrides(&mut config, &cli);

    init_logging(&config.logging, matches!(cli.command, Commands::View { .. }))?;
    tracing::debug!(
        version = VERSION,
        git_sha = option_env!("VERGEN_GIT_SHA").unwrap_or("release"),
        "camhist starting"
    );

    match &cli.command {
        Commands::Events { limit, json } => commands::events::handle(&cli, &config, *limit, *json),
        Commands::Resolve { time } => commands::resolve::handle(&cli, &config, time),
        Commands::View { at, follow } => {
            commands::view::handle(&cli, &config, at.as_deref(), *follow)
        }
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(&config),
        Commands::Config(ConfigCommands::Edit) => commands::config::handle_edit(),
        Commands::Config(ConfigCommands::Migrate { yes }) => {
            commands::config::handle_migrate(*yes)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "camhist", &mut io::stdout());
            Ok(())
        }
    }
}
