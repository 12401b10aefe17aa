//! Config subcommands handler

use anyhow::Result;
use std::fs;
use std::io::{self, BufRead, Write};

use camhist::config::migrate_config;
use camhist::theme::current_theme;
use camhist::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("# {}", Config::config_path()?.display());
    print!("{}", toml_str);
    Ok(())
}

/// Open the configuration file in $EDITOR (defaults to `vi`).
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    let theme = current_theme();

    if !config_path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!(
        "{}",
        theme.secondary_text(&format!(
            "Opening {} with {}",
            config_path.display(),
            editor
        ))
    );

    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to open editor: {}", e))?;
    if !status.success() {
        anyhow::bail!("{} exited with {}", editor, status);
    }

    // Catch typos before the next run does.
    Config::load_from(&config_path)?;
    Ok(())
}

/// Add fields missing from the config file, previewing the change first.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(yes: bool) -> Result<()> {
    let theme = current_theme();
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)?
    } else {
        String::new()
    };
    let result = migrate_config(&content)?;

    if !result.has_changes() {
        println!("Config is already up to date.");
        return Ok(());
    }

    if file_exists {
        let fields = result.added_fields.len();
        match result.sections_added.len() {
            0 => println!("Found {} missing field(s):", fields),
            sections => println!(
                "Found {} missing field(s) in {} new section(s):",
                fields, sections
            ),
        }
    } else {
        println!("Config file does not exist. Will create it with default settings.");
    }
    println!();
    for line in diff_preview(&result.content, &result.added_fields, !file_exists) {
        println!("{}", line);
    }
    println!();

    let question = if file_exists {
        format!("Apply these changes to {}?", config_path.display())
    } else {
        format!("Create {}?", config_path.display())
    };
    if !yes && !prompt_confirmation(&question)? {
        println!("No changes made.");
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, &result.content)?;
    println!("{}", theme.success_text("Config updated."));
    Ok(())
}

/// Lines of a diff-style preview: added fields (and their section headers)
/// prefixed with `+ `. For a new file every non-empty line is an addition.
pub fn diff_preview(new_content: &str, added_fields: &[String], is_new_file: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut section = String::new();
    let mut pending_header: Option<String> = None;

    for line in new_content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = trimmed[1..trimmed.len() - 1].to_string();
            pending_header = Some(line.to_string());
            continue;
        }

        let is_added = match trimmed.split_once('=') {
            Some((key, _)) => added_fields.contains(&format!("{}.{}", section, key.trim())),
            None => false,
        };
        if is_new_file || is_added {
            if let Some(header) = pending_header.take() {
                lines.push(format!("  {}", header));
            }
            lines.push(format!("+ {}", line));
        }
    }
    lines
}

/// Ask a yes/no question. Non-interactive stdin counts as "no".
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();

    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: use --yes to apply changes")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
