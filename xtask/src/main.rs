//! Development tasks: `cargo run -p xtask -- <task>`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for camhist and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn write_man_pages(cmd: clap::Command, out: &Path) -> Result<()> {
    let name = cmd.get_name().to_string();
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    let path = out.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("wrote {}", path.display());

    for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
        let sub = sub.clone().name(format!("{}-{}", name, sub.get_name()));
        write_man_pages(sub, out)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => {
            fs::create_dir_all(&out)
                .with_context(|| format!("Failed to create {}", out.display()))?;
            write_man_pages(camhist::cli::Cli::command(), &out)
        }
    }
}
