//! Build script for camhist - embeds build date and git commit hash
//!
//! - `CAMHIST_BUILD_DATE`: always emitted
//! - `VERGEN_GIT_SHA`: only without the `release` feature, so official
//!   builds carry a clean version string

use std::process::Command;

fn build_date() -> String {
    Command::new("date")
        .args(["+%Y-%m-%d"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-env=CAMHIST_BUILD_DATE={}", build_date());

    #[cfg(not(feature = "release"))]
    {
        use vergen_gitcl::{Emitter, GitclBuilder};

        let emitted = GitclBuilder::default()
            .sha(true)
            .build()
            .map_err(|e| e.to_string())
            .and_then(|git| {
                Emitter::default()
                    .add_instructions(&git)
                    .and_then(|emitter| emitter.emit())
                    .map_err(|e| e.to_string())
            });

        // Outside a git checkout
        if let Err(e) = emitted {
            println!("cargo:warning=Failed to get git info: {}", e);
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
        }
    }
}
