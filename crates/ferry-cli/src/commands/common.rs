//! Shared utilities for CLI commands

use anyhow::Result;
use ferry_core::migration::MigrationItem;
use ferry_core::Config;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly. The Display
/// impl is intentionally empty: by the time this propagates, the command has
/// already printed its tally and guidance.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Resolve the project root and load its config.
///
/// The config path defaults to `<project-dir>/ferry.yml` unless overridden
/// with `-c/--config`.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<(Config, PathBuf)> {
    let root = PathBuf::from(&global.project_dir);
    let config_path = global
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| root.join("ferry.yml"));
    let config = Config::from_file(&config_path)?;
    Ok((config, root))
}

/// Print the ordered migration listing with per-file line counts.
///
/// Mirrors what a dry run shows: which files will be applied, in what
/// order, and which are missing from disk.
pub(crate) fn print_plan_listing(plan: &[MigrationItem]) {
    println!("Migrations ({}), in application order:", plan.len());
    let mut total_lines = 0;
    for item in plan {
        match count_lines(&item.path) {
            Some(lines) => {
                total_lines += lines;
                println!("  ✓ {:<35} {:>5} lines", item.filename, lines);
            }
            None => println!("  ✗ {:<35} missing", item.filename),
        }
    }
    println!("  {:<37} {:>5} lines", "TOTAL", total_lines);
    println!();
}

/// Manual recovery path printed when a run leaves failures behind.
pub(crate) fn print_dashboard_fallback() {
    println!();
    println!("Some migrations did not apply. To finish manually:");
    println!("  1. Open your project dashboard and go to SQL Editor -> New Query");
    println!("  2. Paste the contents of each remaining migration file, in order");
    println!("  3. Run each one and check for errors before moving on");
}

fn count_lines(path: &Path) -> Option<usize> {
    std::fs::read_to_string(path).ok().map(|s| s.lines().count())
}
