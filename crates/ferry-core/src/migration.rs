//! Migration plan construction
//!
//! A plan is the ordered list of [`MigrationItem`]s resolved from the config.
//! Items are immutable once built; existence on disk is deliberately not
//! checked here — a missing file surfaces as a per-item `Skipped` outcome at
//! run time so the rest of the plan still executes.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// A single migration file in the plan
#[derive(Debug, Clone, Serialize)]
pub struct MigrationItem {
    /// 1-based ordinal position in the plan
    pub index: usize,

    /// Filename as listed in the config
    pub filename: String,

    /// Resolved path (migrations_dir joined with the filename)
    pub path: PathBuf,
}

impl MigrationItem {
    /// Whether the migration file currently exists on disk
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Build the ordered migration plan from the config.
///
/// List order in `ferry.yml` is application order; the returned vec preserves
/// it exactly and assigns 1-based ordinals.
pub fn build_plan(config: &Config, project_root: &Path) -> Vec<MigrationItem> {
    let dir = config.migrations_dir_absolute(project_root);
    config
        .migrations
        .iter()
        .enumerate()
        .map(|(i, filename)| MigrationItem {
            index: i + 1,
            filename: filename.clone(),
            path: dir.join(filename),
        })
        .collect()
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
