//! Executor trait definition

use async_trait::async_trait;
use ferry_core::migration::MigrationItem;
use ferry_core::outcome::Outcome;

/// Migration executor abstraction
///
/// One call applies one migration file to the target database and reports a
/// terminal [`Outcome`]. Implementations are infallible by contract: every
/// failure mode (bad SQL, dead connection, unlaunchable client) must be
/// folded into an outcome so the runner can record it and move on.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Apply a single migration file
    async fn apply(&self, item: &MigrationItem) -> Outcome;

    /// Human-readable execution target, for logging and progress output
    fn describe(&self) -> String;
}
