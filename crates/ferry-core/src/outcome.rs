//! Per-migration outcomes and the run summary

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::migration::MigrationItem;

/// Terminal outcome of one migration attempt
///
/// Everything that is not `Success` counts as a failure in the summary —
/// including skips and timeouts. Only configuration errors abort a run; an
/// outcome never does.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The client applied the whole file and exited 0
    Success,

    /// The migration file was absent on disk; the client was never invoked
    Skipped { reason: String },

    /// The client exited non-zero (or could not be launched at all)
    Failed {
        exit_code: Option<i32>,
        error: String,
    },

    /// The client exceeded the wall-clock budget and was terminated
    TimedOut { timeout_secs: u64 },
}

impl Outcome {
    /// Whether this outcome counts toward the success tally
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Skipped { reason } => write!(f, "skipped: {reason}"),
            Outcome::Failed {
                exit_code: Some(code),
                error,
            } => write!(f, "failed (exit {code}): {error}"),
            Outcome::Failed {
                exit_code: None,
                error,
            } => write!(f, "failed: {error}"),
            Outcome::TimedOut { timeout_secs } => {
                write!(f, "timed out after {timeout_secs}s")
            }
        }
    }
}

/// Result of one migration attempt; exactly one exists per plan item
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// The plan item this result belongs to
    pub item: MigrationItem,

    /// Terminal outcome
    pub outcome: Outcome,

    /// Wall-clock time spent on this item
    pub duration: Duration,
}

/// Aggregate tally for a run, derived from the execution results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Migrations that applied cleanly
    pub success_count: usize,

    /// Everything else: failed, skipped, or timed out
    pub failure_count: usize,

    /// Total number of plan items
    pub total: usize,
}

impl RunSummary {
    /// Partition the results into the two-bucket tally.
    ///
    /// Invariant: `success_count + failure_count == total`.
    pub fn from_results(results: &[ExecutionResult]) -> Self {
        let success_count = results.iter().filter(|r| r.outcome.is_success()).count();
        Self {
            success_count,
            failure_count: results.len() - success_count,
            total: results.len(),
        }
    }

    /// Whether the whole run succeeded (drives the process exit code)
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }
}

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;
