//! Sequential migration runner
//!
//! Migrations run one at a time, in plan order, each fully completing before
//! the next begins. Order is the only dependency mechanism the tool has, so
//! serial execution is mandatory, not incidental. A failing item never
//! aborts the run; the point is complete visibility into which of the N
//! migrations succeeded.

use ferry_core::migration::MigrationItem;
use ferry_core::outcome::{ExecutionResult, Outcome};
use std::time::Instant;

use crate::traits::Executor;

/// Apply every migration in the plan, in order, best-effort.
///
/// A missing file is recorded as `Skipped` without invoking the executor;
/// every other item is delegated to it. `on_result` fires once per item as
/// it completes, for live progress reporting.
///
/// Postcondition: exactly one `ExecutionResult` per plan item, in plan order.
pub async fn run_migrations(
    plan: &[MigrationItem],
    executor: &dyn Executor,
    mut on_result: impl FnMut(&ExecutionResult),
) -> Vec<ExecutionResult> {
    let mut results = Vec::with_capacity(plan.len());

    for item in plan {
        let start = Instant::now();
        let outcome = if !item.exists() {
            log::warn!(
                "Migration {:03} '{}' not found at {}, skipping",
                item.index,
                item.filename,
                item.path.display()
            );
            Outcome::Skipped {
                reason: format!("file not found: {}", item.path.display()),
            }
        } else {
            log::debug!("Applying migration {:03} '{}'", item.index, item.filename);
            executor.apply(item).await
        };

        let result = ExecutionResult {
            item: item.clone(),
            outcome,
            duration: start.elapsed(),
        };
        on_result(&result);
        results.push(result);
    }

    results
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
