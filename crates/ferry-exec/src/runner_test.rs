use super::*;
use crate::fake::ScriptedExecutor;
use ferry_core::outcome::RunSummary;
use std::fs;
use std::path::Path;

/// Build a plan whose files all exist under a scratch migrations dir.
fn plan_on_disk(dir: &Path, filenames: &[&str]) -> Vec<MigrationItem> {
    filenames
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let path = dir.join(name);
            fs::write(&path, "SELECT 1;").unwrap();
            MigrationItem {
                index: i + 1,
                filename: name.to_string(),
                path,
            }
        })
        .collect()
}

#[tokio::test]
async fn test_all_success() {
    let dir = tempfile::tempdir().unwrap();
    let plan = plan_on_disk(dir.path(), &["001.sql", "002.sql", "003.sql"]);
    let executor = ScriptedExecutor::succeeding();

    let results = run_migrations(&plan, &executor, |_| {}).await;
    let summary = RunSummary::from_results(&results);

    assert_eq!(summary.success_count, 3);
    assert_eq!(summary.failure_count, 0);
    assert!(summary.all_succeeded());
    assert_eq!(executor.applied(), vec!["001.sql", "002.sql", "003.sql"]);
}

#[tokio::test]
async fn test_failure_does_not_abort_run() {
    let dir = tempfile::tempdir().unwrap();
    let plan = plan_on_disk(dir.path(), &["001.sql", "002.sql", "003.sql"]);
    let executor = ScriptedExecutor::succeeding().with_outcome(
        "002.sql",
        Outcome::Failed {
            exit_code: Some(1),
            error: "psql: error: syntax error".to_string(),
        },
    );

    let results = run_migrations(&plan, &executor, |_| {}).await;

    // All three attempted, order preserved: [Success, Failed, Success]
    assert_eq!(executor.applied(), vec!["001.sql", "002.sql", "003.sql"]);
    assert!(results[0].outcome.is_success());
    assert!(matches!(results[1].outcome, Outcome::Failed { .. }));
    assert!(results[2].outcome.is_success());

    let summary = RunSummary::from_results(&results);
    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.failure_count, 1);
}

#[tokio::test]
async fn test_missing_file_skipped_next_still_runs() {
    let dir = tempfile::tempdir().unwrap();
    let mut plan = plan_on_disk(dir.path(), &["001.sql", "003.sql"]);
    // Splice in a file that was never written to disk
    plan.insert(
        1,
        MigrationItem {
            index: 2,
            filename: "002.sql".to_string(),
            path: dir.path().join("002.sql"),
        },
    );

    let executor = ScriptedExecutor::succeeding();
    let results = run_migrations(&plan, &executor, |_| {}).await;

    assert_eq!(results.len(), 3);
    assert!(matches!(results[1].outcome, Outcome::Skipped { .. }));
    // The executor is never invoked for the missing file
    assert_eq!(executor.applied(), vec!["001.sql", "003.sql"]);
    // But the skip still counts as a failure
    let summary = RunSummary::from_results(&results);
    assert_eq!(summary.failure_count, 1);
}

#[tokio::test]
async fn test_timeout_counts_as_failure_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let plan = plan_on_disk(dir.path(), &["001.sql", "002.sql"]);
    let executor = ScriptedExecutor::succeeding()
        .with_outcome("001.sql", Outcome::TimedOut { timeout_secs: 30 });

    let results = run_migrations(&plan, &executor, |_| {}).await;

    assert!(matches!(results[0].outcome, Outcome::TimedOut { .. }));
    assert!(results[1].outcome.is_success());
    let summary = RunSummary::from_results(&results);
    assert_eq!(summary.success_count, 1);
    assert_eq!(summary.failure_count, 1);
}

#[tokio::test]
async fn test_one_result_per_item_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let plan = plan_on_disk(dir.path(), &["b.sql", "a.sql", "c.sql"]);
    let executor = ScriptedExecutor::succeeding();

    let results = run_migrations(&plan, &executor, |_| {}).await;

    assert_eq!(results.len(), plan.len());
    for (result, item) in results.iter().zip(plan.iter()) {
        assert_eq!(result.item.filename, item.filename);
        assert_eq!(result.item.index, item.index);
    }
}

#[tokio::test]
async fn test_on_result_fires_per_item() {
    let dir = tempfile::tempdir().unwrap();
    let plan = plan_on_disk(dir.path(), &["001.sql", "002.sql"]);
    let executor = ScriptedExecutor::succeeding();

    let mut seen = Vec::new();
    run_migrations(&plan, &executor, |r| seen.push(r.item.filename.clone())).await;

    assert_eq!(seen, vec!["001.sql", "002.sql"]);
}

#[tokio::test]
async fn test_empty_plan() {
    let executor = ScriptedExecutor::succeeding();
    let results = run_migrations(&[], &executor, |_| {}).await;
    assert!(results.is_empty());
    assert!(RunSummary::from_results(&results).all_succeeded());
}
