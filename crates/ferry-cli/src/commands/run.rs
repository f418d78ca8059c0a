//! Run command implementation

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ferry_core::migration::build_plan;
use ferry_core::outcome::{ExecutionResult, Outcome, RunSummary};
use ferry_exec::{run_migrations, ConnectionTarget, Executor, PsqlExecutor};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{self, ExitCode};

/// Run result for a single migration, as written to the results artifact
#[derive(Debug, Serialize)]
struct MigrationRunResult {
    migration: String,
    #[serde(flatten)]
    outcome: Outcome,
    duration_secs: f64,
}

/// Run results output file format
#[derive(Debug, Serialize)]
struct RunResults {
    timestamp: DateTime<Utc>,
    elapsed_secs: f64,
    success_count: usize,
    failure_count: usize,
    results: Vec<MigrationRunResult>,
}

/// Execute the run command
pub(crate) async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let (config, root) = common::load_config(global)?;
    let plan = build_plan(&config, &root);

    if args.dry_run {
        common::print_plan_listing(&plan);
        return Ok(());
    }

    // Preconditions fail fast, before any subprocess is launched: a run that
    // cannot authenticate must not touch the first migration.
    let host = config.database.resolved_host()?;
    let password = config.database.resolve_password()?;
    let timeout = Duration::from_secs(args.timeout_secs.unwrap_or(config.timeout_secs));

    let executor = PsqlExecutor::new(
        ConnectionTarget {
            psql_path: config.psql_path.clone(),
            host,
            port: config.database.port,
            user: config.database.user.clone(),
            dbname: config.database.dbname.clone(),
        },
        password,
        timeout,
    );

    println!(
        "Applying {} migrations to {}\n",
        plan.len(),
        executor.describe()
    );

    let started = Utc::now();
    let run_start = Instant::now();
    let results = run_migrations(&plan, &executor, |result| match &result.outcome {
        Outcome::Success => println!(
            "  ✓ {} [{}ms]",
            result.item.filename,
            result.duration.as_millis()
        ),
        outcome => println!(
            "  ✗ {} - {} [{}ms]",
            result.item.filename,
            outcome,
            result.duration.as_millis()
        ),
    })
    .await;

    let summary = RunSummary::from_results(&results);
    let artifact = write_run_results(
        &root,
        &results,
        &summary,
        started,
        run_start.elapsed().as_secs_f64(),
    )
    .context("Failed to write run results")?;
    log::debug!("Run results written to {}", artifact.display());

    println!();
    println!(
        "Applied: {}, Failed: {}",
        summary.success_count, summary.failure_count
    );

    if !summary.all_succeeded() {
        common::print_dashboard_fallback();
        return Err(ExitCode(1).into());
    }
    Ok(())
}

/// Write the machine-readable results artifact to `<root>/target/ferry_results.json`.
fn write_run_results(
    root: &Path,
    results: &[ExecutionResult],
    summary: &RunSummary,
    timestamp: DateTime<Utc>,
    elapsed_secs: f64,
) -> Result<PathBuf> {
    let artifact = RunResults {
        timestamp,
        elapsed_secs,
        success_count: summary.success_count,
        failure_count: summary.failure_count,
        results: results
            .iter()
            .map(|r| MigrationRunResult {
                migration: r.item.filename.clone(),
                outcome: r.outcome.clone(),
                duration_secs: r.duration.as_secs_f64(),
            })
            .collect(),
    };

    let dir = root.join("target");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("ferry_results.json");
    std::fs::write(&path, serde_json::to_string_pretty(&artifact)?)?;
    Ok(path)
}
