//! Validate command implementation
//!
//! Pre-flight checks for a deployment: everything `ferry run` requires,
//! verified without touching the database. The password value is checked
//! for presence but never printed.

use anyhow::Result;
use ferry_core::migration::build_plan;
use ferry_exec::PsqlExecutor;

use crate::cli::GlobalArgs;
use crate::commands::common::{self, ExitCode};

/// Execute the validate command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let (config, root) = common::load_config(global)?;
    let mut failures = 0;

    println!("Validating project '{}'\n", config.name);

    let plan = build_plan(&config, &root);
    let missing: Vec<&str> = plan
        .iter()
        .filter(|item| !item.exists())
        .map(|item| item.filename.as_str())
        .collect();
    if missing.is_empty() {
        println!("  ✓ migration files: all {} present", plan.len());
    } else {
        failures += 1;
        println!(
            "  ✗ migration files: {} of {} missing ({})",
            missing.len(),
            plan.len(),
            missing.join(", ")
        );
    }

    match config.database.resolved_host() {
        Ok(host) => println!("  ✓ database host: {host}"),
        Err(e) => {
            failures += 1;
            println!("  ✗ database host: {e}");
        }
    }

    match config.database.resolve_password() {
        Ok(_) => println!("  ✓ password: ${} is set", config.database.password_env),
        Err(e) => {
            failures += 1;
            println!("  ✗ password: {e}");
        }
    }

    match PsqlExecutor::check_available(&config.psql_path) {
        Ok(()) => println!("  ✓ client: {} is available", config.psql_path),
        Err(e) => {
            failures += 1;
            println!("  ✗ client: {e}");
        }
    }

    println!();
    if failures > 0 {
        println!("{failures} check(s) failed");
        return Err(ExitCode(1).into());
    }
    println!("All checks passed");
    Ok(())
}
