//! Plan command implementation
//!
//! Prints what `ferry run` would do, plus the manual deployment path: the
//! exact psql command per file (with a password placeholder, never the
//! secret) and the dashboard paste instructions.

use anyhow::Result;
use ferry_core::migration::build_plan;

use crate::cli::GlobalArgs;
use crate::commands::common;

/// Execute the plan command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let (config, root) = common::load_config(global)?;
    let plan = build_plan(&config, &root);
    let db = &config.database;
    let host = db.resolved_host()?;

    println!("Project: {}", config.name);
    println!("Target:  {}:{}/{} as {}", host, db.port, db.dbname, db.user);
    println!();

    common::print_plan_listing(&plan);

    println!("To apply manually with psql (in this order):");
    println!();
    for item in &plan {
        println!("  # Step {}: {}", item.index, item.filename);
        println!(
            "  psql \"postgresql://{}:[PASSWORD]@{}:{}/{}\" -v ON_ERROR_STOP=1 -f {}",
            db.user,
            host,
            db.port,
            db.dbname,
            item.path.display()
        );
        println!();
    }
    println!(
        "The password is read from ${} — it is never embedded in these commands.",
        db.password_env
    );

    println!();
    println!("Or paste each file into your project dashboard:");
    println!("  SQL Editor -> New Query -> paste -> Run, one file at a time, in order.");
    Ok(())
}
