//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// sqlferry - apply ordered SQL migrations to a hosted Postgres database
#[derive(Parser, Debug)]
#[command(name = "ferry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path (default: <project-dir>/ferry.yml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the configured migrations to the target database
    Run(RunArgs),

    /// Show the migration plan and manual deployment instructions
    Plan,

    /// Validate configuration, credentials, and client availability
    Validate,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Per-migration timeout in seconds (overrides ferry.yml)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Resolve and print the plan without executing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
