//! sqlferry CLI - apply ordered SQL migrations to a hosted Postgres database

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::ExitCode;
use commands::{plan, run, validate};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
        cli::Commands::Plan => plan::execute(&cli.global).await,
        cli::Commands::Validate => validate::execute(&cli.global).await,
    };

    if let Err(err) = result {
        // ExitCode is control flow, not a user-facing error: the command has
        // already printed whatever the operator needs to see.
        if let Some(code) = err.downcast_ref::<ExitCode>() {
            std::process::exit(code.0);
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
