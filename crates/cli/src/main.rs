//! Repograde CLI - coding-standards gate for repositories

use clap::Parser;
use colored::Colorize;
use repograde_cli::{commands, Cli, Commands};
use repograde_core::Report;

fn main() {
    let cli = Cli::parse();

    // Exit-code contract: 0 = pass, 1 = error-level findings, 2 = the run
    // could not produce a report at all
    let code = match dispatch(&cli) {
        Ok(Some(report)) => {
            if report.failed() {
                1
            } else {
                0
            }
        }
        Ok(None) => 0,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            2
        }
    };

    std::process::exit(code);
}

fn dispatch(cli: &Cli) -> anyhow::Result<Option<Report>> {
    match &cli.command {
        Some(Commands::Init { path }) => {
            commands::init::run(path.as_deref())?;
            Ok(None)
        }
        Some(Commands::Evaluate { target }) => {
            commands::evaluate::run(target.as_deref(), cli).map(Some)
        }
        None => commands::evaluate::run(cli.target.as_deref(), cli).map(Some),
    }
}
