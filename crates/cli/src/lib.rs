//! Repograde CLI library — exposed for integration tests

pub mod commands;
pub mod output;
#[allow(dead_code)]
pub mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repograde")]
#[command(about = "Evaluate a repository against house coding standards", long_about = None)]
#[command(version = repograde_core::VERSION)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to a repository root, or a remote URL to clone
    pub target: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Render all findings without truncation
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Branch to evaluate (default: the checked-out branch)
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Only evaluate files committed on or after this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<String>,

    /// Also run the opt-in pylint analyzer
    #[arg(long, global = true)]
    pub lint: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize .repograde.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },

    /// Evaluate a repository (default command)
    Evaluate {
        /// Path to a repository root, or a remote URL to clone
        target: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}
