//! Main evaluate command — wires accessor, checks, aggregation, and output

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use repograde_core::{
    Aggregator, CheckContext, CheckRegistry, GradeConfig, LintPipeline, RepoAccessor, Report,
    ScopeFilter,
};
use std::path::Path;

use crate::output;
use crate::progress::Step;
use crate::{Cli, OutputFormat};

pub fn run(target: Option<&str>, cli: &Cli) -> Result<Report> {
    let target = target.unwrap_or(".");
    let accessor = resolve_accessor(target)?;

    let mut config = GradeConfig::find_and_load(accessor.root())?;
    if cli.lint {
        config.lint.pylint = true;
    }
    if !config.output.color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let since = match &cli.date {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("invalid --date '{}': expected YYYY-MM-DD", raw))?,
        ),
        None => None,
    };

    let branch = match &cli.branch {
        Some(name) => {
            if !accessor.branch_exists(name) {
                bail!("branch '{}' does not exist", name);
            }
            name.clone()
        }
        None => accessor.current_branch()?,
    };

    println!(
        "{}",
        format!("  repograde v{} — evaluating repository", repograde_core::VERSION).bold()
    );
    println!("{}", format!("  branch '{}'", branch).green());
    println!();

    // A missing analyzer binary means no meaningful report can exist
    let pipeline = LintPipeline::from_config(&config);
    pipeline.preflight()?;

    let step = Step::new("Resolving file scope");
    let branches = accessor.list_branches()?;
    let filter = ScopeFilter::new(&config.ignore.paths)?;
    let scope = accessor.files_in_scope(&branch, since, &filter)?;
    step.finish(&format!("{} files", scope.len()));

    let ctx = CheckContext {
        repo_root: accessor.root(),
        branch: &branch,
        since,
        files: &scope.files,
        branches: &branches,
        verbose: cli.verbose,
        config: &config,
        lint: &pipeline,
    };

    let registry = CheckRegistry::new();
    let mut aggregator = Aggregator::new();
    for check in registry.checks() {
        let step = Step::new(format!("Running {} check", check.name()));
        let findings = check.run(&ctx);
        step.finish(&format!("{} finding(s)", findings.len()));
        aggregator.extend(findings);
    }
    let report = aggregator.finalize();

    println!();
    match cli.format {
        Some(OutputFormat::Json) => {
            let out = output::json::from_report(&report);
            println!(
                "{}",
                serde_json::to_string_pretty(&out).context("failed to serialize report")?
            );
        }
        _ => {
            print!(
                "{}",
                output::terminal::render(&report, cli.verbose, config.output.display_limit)
            );
        }
    }

    Ok(report)
}

fn resolve_accessor(target: &str) -> Result<RepoAccessor> {
    let path = Path::new(target);
    if path.is_dir() {
        return RepoAccessor::open(path).map_err(Into::into);
    }
    if RepoAccessor::looks_like_remote(target) {
        eprintln!("  {}", format!("cloning '{}'...", target).dimmed());
        return RepoAccessor::clone_remote(target).map_err(Into::into);
    }
    bail!("'{}' is not a directory or a git repository URL", target)
}
