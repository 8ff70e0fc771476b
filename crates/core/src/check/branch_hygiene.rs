//! Branch hygiene check — naming conventions and live-branch summaries
//!
//! Warns on branch names that fall outside the house convention, surfaces
//! recently active branches informationally, and stays silent about
//! branches past the staleness window.

use super::{Check, CheckContext};
use crate::finding::{Category, Finding, Location, Severity};
use chrono::{Duration, Utc};
use regex::Regex;
use std::sync::OnceLock;

fn default_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[a-z0-9]+(-[a-z0-9]+)*$").unwrap())
}

pub struct BranchHygieneCheck;

impl BranchHygieneCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BranchHygieneCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for BranchHygieneCheck {
    fn name(&self) -> &str {
        "branch hygiene"
    }

    fn category(&self) -> Category {
        Category::BranchHygiene
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Finding> {
        let rules = &ctx.config.branches;
        let mut findings = Vec::new();

        let pattern = Regex::new(&rules.pattern).unwrap_or_else(|_| {
            findings.push(Finding::new(
                Severity::Warning,
                Category::BranchHygiene,
                Location::branch("*"),
                format!(
                    "configured branch pattern '{}' is not a valid regex; using the default",
                    rules.pattern
                ),
            ));
            default_name_pattern().clone()
        });

        let live_cutoff = Utc::now() - Duration::days(rules.staleness_days);

        for branch in ctx.branches {
            if rules.disallowed.iter().any(|d| d == &branch.name) {
                findings.push(Finding::new(
                    Severity::Warning,
                    Category::BranchHygiene,
                    Location::branch(&branch.name),
                    format!(
                        "branch name '{}' is a disallowed placeholder name",
                        branch.name
                    ),
                ));
            } else if !pattern.is_match(&branch.name) {
                findings.push(Finding::new(
                    Severity::Warning,
                    Category::BranchHygiene,
                    Location::branch(&branch.name),
                    format!(
                        "branch name '{}' does not match the lowercase-hyphenated convention",
                        branch.name
                    ),
                ));
            }

            // Dead branches are pruned silently; only live ones get a line
            if branch.last_commit_time >= live_cutoff {
                findings.push(Finding::new(
                    Severity::Info,
                    Category::BranchHygiene,
                    Location::branch(&branch.name),
                    format!(
                        "active branch: last commit by {} on {}",
                        branch.last_commit_author,
                        branch.last_commit_time.format("%Y-%m-%d")
                    ),
                ));
            }
        }

        findings
    }
}
