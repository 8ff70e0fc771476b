//! Check units and the fixed registry that runs them
//!
//! Every check conforms to the same contract: given a read-only
//! [`CheckContext`], produce findings. A check never mutates the repository
//! and never lets an internal failure escape its `run` call — unreadable or
//! unparsable inputs degrade into findings of the check's own category.

pub mod branch_hygiene;
pub mod file_hygiene;
pub mod notebook;
pub mod python_source;

use crate::analyzer::LintPipeline;
use crate::config::GradeConfig;
use crate::finding::{Category, Finding};
use crate::repo::{BranchInfo, ScopedFile};
use chrono::NaiveDate;
use std::path::Path;

/// Read-only input bundle shared by every check in one run
///
/// The file and branch slices are resolved once by the driver; no check
/// sees a different universe than another.
pub struct CheckContext<'a> {
    pub repo_root: &'a Path,
    /// Resolved branch under evaluation
    pub branch: &'a str,
    /// Only files touched on or after this date are in scope
    pub since: Option<NaiveDate>,
    pub files: &'a [ScopedFile],
    pub branches: &'a [BranchInfo],
    pub verbose: bool,
    pub config: &'a GradeConfig,
    /// Shared external-analyzer pipeline
    pub lint: &'a LintPipeline,
}

/// Contract for one check unit
pub trait Check: Send + Sync {
    /// Human-readable name shown while running
    fn name(&self) -> &str;

    /// The category this check stamps on its findings
    fn category(&self) -> Category;

    /// Evaluate the context. Total: any internal failure is returned as a
    /// finding, never raised.
    fn run(&self, ctx: &CheckContext) -> Vec<Finding>;
}

/// Fixed, ordered collection of the built-in checks
///
/// Order is part of the output contract: findings are rendered in registry
/// order, so the list is constructed once and never reordered at runtime.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(branch_hygiene::BranchHygieneCheck::new()),
                Box::new(file_hygiene::FileHygieneCheck::new()),
                Box::new(notebook::NotebookCheck::new()),
                Box::new(python_source::PythonSourceCheck::new()),
            ],
        }
    }

    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    /// Run every check in registry order against the same context
    pub fn run_all(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut findings = Vec::new();
        for check in &self.checks {
            findings.extend(check.run(ctx));
        }
        findings
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}
