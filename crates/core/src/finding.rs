//! Finding types that bridge check results to output formatters

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level of a finding
///
/// Only [`Severity::Error`] findings contribute to failing a run; warnings
/// and info are surfaced but never gate CI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Which check produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    BranchHygiene,
    FileHygiene,
    Notebook,
    PythonSource,
    ExternalLint,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::BranchHygiene => "branch-hygiene",
            Category::FileHygiene => "file-hygiene",
            Category::Notebook => "notebook",
            Category::PythonSource => "python-source",
            Category::ExternalLint => "external-lint",
        };
        write!(f, "{}", name)
    }
}

/// What a finding points at: a branch, a file, or a position within a file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    Branch { name: String },
    File { path: PathBuf },
    /// 1-based line within a file
    Line { path: PathBuf, line: usize },
    /// 0-based cell index within a notebook
    Cell { path: PathBuf, cell: usize },
}

impl Location {
    pub fn branch(name: impl Into<String>) -> Self {
        Location::Branch { name: name.into() }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Location::File { path: path.into() }
    }

    pub fn line(path: impl Into<PathBuf>, line: usize) -> Self {
        Location::Line {
            path: path.into(),
            line,
        }
    }

    pub fn cell(path: impl Into<PathBuf>, cell: usize) -> Self {
        Location::Cell {
            path: path.into(),
            cell,
        }
    }

    /// The file this location points at, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Location::Branch { .. } => None,
            Location::File { path } => Some(path),
            Location::Line { path, .. } => Some(path),
            Location::Cell { path, .. } => Some(path),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Branch { name } => write!(f, "{}", name),
            Location::File { path } => write!(f, "{}", path.display()),
            Location::Line { path, line } => write!(f, "{}:{}", path.display(), line),
            Location::Cell { path, cell } => write!(f, "{}[cell {}]", path.display(), cell),
        }
    }
}

/// A single detected issue
///
/// Immutable once created; the producing check assigns the severity exactly
/// once and no later component reclassifies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    pub location: Location,
    pub message: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        category: Category,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            location,
            message: message.into(),
        }
    }
}

/// The aggregate of all findings for one evaluation run
///
/// Built once by the [`Aggregator`](crate::aggregate::Aggregator); the
/// severity counts and the pass/fail verdict are derived from the finding
/// collection and never stored as separate mutable state.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub findings: Vec<Finding>,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl Report {
    /// True iff at least one error-severity finding exists
    pub fn failed(&self) -> bool {
        self.errors > 0
    }

    /// Findings of one severity, in aggregate order
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }
}
