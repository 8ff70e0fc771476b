//! Repograde Core - Coding-Standards Evaluation Engine
//!
//! This crate provides the evaluation machinery for repograde:
//! - Repository access (branches, commit metadata, branch-scoped file trees)
//! - A fixed registry of independent check units
//! - An external-analyzer pipeline with per-tool severity translation
//! - Finding aggregation with deduplication and the pass/fail verdict

pub mod aggregate;
pub mod analyzer;
pub mod check;
pub mod config;
pub mod discovery;
pub mod finding;
pub mod parser;
pub mod repo;

pub use aggregate::Aggregator;
pub use analyzer::{AnalyzedFile, AnalyzerError, ExternalAnalyzer, LintPipeline, RawDiagnostic};
pub use check::{Check, CheckContext, CheckRegistry};
pub use config::GradeConfig;
pub use discovery::ScopeFilter;
pub use finding::{Category, Finding, Location, Report, Severity};
pub use parser::ParseError;
pub use repo::{BranchInfo, FileScope, RepoAccessor, RepoError, ScopedFile};

/// Repograde version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
