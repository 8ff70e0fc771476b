//! External analyzer pipeline
//!
//! Each third-party lint tool is an opaque process behind the
//! [`ExternalAnalyzer`] trait: it receives a file list and a working
//! directory, and yields raw diagnostics. The pipeline owns the
//! translation of those diagnostics into findings, including the mapping
//! of each tool's severity vocabulary onto the three-level scheme
//! (unmapped levels default to warning).

pub mod black;
pub mod pyflakes;
pub mod pylint;
pub mod runner;

use crate::config::GradeConfig;
use crate::finding::{Category, Finding, Location, Severity};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// One diagnostic line as reported by an external tool
#[derive(Debug, Clone)]
pub struct RawDiagnostic {
    /// The tool's own severity word or code letter
    pub tool_severity: String,
    /// Path exactly as the tool printed it
    pub file: PathBuf,
    /// 1-based line, when the tool reports one
    pub line: Option<usize>,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("external analyzer '{tool}' is not installed (binary '{binary}' not found)")]
    MissingBinary { tool: String, binary: String },

    #[error("external analyzer '{tool}' timed out after {seconds}s")]
    TimedOut { tool: String, seconds: u64 },

    #[error("external analyzer '{tool}' failed: {message}")]
    Failed { tool: String, message: String },
}

/// A file submitted to the pipeline: where it lives on disk and the
/// repo-relative path findings should be attributed to
#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    pub abs: PathBuf,
    pub rel: PathBuf,
}

/// Contract for one external tool adapter
pub trait ExternalAnalyzer: Send + Sync {
    /// Tool name used in messages
    fn name(&self) -> &str;

    /// Binary probed at preflight and spawned at invocation
    fn binary(&self) -> &str;

    fn is_enabled(&self, config: &GradeConfig) -> bool;

    /// Whether notebook virtual source units are submitted to this tool
    fn applies_to_notebooks(&self) -> bool {
        false
    }

    fn invoke(
        &self,
        files: &[PathBuf],
        workdir: &Path,
        deadline: Duration,
    ) -> Result<Vec<RawDiagnostic>, AnalyzerError>;

    /// Map the tool's severity vocabulary onto the three-level scheme
    fn map_severity(&self, tool_severity: &str) -> Severity;
}

/// Fixed, ordered set of enabled analyzer adapters for one run
pub struct LintPipeline {
    analyzers: Vec<Box<dyn ExternalAnalyzer>>,
    deadline: Duration,
}

impl LintPipeline {
    /// Build the pipeline of enabled adapters, in fixed tool order
    pub fn from_config(config: &GradeConfig) -> Self {
        let all: Vec<Box<dyn ExternalAnalyzer>> = vec![
            Box::new(pyflakes::PyflakesAnalyzer::new()),
            Box::new(black::BlackAnalyzer::new()),
            Box::new(pylint::PylintAnalyzer::new()),
        ];
        let analyzers = all
            .into_iter()
            .filter(|a| a.is_enabled(config))
            .collect();

        Self {
            analyzers,
            deadline: Duration::from_secs(config.lint.timeout_secs.max(1)),
        }
    }

    /// A pipeline with no tools; structural checks still run
    pub fn disabled() -> Self {
        Self {
            analyzers: Vec::new(),
            deadline: Duration::from_secs(1),
        }
    }

    /// Build a pipeline from explicit adapters (used to swap in fakes)
    pub fn with_analyzers(analyzers: Vec<Box<dyn ExternalAnalyzer>>, deadline: Duration) -> Self {
        Self {
            analyzers,
            deadline,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Names of the enabled tools
    pub fn tool_names(&self) -> Vec<&str> {
        self.analyzers.iter().map(|a| a.name()).collect()
    }

    /// Verify every enabled analyzer binary exists before the run starts.
    ///
    /// A missing binary here is an infrastructure failure: no meaningful
    /// partial report exists, so the run must abort.
    pub fn preflight(&self) -> Result<(), AnalyzerError> {
        for analyzer in &self.analyzers {
            let mut probe = std::process::Command::new(analyzer.binary());
            probe.arg("--version");
            match runner::run_with_deadline(probe, analyzer.binary(), Duration::from_secs(10)) {
                Err(runner::RunnerError::NotFound(_)) => {
                    return Err(AnalyzerError::MissingBinary {
                        tool: analyzer.name().to_string(),
                        binary: analyzer.binary().to_string(),
                    });
                }
                // Any other outcome means the binary is present
                _ => {}
            }
        }
        Ok(())
    }

    /// Run every applicable tool over the given files and translate the
    /// diagnostics into findings attributed to repo-relative paths.
    ///
    /// Invocations are failure-isolated: a timeout or crash becomes one
    /// warning finding and sibling tools still run.
    pub fn run(&self, files: &[AnalyzedFile], workdir: &Path, notebooks: bool) -> Vec<Finding> {
        if files.is_empty() {
            return Vec::new();
        }

        let abs_paths: Vec<PathBuf> = files.iter().map(|f| f.abs.clone()).collect();
        let mut findings = Vec::new();

        for analyzer in &self.analyzers {
            if notebooks && !analyzer.applies_to_notebooks() {
                continue;
            }

            match analyzer.invoke(&abs_paths, workdir, self.deadline) {
                Ok(diagnostics) => {
                    for diag in diagnostics {
                        let severity = analyzer.map_severity(&diag.tool_severity);
                        let rel = attribute(files, &diag.file);
                        let location = match diag.line {
                            Some(line) => Location::line(rel, line),
                            None => Location::file(rel),
                        };
                        findings.push(Finding::new(
                            severity,
                            Category::ExternalLint,
                            location,
                            diag.message,
                        ));
                    }
                }
                Err(err) => {
                    // Partial results are discarded; the run proceeds
                    findings.push(Finding::new(
                        Severity::Warning,
                        Category::ExternalLint,
                        Location::file("."),
                        format!("{}; results discarded", err),
                    ));
                }
            }
        }

        findings
    }
}

/// Map a path as printed by a tool back to the repo-relative path it was
/// submitted under
fn attribute(files: &[AnalyzedFile], diag_path: &Path) -> PathBuf {
    for file in files {
        if file.abs == diag_path || file.abs.ends_with(diag_path) || diag_path.ends_with(&file.rel)
        {
            return file.rel.clone();
        }
    }
    diag_path.to_path_buf()
}
