//! Pyflakes adapter — correctness linting for Python sources
//!
//! Pyflakes prints `file:line:col: message` lines: ordinary diagnostics on
//! stdout, syntax errors on stderr. Both gate the run, so the whole
//! vocabulary maps to error.

use super::runner::{self, RunnerError};
use super::{AnalyzerError, ExternalAnalyzer, RawDiagnostic};
use crate::config::GradeConfig;
use crate::finding::Severity;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use std::time::Duration;

fn diagnostic_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?P<file>.+?):(?P<line>\d+):(?:\d+:?)?\s*(?P<msg>.+)$").unwrap())
}

pub struct PyflakesAnalyzer;

impl PyflakesAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn parse_stream(stream: &str, tool_severity: &str, out: &mut Vec<RawDiagnostic>) {
        for line in stream.lines() {
            if let Some(caps) = diagnostic_pattern().captures(line) {
                let line_no = caps["line"].parse().ok();
                out.push(RawDiagnostic {
                    tool_severity: tool_severity.to_string(),
                    file: PathBuf::from(&caps["file"]),
                    line: line_no,
                    message: caps["msg"].trim().to_string(),
                });
            }
        }
    }
}

impl Default for PyflakesAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalAnalyzer for PyflakesAnalyzer {
    fn name(&self) -> &str {
        "pyflakes"
    }

    fn binary(&self) -> &str {
        "pyflakes"
    }

    fn is_enabled(&self, config: &GradeConfig) -> bool {
        config.lint.pyflakes
    }

    fn applies_to_notebooks(&self) -> bool {
        true
    }

    fn invoke(
        &self,
        files: &[PathBuf],
        workdir: &Path,
        deadline: Duration,
    ) -> Result<Vec<RawDiagnostic>, AnalyzerError> {
        let mut command = Command::new(self.binary());
        command.args(files).current_dir(workdir);

        let output = match runner::run_with_deadline(command, self.binary(), deadline) {
            Ok(o) => o,
            Err(RunnerError::NotFound(binary)) => {
                return Err(AnalyzerError::MissingBinary {
                    tool: self.name().to_string(),
                    binary,
                })
            }
            Err(RunnerError::TimedOut { deadline, .. }) => {
                return Err(AnalyzerError::TimedOut {
                    tool: self.name().to_string(),
                    seconds: deadline.as_secs(),
                })
            }
            Err(e) => {
                return Err(AnalyzerError::Failed {
                    tool: self.name().to_string(),
                    message: e.to_string(),
                })
            }
        };

        let mut diagnostics = Vec::new();
        Self::parse_stream(&output.stderr, "error", &mut diagnostics);
        Self::parse_stream(&output.stdout, "warning", &mut diagnostics);

        // Exit code 1 just means findings exist; anything beyond that with
        // no parseable output is a tool failure
        let code = output.status.code().unwrap_or(-1);
        if code > 1 && diagnostics.is_empty() {
            return Err(AnalyzerError::Failed {
                tool: self.name().to_string(),
                message: output
                    .stderr
                    .lines()
                    .next()
                    .unwrap_or("unknown error")
                    .to_string(),
            });
        }

        Ok(diagnostics)
    }

    fn map_severity(&self, tool_severity: &str) -> Severity {
        match tool_severity {
            "error" | "warning" => Severity::Error,
            _ => Severity::Warning,
        }
    }
}
