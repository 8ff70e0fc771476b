//! Pylint adapter — opt-in static analysis for Python sources
//!
//! Parses `--output-format=parseable` lines of the form
//! `file:line: [C0114(missing-module-docstring), obj] message` and keeps
//! the leading code letter as the tool severity.

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
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<file>.+?):(?P<line>\d+):\s*\[(?P<code>[A-Z])\d+[^\]]*\]\s*(?P<msg>.+)$")
            .unwrap()
    })
}

pub struct PylintAnalyzer;

impl PylintAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PylintAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalAnalyzer for PylintAnalyzer {
    fn name(&self) -> &str {
        "pylint"
    }

    fn binary(&self) -> &str {
        "pylint"
    }

    fn is_enabled(&self, config: &GradeConfig) -> bool {
        config.lint.pylint
    }

    fn invoke(
        &self,
        files: &[PathBuf],
        workdir: &Path,
        deadline: Duration,
    ) -> Result<Vec<RawDiagnostic>, AnalyzerError> {
        let mut command = Command::new(self.binary());
        command
            .arg("--output-format=parseable")
            .arg("--score=n")
            .args(files)
            .current_dir(workdir);

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
        for line in output.stdout.lines() {
            if let Some(caps) = diagnostic_pattern().captures(line) {
                diagnostics.push(RawDiagnostic {
                    tool_severity: caps["code"].to_string(),
                    file: PathBuf::from(&caps["file"]),
                    line: caps["line"].parse().ok(),
                    message: caps["msg"].trim().to_string(),
                });
            }
        }

        // Pylint's exit code is a bitmask of message classes; 32 means
        // usage error
        let code = output.status.code().unwrap_or(-1);
        if (code >= 32 || code < 0) && diagnostics.is_empty() {
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
            "E" | "F" => Severity::Error,
            "W" | "C" | "R" => Severity::Warning,
            _ => Severity::Warning,
        }
    }
}
