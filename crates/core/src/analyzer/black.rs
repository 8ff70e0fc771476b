//! Black adapter — formatting conformance for Python sources
//!
//! Runs `black --check --diff` and reduces the diff to one diagnostic per
//! file that would be reformatted. Formatting violations gate the run.

use super::runner::{self, RunnerError};
use super::{AnalyzerError, ExternalAnalyzer, RawDiagnostic};
use crate::config::GradeConfig;
use crate::finding::Severity;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

pub struct BlackAnalyzer;

impl BlackAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BlackAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalAnalyzer for BlackAnalyzer {
    fn name(&self) -> &str {
        "black"
    }

    fn binary(&self) -> &str {
        "black"
    }

    fn is_enabled(&self, config: &GradeConfig) -> bool {
        config.lint.black
    }

    fn invoke(
        &self,
        files: &[PathBuf],
        workdir: &Path,
        deadline: Duration,
    ) -> Result<Vec<RawDiagnostic>, AnalyzerError> {
        let mut command = Command::new(self.binary());
        command
            .arg("--check")
            .arg("--diff")
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

        // Diff headers name each file that would change:
        //   --- path<TAB>timestamp
        let mut diagnostics = Vec::new();
        for line in output.stdout.lines() {
            if let Some(rest) = line.strip_prefix("--- ") {
                let path = rest.split('\t').next().unwrap_or(rest).trim();
                diagnostics.push(RawDiagnostic {
                    tool_severity: "reformat".to_string(),
                    file: PathBuf::from(path),
                    line: None,
                    message: "file is not formatted (run black)".to_string(),
                });
            }
        }

        // 0 = clean, 1 = would reformat; anything else is a tool failure
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
            "reformat" => Severity::Error,
            _ => Severity::Warning,
        }
    }
}
