//! Tests for the external analyzer pipeline with fake adapters

use repograde_core::analyzer::runner::{run_with_deadline, RunnerError};
use repograde_core::{
    AnalyzedFile, AnalyzerError, Category, ExternalAnalyzer, GradeConfig, LintPipeline,
    Location, RawDiagnostic, Severity,
};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// A fake tool that returns canned diagnostics
struct FakeAnalyzer {
    name: &'static str,
    diagnostics: Vec<RawDiagnostic>,
    notebooks: bool,
}

impl ExternalAnalyzer for FakeAnalyzer {
    fn name(&self) -> &str {
        self.name
    }

    fn binary(&self) -> &str {
        self.name
    }

    fn is_enabled(&self, _config: &GradeConfig) -> bool {
        true
    }

    fn applies_to_notebooks(&self) -> bool {
        self.notebooks
    }

    fn invoke(
        &self,
        _files: &[PathBuf],
        _workdir: &Path,
        _deadline: Duration,
    ) -> Result<Vec<RawDiagnostic>, AnalyzerError> {
        Ok(self.diagnostics.clone())
    }

    fn map_severity(&self, tool_severity: &str) -> Severity {
        match tool_severity {
            "fatal" => Severity::Error,
            // Unmapped vocabulary defaults to warning
            _ => Severity::Warning,
        }
    }
}

/// A fake tool whose invocation always fails
struct ExplodingAnalyzer;

impl ExternalAnalyzer for ExplodingAnalyzer {
    fn name(&self) -> &str {
        "exploder"
    }

    fn binary(&self) -> &str {
        "exploder"
    }

    fn is_enabled(&self, _config: &GradeConfig) -> bool {
        true
    }

    fn invoke(
        &self,
        _files: &[PathBuf],
        _workdir: &Path,
        _deadline: Duration,
    ) -> Result<Vec<RawDiagnostic>, AnalyzerError> {
        Err(AnalyzerError::TimedOut {
            tool: "exploder".to_string(),
            seconds: 60,
        })
    }

    fn map_severity(&self, _tool_severity: &str) -> Severity {
        Severity::Warning
    }
}

fn analyzed(abs: &str, rel: &str) -> AnalyzedFile {
    AnalyzedFile {
        abs: PathBuf::from(abs),
        rel: PathBuf::from(rel),
    }
}

#[test]
fn diagnostics_become_external_lint_findings() {
    let fake = FakeAnalyzer {
        name: "fakelint",
        diagnostics: vec![RawDiagnostic {
            tool_severity: "fatal".to_string(),
            file: PathBuf::from("/tmp/snapshot/src/app.py"),
            line: Some(12),
            message: "undefined name 'frobnicate'".to_string(),
        }],
        notebooks: false,
    };
    let pipeline =
        LintPipeline::with_analyzers(vec![Box::new(fake)], Duration::from_secs(5));

    let files = [analyzed("/tmp/snapshot/src/app.py", "src/app.py")];
    let findings = pipeline.run(&files, Path::new("."), false);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Error);
    assert_eq!(findings[0].category, Category::ExternalLint);
    assert_eq!(findings[0].location, Location::line("src/app.py", 12));
}

#[test]
fn unmapped_tool_severity_defaults_to_warning() {
    let fake = FakeAnalyzer {
        name: "fakelint",
        diagnostics: vec![RawDiagnostic {
            tool_severity: "whimsical".to_string(),
            file: PathBuf::from("src/app.py"),
            line: None,
            message: "something odd".to_string(),
        }],
        notebooks: false,
    };
    let pipeline =
        LintPipeline::with_analyzers(vec![Box::new(fake)], Duration::from_secs(5));

    let files = [analyzed("/abs/src/app.py", "src/app.py")];
    let findings = pipeline.run(&files, Path::new("."), false);

    assert_eq!(findings[0].severity, Severity::Warning);
    assert_eq!(findings[0].location, Location::file("src/app.py"));
}

#[test]
fn failed_invocation_degrades_to_one_warning_and_siblings_proceed() {
    let healthy = FakeAnalyzer {
        name: "fakelint",
        diagnostics: vec![RawDiagnostic {
            tool_severity: "fatal".to_string(),
            file: PathBuf::from("src/app.py"),
            line: Some(1),
            message: "real diagnostic".to_string(),
        }],
        notebooks: false,
    };
    let pipeline = LintPipeline::with_analyzers(
        vec![Box::new(ExplodingAnalyzer), Box::new(healthy)],
        Duration::from_secs(5),
    );

    let files = [analyzed("/abs/src/app.py", "src/app.py")];
    let findings = pipeline.run(&files, Path::new("."), false);

    assert_eq!(findings.len(), 2);
    assert!(findings[0].severity == Severity::Warning
        && findings[0].message.contains("timed out"));
    assert!(findings[1].message.contains("real diagnostic"));
}

#[test]
fn notebook_pass_skips_non_notebook_tools() {
    let formatter = FakeAnalyzer {
        name: "fakeformat",
        diagnostics: vec![RawDiagnostic {
            tool_severity: "fatal".to_string(),
            file: PathBuf::from("nb.ipynb"),
            line: Some(1),
            message: "should not appear".to_string(),
        }],
        notebooks: false,
    };
    let pipeline =
        LintPipeline::with_analyzers(vec![Box::new(formatter)], Duration::from_secs(5));

    let files = [analyzed("/abs/nb.ipynb.py", "nb.ipynb")];
    let findings = pipeline.run(&files, Path::new("."), true);

    assert!(findings.is_empty());
}

#[test]
fn empty_file_set_runs_nothing() {
    let pipeline = LintPipeline::with_analyzers(
        vec![Box::new(ExplodingAnalyzer)],
        Duration::from_secs(5),
    );
    let findings = pipeline.run(&[], Path::new("."), false);
    assert!(findings.is_empty());
}

#[test]
fn runner_kills_processes_at_the_deadline() {
    let mut command = Command::new("sleep");
    command.arg("5");

    let err = run_with_deadline(command, "sleep", Duration::from_millis(200)).unwrap_err();
    assert!(matches!(err, RunnerError::TimedOut { .. }));
}

#[test]
fn runner_reports_missing_binaries() {
    let command = Command::new("definitely-not-a-real-binary-xyz");
    let err = run_with_deadline(
        command,
        "definitely-not-a-real-binary-xyz",
        Duration::from_secs(1),
    )
    .unwrap_err();
    assert!(matches!(err, RunnerError::NotFound(_)));
}

#[test]
fn runner_captures_output() {
    let mut command = Command::new("echo");
    command.arg("hello");

    let output = run_with_deadline(command, "echo", Duration::from_secs(5)).unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout.trim(), "hello");
}
