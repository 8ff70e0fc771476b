//! Python source check — encapsulation, docstrings, restricted APIs, lint
//!
//! Four independent sub-checks run over every plain source file; all of
//! them may fire on the same file. Structural results come from the
//! tree-sitter inspector; the external-analyzer pipeline supplies the lint
//! findings.

use super::{Check, CheckContext};
use crate::analyzer::AnalyzedFile;
use crate::finding::{Category, Finding, Location, Severity};
use crate::parser::python::{ModuleSummary, PythonInspector, TopLevelKind};
use crate::repo::ScopedFile;
use rayon::prelude::*;

pub struct PythonSourceCheck;

impl PythonSourceCheck {
    pub fn new() -> Self {
        Self
    }

    fn check_file(
        file: &ScopedFile,
        inspector: &PythonInspector,
        ctx: &CheckContext,
    ) -> Vec<Finding> {
        let content = match std::fs::read_to_string(&file.abs_path) {
            Ok(c) => c,
            Err(_) => {
                return vec![Finding::new(
                    Severity::Warning,
                    Category::PythonSource,
                    Location::file(&file.rel_path),
                    "source file could not be read".to_string(),
                )]
            }
        };

        let summary = match inspector.inspect(&content) {
            Ok(s) => s,
            Err(_) => {
                return vec![Finding::new(
                    Severity::Warning,
                    Category::PythonSource,
                    Location::file(&file.rel_path),
                    "source file could not be parsed".to_string(),
                )]
            }
        };

        let mut findings = Vec::new();

        if summary.has_syntax_errors {
            findings.push(Finding::new(
                Severity::Warning,
                Category::PythonSource,
                Location::file(&file.rel_path),
                "source file has syntax errors; structural checks may be incomplete".to_string(),
            ));
        }

        // All code must live in functions: flag module-level executables
        for statement in &summary.statements {
            if statement.kind == TopLevelKind::Executable {
                findings.push(Finding::new(
                    Severity::Error,
                    Category::PythonSource,
                    Location::line(&file.rel_path, statement.line),
                    "module-level statement outside any function or class".to_string(),
                ));
            }
        }

        for function in &summary.functions {
            if !function.has_docstring {
                findings.push(Finding::new(
                    Severity::Error,
                    Category::PythonSource,
                    Location::line(&file.rel_path, function.line),
                    format!("function '{}' is missing a docstring", function.name),
                ));
            }
        }

        findings.extend(Self::restricted_api_findings(file, &summary, ctx));

        findings
    }

    /// One finding per (file, restricted name), anchored at the first
    /// import or call of that name
    fn restricted_api_findings(
        file: &ScopedFile,
        summary: &ModuleSummary,
        ctx: &CheckContext,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();

        for restricted in &ctx.config.python.restricted {
            let first_line = summary
                .imports
                .iter()
                .chain(summary.calls.iter())
                .filter(|r| name_matches(&r.name, restricted))
                .map(|r| r.line)
                .min();

            if let Some(line) = first_line {
                findings.push(Finding::new(
                    Severity::Error,
                    Category::PythonSource,
                    Location::line(&file.rel_path, line),
                    format!("restricted API '{}' is imported or called", restricted),
                ));
            }
        }

        findings
    }
}

fn name_matches(name: &str, restricted: &str) -> bool {
    name == restricted || name.starts_with(&format!("{}.", restricted))
}

impl Default for PythonSourceCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for PythonSourceCheck {
    fn name(&self) -> &str {
        "python source"
    }

    fn category(&self) -> Category {
        Category::PythonSource
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Finding> {
        let sources: Vec<&ScopedFile> = ctx
            .files
            .iter()
            .filter(|f| f.extension().as_deref() == Some("py"))
            .collect();
        if sources.is_empty() {
            return Vec::new();
        }

        let inspector = PythonInspector::new();

        // Per-file structural checks; collect preserves file order
        let mut findings: Vec<Finding> = sources
            .par_iter()
            .map(|file| Self::check_file(file, &inspector, ctx))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        let analyzed: Vec<AnalyzedFile> = sources
            .iter()
            .map(|f| AnalyzedFile {
                abs: f.abs_path.clone(),
                rel: f.rel_path.clone(),
            })
            .collect();
        findings.extend(ctx.lint.run(&analyzed, ctx.repo_root, false));

        findings
    }
}
