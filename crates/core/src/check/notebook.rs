//! Notebook check — structural ceilings plus linting of the virtual source
//!
//! Each notebook is parsed into an ordered cell sequence and judged against
//! the cell-count, cell-length, and defines-functions rules. The code cells
//! are then concatenated in order into one virtual source unit that goes
//! through the same external-analyzer pipeline as plain sources, with
//! diagnostics attributed back to the originating cell where the line maps
//! to one.

use super::{Check, CheckContext};
use crate::analyzer::AnalyzedFile;
use crate::finding::{Category, Finding, Location, Severity};
use crate::parser::notebook::parse_notebook;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// Line span of one code cell inside the virtual source unit
struct CellSpan {
    cell_index: usize,
    /// 1-based inclusive range
    start: usize,
    end: usize,
}

pub struct NotebookCheck;

impl NotebookCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NotebookCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for NotebookCheck {
    fn name(&self) -> &str {
        "notebook"
    }

    fn category(&self) -> Category {
        Category::Notebook
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Finding> {
        let notebooks: Vec<_> = ctx
            .files
            .iter()
            .filter(|f| f.extension().as_deref() == Some("ipynb"))
            .collect();
        if notebooks.is_empty() {
            return Vec::new();
        }

        let limits = &ctx.config.notebook;
        let mut findings = Vec::new();

        let scratch = TempDir::new().ok();
        if scratch.is_none() {
            findings.push(Finding::new(
                Severity::Warning,
                Category::Notebook,
                Location::file("."),
                "could not create a scratch directory; notebook lint skipped".to_string(),
            ));
        }
        let mut virtual_files: Vec<AnalyzedFile> = Vec::new();
        let mut cell_spans: HashMap<PathBuf, Vec<CellSpan>> = HashMap::new();

        for file in &notebooks {
            let content = match std::fs::read_to_string(&file.abs_path) {
                Ok(c) => c,
                Err(_) => {
                    findings.push(Finding::new(
                        Severity::Error,
                        Category::Notebook,
                        Location::file(&file.rel_path),
                        "notebook could not be read".to_string(),
                    ));
                    continue;
                }
            };

            let parsed = match parse_notebook(&content) {
                Ok(nb) => nb,
                Err(_) => {
                    // Fail-soft: one finding, no per-cell checks
                    findings.push(Finding::new(
                        Severity::Error,
                        Category::Notebook,
                        Location::file(&file.rel_path),
                        "notebook is malformed and could not be parsed".to_string(),
                    ));
                    continue;
                }
            };

            if parsed.cell_count() > limits.max_cells {
                findings.push(Finding::new(
                    Severity::Error,
                    Category::Notebook,
                    Location::file(&file.rel_path),
                    format!(
                        "notebook has {} cells (limit {})",
                        parsed.cell_count(),
                        limits.max_cells
                    ),
                ));
            }

            for (index, cell) in parsed.cells.iter().enumerate() {
                if !cell.is_code() {
                    continue;
                }
                let lines = cell.code_line_count();
                if lines > limits.max_lines_per_cell {
                    findings.push(Finding::new(
                        Severity::Error,
                        Category::Notebook,
                        Location::cell(&file.rel_path, index),
                        format!(
                            "code cell has {} lines (limit {})",
                            lines, limits.max_lines_per_cell
                        ),
                    ));
                }
            }

            if parsed.function_def_count() == 0 {
                findings.push(Finding::new(
                    Severity::Error,
                    Category::Notebook,
                    Location::file(&file.rel_path),
                    "notebook defines no functions (script-style notebooks should be modularized)"
                        .to_string(),
                ));
            }

            // Concatenate code cells into the virtual source unit
            if let Some(scratch) = &scratch {
                let mut source = String::new();
                let mut spans = Vec::new();
                let mut next_line = 1usize;
                for (index, cell) in parsed.cells.iter().enumerate() {
                    if !cell.is_code() {
                        continue;
                    }
                    let start = next_line;
                    for line in &cell.lines {
                        source.push_str(line);
                        source.push('\n');
                        next_line += 1;
                    }
                    spans.push(CellSpan {
                        cell_index: index,
                        start,
                        end: next_line.saturating_sub(1),
                    });
                }

                if !source.trim().is_empty() {
                    let flat_name = format!(
                        "{}.py",
                        file.rel_path.to_string_lossy().replace(['/', '\\'], "_")
                    );
                    let virtual_path = scratch.path().join(flat_name);
                    if std::fs::write(&virtual_path, &source).is_ok() {
                        virtual_files.push(AnalyzedFile {
                            abs: virtual_path,
                            rel: file.rel_path.clone(),
                        });
                        cell_spans.insert(file.rel_path.clone(), spans);
                    }
                }
            }
        }

        // Lint the virtual units and attribute diagnostics back to cells
        for finding in ctx.lint.run(&virtual_files, ctx.repo_root, true) {
            let relocated = match &finding.location {
                Location::Line { path, line } => Some(match locate_cell(&cell_spans, path, *line) {
                    Some(cell) => Location::cell(path.clone(), cell),
                    None => Location::file(path.clone()),
                }),
                _ => None,
            };
            findings.push(match relocated {
                Some(location) => Finding::new(
                    finding.severity,
                    finding.category,
                    location,
                    finding.message,
                ),
                None => finding,
            });
        }

        findings
    }
}

fn locate_cell(
    spans: &HashMap<PathBuf, Vec<CellSpan>>,
    path: &PathBuf,
    line: usize,
) -> Option<usize> {
    spans
        .get(path)?
        .iter()
        .find(|s| s.start <= line && line <= s.end)
        .map(|s| s.cell_index)
}
