//! Jupyter notebook parsing into an ordered cell sequence

use super::ParseError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawNotebook {
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

/// Cell sources appear both as one string and as a list of lines in the wild
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Text(String::new())
    }
}

impl CellSource {
    fn into_lines(self) -> Vec<String> {
        match self {
            CellSource::Text(text) => text.split('\n').map(String::from).collect(),
            CellSource::Lines(lines) => lines
                .into_iter()
                .map(|l| l.trim_end_matches('\n').to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Code,
    Markdown,
    Raw,
}

/// One notebook cell with its source split into lines
#[derive(Debug, Clone)]
pub struct Cell {
    pub kind: CellKind,
    pub lines: Vec<String>,
}

impl Cell {
    pub fn is_code(&self) -> bool {
        self.kind == CellKind::Code
    }

    /// Non-blank source lines
    pub fn code_line_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.trim().is_empty()).count()
    }

    /// Lines starting a function definition
    pub fn function_def_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.trim_start().starts_with("def "))
            .count()
    }
}

/// A parsed notebook: an ordered sequence of classified cells
#[derive(Debug, Clone)]
pub struct Notebook {
    pub cells: Vec<Cell>,
}

impl Notebook {
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Function definitions across all code cells
    pub fn function_def_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.is_code())
            .map(Cell::function_def_count)
            .sum()
    }
}

/// Parse notebook JSON into an ordered cell sequence
pub fn parse_notebook(content: &str) -> Result<Notebook, ParseError> {
    let raw: RawNotebook = serde_json::from_str(content)?;

    let cells = raw
        .cells
        .into_iter()
        .map(|cell| {
            let kind = match cell.cell_type.as_str() {
                "code" => CellKind::Code,
                "markdown" => CellKind::Markdown,
                _ => CellKind::Raw,
            };
            Cell {
                kind,
                lines: cell.source.into_lines(),
            }
        })
        .collect();

    Ok(Notebook { cells })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_sources() {
        let content = r##"{"cells": [
            {"cell_type": "code", "source": ["def f():\n", "    return 1\n"]},
            {"cell_type": "markdown", "source": ["# Title\n"]}
        ]}"##;
        let nb = parse_notebook(content).unwrap();

        assert_eq!(nb.cell_count(), 2);
        assert!(nb.cells[0].is_code());
        assert_eq!(nb.cells[0].code_line_count(), 2);
        assert_eq!(nb.function_def_count(), 1);
    }

    #[test]
    fn test_parse_string_source() {
        let content = r#"{"cells": [
            {"cell_type": "code", "source": "x = 1\ny = 2"}
        ]}"#;
        let nb = parse_notebook(content).unwrap();
        assert_eq!(nb.cells[0].code_line_count(), 2);
        assert_eq!(nb.function_def_count(), 0);
    }

    #[test]
    fn test_blank_lines_not_counted() {
        let content = r#"{"cells": [
            {"cell_type": "code", "source": ["x = 1\n", "\n", "   \n", "y = 2\n"]}
        ]}"#;
        let nb = parse_notebook(content).unwrap();
        assert_eq!(nb.cells[0].code_line_count(), 2);
    }

    #[test]
    fn test_malformed_json_errors() {
        assert!(parse_notebook("{not json").is_err());
    }
}
