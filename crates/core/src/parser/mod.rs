//! Structural parsers for the file formats the checks inspect

pub mod notebook;
pub mod python;

use thiserror::Error;

/// Error types for parsing operations
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("malformed notebook: {0}")]
    Notebook(#[from] serde_json::Error),

    #[error("failed to parse python source: {0}")]
    Python(String),

    #[error("tree-sitter error: {0}")]
    TreeSitter(String),
}
