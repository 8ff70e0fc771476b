//! Python structural inspection using Tree-sitter
//!
//! Produces a [`ModuleSummary`] answering the questions the python-source
//! check asks: which top-level statements are executable code, which
//! functions lack docstrings, and which modules are imported or called.

use super::ParseError;
use regex::Regex;
use std::sync::OnceLock;
use tree_sitter::{Node, Parser, Tree};

/// Classification of one top-level statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelKind {
    /// `import x` / `from x import y`
    Import,
    /// Function or class definition (decorated or not)
    Definition,
    /// Bare literal expression or literal assignment (docstrings, constants)
    Constant,
    /// The `if __name__ == "__main__":` guard
    MainGuard,
    /// Anything else — executable module-level code
    Executable,
}

#[derive(Debug, Clone)]
pub struct TopLevel {
    pub kind: TopLevelKind,
    /// 1-based start line
    pub line: usize,
}

/// One function or method definition, anywhere in the module
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub name: String,
    pub line: usize,
    pub has_docstring: bool,
}

/// A referenced dotted name (import target or call target)
#[derive(Debug, Clone)]
pub struct NameRef {
    pub name: String,
    pub line: usize,
}

/// Structural summary of one Python module
#[derive(Debug, Clone, Default)]
pub struct ModuleSummary {
    pub statements: Vec<TopLevel>,
    pub functions: Vec<FunctionInfo>,
    pub imports: Vec<NameRef>,
    pub calls: Vec<NameRef>,
    /// Tree-sitter reported syntax errors; structural results are partial
    pub has_syntax_errors: bool,
}

fn main_guard_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^\(?\s*(?:__name__\s*==\s*["']__main__["']|["']__main__["']\s*==\s*__name__)\s*\)?$"#)
            .unwrap()
    })
}

const LITERAL_KINDS: &[&str] = &[
    "string",
    "concatenated_string",
    "integer",
    "float",
    "true",
    "false",
    "none",
];

/// Python structural inspector
pub struct PythonInspector {
    language: tree_sitter::Language,
}

impl PythonInspector {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::TreeSitter(e.to_string()))?;
        Ok(parser)
    }

    fn parse_tree(&self, source: &str) -> Result<Tree, ParseError> {
        let mut parser = self.create_parser()?;
        parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Python("failed to parse source".to_string()))
    }

    /// Inspect a module and summarize its structure
    pub fn inspect(&self, source: &str) -> Result<ModuleSummary, ParseError> {
        let tree = self.parse_tree(source)?;
        let root = tree.root_node();

        let mut summary = ModuleSummary {
            has_syntax_errors: root.has_error(),
            ..Default::default()
        };

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "comment" {
                continue;
            }
            let kind = classify_top_level(&child, source);
            summary.statements.push(TopLevel {
                kind,
                line: child.start_position().row + 1,
            });
        }

        collect_imports(&root, source, &mut summary.imports);
        collect_functions(&root, source, &mut summary.functions);
        collect_calls(&root, source, &mut summary.calls);

        Ok(summary)
    }
}

impl Default for PythonInspector {
    fn default() -> Self {
        Self::new()
    }
}

fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn classify_top_level(node: &Node, source: &str) -> TopLevelKind {
    match node.kind() {
        "import_statement" | "import_from_statement" | "future_import_statement" => {
            TopLevelKind::Import
        }
        "function_definition" | "class_definition" | "decorated_definition" => {
            TopLevelKind::Definition
        }
        "if_statement" => {
            let condition = node
                .child_by_field_name("condition")
                .map(|c| node_text(&c, source).trim().to_string())
                .unwrap_or_default();
            if main_guard_pattern().is_match(&condition) {
                TopLevelKind::MainGuard
            } else {
                TopLevelKind::Executable
            }
        }
        "expression_statement" => classify_expression(node, source),
        _ => TopLevelKind::Executable,
    }
}

fn classify_expression(node: &Node, _source: &str) -> TopLevelKind {
    let inner = match node.named_child(0) {
        Some(c) => c,
        None => return TopLevelKind::Constant,
    };

    if LITERAL_KINDS.contains(&inner.kind()) {
        return TopLevelKind::Constant;
    }

    if inner.kind() == "assignment" {
        // `x = <literal>` is a module constant; anything computed is code
        return match inner.child_by_field_name("right") {
            Some(rhs) if LITERAL_KINDS.contains(&rhs.kind()) => TopLevelKind::Constant,
            // bare annotation (`x: int`) has no right-hand side
            None => TopLevelKind::Constant,
            Some(_) => TopLevelKind::Executable,
        };
    }

    TopLevelKind::Executable
}

fn collect_imports(root: &Node, source: &str, out: &mut Vec<NameRef>) {
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "import_statement" => {
                let mut inner = child.walk();
                for item in child.named_children(&mut inner) {
                    let name_node = match item.kind() {
                        "dotted_name" => Some(item),
                        "aliased_import" => item.child_by_field_name("name"),
                        _ => None,
                    };
                    if let Some(n) = name_node {
                        out.push(NameRef {
                            name: node_text(&n, source).to_string(),
                            line: child.start_position().row + 1,
                        });
                    }
                }
            }
            "import_from_statement" => {
                if let Some(module) = child.child_by_field_name("module_name") {
                    out.push(NameRef {
                        name: node_text(&module, source).to_string(),
                        line: child.start_position().row + 1,
                    });
                }
            }
            _ => {}
        }
    }
}

fn collect_functions(node: &Node, source: &str, out: &mut Vec<FunctionInfo>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "function_definition" {
            let name = child
                .child_by_field_name("name")
                .map(|n| node_text(&n, source).to_string())
                .unwrap_or_default();
            out.push(FunctionInfo {
                name,
                line: child.start_position().row + 1,
                has_docstring: body_has_docstring(&child, source),
            });
        }
        collect_functions(&child, source, out);
    }
}

fn body_has_docstring(func: &Node, source: &str) -> bool {
    let body = match func.child_by_field_name("body") {
        Some(b) => b,
        None => return false,
    };
    let first = match body.named_child(0) {
        Some(f) => f,
        None => return false,
    };
    if first.kind() != "expression_statement" {
        return false;
    }
    match first.named_child(0) {
        Some(s) if s.kind() == "string" || s.kind() == "concatenated_string" => {
            !docstring_text(node_text(&s, source)).is_empty()
        }
        _ => false,
    }
}

/// Strip string prefixes and quotes to judge whether a docstring has content
fn docstring_text(raw: &str) -> String {
    let trimmed = raw
        .trim_start_matches(|c: char| matches!(c, 'r' | 'R' | 'b' | 'B' | 'f' | 'F' | 'u' | 'U'));
    trimmed
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

fn collect_calls(node: &Node, source: &str, out: &mut Vec<NameRef>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "call" {
            if let Some(function) = child.child_by_field_name("function") {
                out.push(NameRef {
                    name: node_text(&function, source).to_string(),
                    line: child.start_position().row + 1,
                });
            }
        }
        collect_calls(&child, source, out);
    }
}
