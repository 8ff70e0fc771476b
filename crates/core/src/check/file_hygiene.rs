//! File hygiene check — stray filesystem artifacts in the tree
//!
//! Matching is by path segment, file name, and extension; content is never
//! read. First matching rule wins, one finding per offending path.

use super::{Check, CheckContext};
use crate::config::HygieneConfig;
use crate::finding::{Category, Finding, Location, Severity};
use std::path::Path;

pub struct FileHygieneCheck;

impl FileHygieneCheck {
    pub fn new() -> Self {
        Self
    }

    fn artifact_reason(rel_path: &Path, rules: &HygieneConfig) -> Option<String> {
        for component in rel_path.components() {
            let segment = component.as_os_str().to_string_lossy();
            if rules.deny_segments.iter().any(|d| d == segment.as_ref()) {
                return Some(format!("path contains deny-listed segment '{}'", segment));
            }
            if segment.ends_with(".egg-info") {
                return Some(format!(
                    "path contains build artifact directory '{}'",
                    segment
                ));
            }
        }

        if let Some(name) = rel_path.file_name().and_then(|n| n.to_str()) {
            if rules.deny_filenames.iter().any(|d| d == name) {
                return Some(format!("deny-listed file name '{}'", name));
            }
        }

        if let Some(ext) = rel_path.extension().and_then(|e| e.to_str()) {
            let ext = ext.to_lowercase();
            if rules.deny_extensions.iter().any(|d| d == &ext) {
                return Some(format!("deny-listed extension '.{}'", ext));
            }
        }

        None
    }
}

impl Default for FileHygieneCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for FileHygieneCheck {
    fn name(&self) -> &str {
        "file hygiene"
    }

    fn category(&self) -> Category {
        Category::FileHygiene
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Finding> {
        let rules = &ctx.config.hygiene;
        let mut findings = Vec::new();

        for file in ctx.files {
            if let Some(reason) = Self::artifact_reason(&file.rel_path, rules) {
                findings.push(Finding::new(
                    Severity::Error,
                    Category::FileHygiene,
                    Location::file(&file.rel_path),
                    format!("stray artifact committed: {}", reason),
                ));
            }
        }

        findings
    }
}
