//! Scope filtering with gitignore-style patterns
//!
//! The file universe comes from a branch tree, so filtering happens on
//! recorded paths rather than a filesystem walk. Patterns use the same
//! gitignore syntax the `ignore` crate implements.

use anyhow::Result;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Excludes configured paths from the file universe
pub struct ScopeFilter {
    matcher: Gitignore,
}

impl ScopeFilter {
    /// Build a filter from gitignore-syntax patterns (e.g. `vendor/`,
    /// `*.min.js`)
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new("");
        for pattern in patterns {
            builder.add_line(None, pattern)?;
        }
        Ok(Self {
            matcher: builder.build()?,
        })
    }

    /// Whether a repo-relative path is excluded from scope
    pub fn is_ignored(&self, rel_path: &Path) -> bool {
        self.matcher
            .matched_path_or_any_parents(rel_path, false)
            .is_ignore()
    }
}
