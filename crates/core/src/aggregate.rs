//! Collects findings from every check into one finalized [`Report`]
//!
//! Checks hand their finding sequences to the aggregator in registry order;
//! the aggregator is the join barrier between running checks and rendering.

use crate::finding::{Category, Finding, Location, Report, Severity};
use std::collections::HashSet;

/// Accumulates findings across checks, dropping exact duplicates.
///
/// Two findings are the same event when they share (category, location,
/// message); the first occurrence wins. Severity is not part of the key —
/// a check assigns severity at creation and identical events cannot
/// disagree on it.
#[derive(Default)]
pub struct Aggregator {
    findings: Vec<Finding>,
    seen: HashSet<(Category, Location, String)>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch of findings, preserving insertion order
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            let key = (
                finding.category,
                finding.location.clone(),
                finding.message.clone(),
            );
            if self.seen.insert(key) {
                self.findings.push(finding);
            }
        }
    }

    /// Finalize into an immutable report with derived severity counts
    pub fn finalize(self) -> Report {
        let mut errors = 0;
        let mut warnings = 0;
        let mut info = 0;
        for finding in &self.findings {
            match finding.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
                Severity::Info => info += 1,
            }
        }

        Report {
            findings: self.findings,
            errors,
            warnings,
            info,
        }
    }
}
