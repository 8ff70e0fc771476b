//! JSON output formatting
//!
//! The machine surface is never truncated; truncation is a terminal-only
//! presentation concern.

use repograde_core::Report;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput {
    pub findings: Vec<JsonFinding>,
    pub summary: JsonSummary,
    pub failed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFinding {
    pub severity: String,
    pub category: String,
    pub location: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

pub fn from_report(report: &Report) -> JsonOutput {
    JsonOutput {
        findings: report
            .findings
            .iter()
            .map(|f| JsonFinding {
                severity: f.severity.to_string(),
                category: f.category.to_string(),
                location: f.location.to_string(),
                message: f.message.clone(),
            })
            .collect(),
        summary: JsonSummary {
            errors: report.errors,
            warnings: report.warnings,
            info: report.info,
        },
        failed: report.failed(),
    }
}
