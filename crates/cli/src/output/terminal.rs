//! Terminal output formatting
//!
//! Findings are grouped by severity; within a section they keep aggregate
//! order (registry order, then insertion order). Default mode truncates
//! each section to the display limit with a summary line; verbose mode
//! renders everything. Rendering never changes the verdict.

use colored::Colorize;
use repograde_core::{Finding, Report, Severity};

pub fn render(report: &Report, verbose: bool, limit: usize) -> String {
    let mut out = String::new();

    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        let findings: Vec<&Finding> = report.with_severity(severity).collect();
        if findings.is_empty() {
            continue;
        }

        out.push_str(&format!("{}\n", section_header(severity, findings.len())));

        let shown = if verbose {
            findings.len()
        } else {
            findings.len().min(limit)
        };
        for finding in &findings[..shown] {
            out.push_str(&format_finding(finding));
            out.push('\n');
        }
        if shown < findings.len() {
            out.push_str(&format!(
                "  {}\n",
                more_line(severity, findings.len() - shown).dimmed()
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("  {}\n", "\u{2500}".repeat(60).dimmed()));
    out.push_str(&format!(
        "  {} \u{00b7} {} \u{00b7} {}\n",
        format!("{} error(s)", report.errors).red(),
        format!("{} warning(s)", report.warnings).yellow(),
        format!("{} info", report.info).blue()
    ));
    if report.failed() {
        out.push_str(&format!(
            "  {}\n",
            "FAIL — error-level findings present".red().bold()
        ));
    } else {
        out.push_str(&format!(
            "  {}\n",
            "PASS — no error-level findings".green().bold()
        ));
    }

    out
}

fn section_header(severity: Severity, count: usize) -> String {
    match severity {
        Severity::Error => format!("  {}", format!("ERRORS ({})", count).red().bold()),
        Severity::Warning => format!("  {}", format!("WARNINGS ({})", count).yellow().bold()),
        Severity::Info => format!("  {}", format!("INFO ({})", count).blue().bold()),
    }
}

fn format_finding(finding: &Finding) -> String {
    let icon = match finding.severity {
        Severity::Error => "\u{2716}".red().to_string(),
        Severity::Warning => "\u{25b2}".yellow().to_string(),
        Severity::Info => "\u{25c6}".blue().to_string(),
    };
    format!(
        "  {} {} \u{2014} {} {}",
        icon,
        finding.location,
        finding.message,
        format!("[{}]", finding.category).dimmed()
    )
}

fn more_line(severity: Severity, hidden: usize) -> String {
    match severity {
        Severity::Info => format!("\u{2026} and {} more info", hidden),
        _ => format!("\u{2026} and {} more {}(s)", hidden, severity),
    }
}
