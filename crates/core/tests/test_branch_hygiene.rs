//! Tests for the branch hygiene check

use chrono::{Duration, Utc};
use repograde_core::check::branch_hygiene::BranchHygieneCheck;
use repograde_core::check::{Check, CheckContext};
use repograde_core::{BranchInfo, GradeConfig, LintPipeline, Severity};
use std::path::Path;

fn branch(name: &str, age_days: i64) -> BranchInfo {
    BranchInfo {
        name: name.to_string(),
        last_commit_time: Utc::now() - Duration::days(age_days),
        last_commit_author: "casey".to_string(),
    }
}

fn run_check(branches: &[BranchInfo], config: &GradeConfig) -> Vec<repograde_core::Finding> {
    let lint = LintPipeline::disabled();
    let ctx = CheckContext {
        repo_root: Path::new("."),
        branch: "main",
        since: None,
        files: &[],
        branches,
        verbose: false,
        config,
        lint: &lint,
    };
    BranchHygieneCheck::new().run(&ctx)
}

#[test]
fn conventional_live_branch_gets_only_info() {
    let config = GradeConfig::default();
    let findings = run_check(&[branch("feature-login", 5)], &config);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Info);
    assert!(findings[0].message.contains("casey"));
}

#[test]
fn nonconforming_name_is_warned() {
    let config = GradeConfig::default();
    let findings = run_check(&[branch("Feature_Login", 5)], &config);

    let warnings: Vec<_> = findings
        .iter()
        .filter(|f| f.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0]
        .message
        .contains("does not match the lowercase-hyphenated convention"));
}

#[test]
fn disallowed_placeholder_name_is_warned() {
    let config = GradeConfig::default();
    let findings = run_check(&[branch("wip", 5)], &config);

    let warnings: Vec<_> = findings
        .iter()
        .filter(|f| f.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("disallowed placeholder name"));
}

#[test]
fn stale_branch_is_silent() {
    let config = GradeConfig::default();
    // Past the 90-day window: no info line, but naming is still judged
    let findings = run_check(&[branch("old-experiment", 120)], &config);
    assert!(findings.is_empty());
}

#[test]
fn stale_branch_with_bad_name_still_warns() {
    let config = GradeConfig::default();
    let findings = run_check(&[branch("OldStuff", 120)], &config);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Warning);
}

#[test]
fn main_and_dev_pass_the_convention() {
    let config = GradeConfig::default();
    let findings = run_check(&[branch("main", 1), branch("dev", 1)], &config);

    assert!(findings.iter().all(|f| f.severity == Severity::Info));
    assert_eq!(findings.len(), 2);
}

#[test]
fn invalid_configured_pattern_falls_back_with_warning() {
    let mut config = GradeConfig::default();
    config.branches.pattern = "[unclosed".to_string();

    let findings = run_check(&[branch("feature-login", 5)], &config);
    assert!(findings
        .iter()
        .any(|f| f.severity == Severity::Warning && f.message.contains("not a valid regex")));
    // The default convention still accepts the branch
    assert!(findings
        .iter()
        .all(|f| !f.message.contains("lowercase-hyphenated")));
}
