//! Tests for the file hygiene check

use repograde_core::check::file_hygiene::FileHygieneCheck;
use repograde_core::check::{Check, CheckContext};
use repograde_core::{GradeConfig, LintPipeline, Location, ScopedFile, Severity};
use std::path::{Path, PathBuf};

fn scoped(rel: &str) -> ScopedFile {
    ScopedFile {
        rel_path: PathBuf::from(rel),
        abs_path: PathBuf::from(rel),
    }
}

fn run_check(files: &[ScopedFile], config: &GradeConfig) -> Vec<repograde_core::Finding> {
    let lint = LintPipeline::disabled();
    let ctx = CheckContext {
        repo_root: Path::new("."),
        branch: "main",
        since: None,
        files,
        branches: &[],
        verbose: false,
        config,
        lint: &lint,
    };
    FileHygieneCheck::new().run(&ctx)
}

#[test]
fn flags_bytecode_cache_directories() {
    let config = GradeConfig::default();
    let findings = run_check(&[scoped("pkg/__pycache__/module.cpython-311.pyc")], &config);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Error);
    assert!(findings[0].message.contains("__pycache__"));
}

#[test]
fn flags_editor_and_os_metadata() {
    let config = GradeConfig::default();
    let findings = run_check(
        &[
            scoped("data/.DS_Store"),
            scoped("notes/draft.swp"),
            scoped("src/app.py"),
        ],
        &config,
    );

    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.severity == Severity::Error));
}

#[test]
fn one_finding_per_offending_path() {
    let config = GradeConfig::default();
    // Matches both the segment rule and the extension rule; first wins
    let findings = run_check(&[scoped("__pycache__/cached.pyc")], &config);
    assert_eq!(findings.len(), 1);
}

#[test]
fn clean_tree_produces_nothing() {
    let config = GradeConfig::default();
    let findings = run_check(
        &[scoped("src/app.py"), scoped("notebooks/analysis.ipynb")],
        &config,
    );
    assert!(findings.is_empty());
}

#[test]
fn egg_info_directories_are_artifacts() {
    let config = GradeConfig::default();
    let findings = run_check(&[scoped("mypkg.egg-info/PKG-INFO")], &config);

    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.contains("egg-info"));
}

#[test]
fn checkpoint_directories_are_artifacts() {
    let config = GradeConfig::default();
    let findings = run_check(&[scoped("nb/.ipynb_checkpoints/analysis-checkpoint.ipynb")], &config);

    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].location,
        Location::file("nb/.ipynb_checkpoints/analysis-checkpoint.ipynb")
    );
}

#[test]
fn matching_is_by_path_not_content() {
    let config = GradeConfig::default();
    // The path does not exist on disk; the check must not care
    let findings = run_check(&[scoped("ghost/__pycache__/missing.pyc")], &config);
    assert_eq!(findings.len(), 1);
}
