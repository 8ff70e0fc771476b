//! Tests for the finding model and report verdict

use repograde_core::{Aggregator, Category, Finding, Location, Severity};

fn finding(severity: Severity, message: &str) -> Finding {
    Finding::new(
        severity,
        Category::PythonSource,
        Location::file("src/app.py"),
        message,
    )
}

#[test]
fn failed_iff_errors_present() {
    // Synthetic severity mixes: failed must track error count alone
    let cases: Vec<(Vec<Severity>, bool)> = vec![
        (vec![], false),
        (vec![Severity::Info], false),
        (vec![Severity::Warning, Severity::Warning], false),
        (vec![Severity::Info, Severity::Warning, Severity::Info], false),
        (vec![Severity::Error], true),
        (vec![Severity::Warning, Severity::Error], true),
        (
            vec![Severity::Info, Severity::Error, Severity::Error, Severity::Warning],
            true,
        ),
    ];

    for (severities, expect_failed) in cases {
        let mut aggregator = Aggregator::new();
        aggregator.extend(
            severities
                .iter()
                .enumerate()
                .map(|(i, &s)| finding(s, &format!("finding {}", i))),
        );
        let report = aggregator.finalize();

        assert_eq!(report.failed(), expect_failed);
        assert_eq!(report.failed(), report.errors > 0);
    }
}

#[test]
fn counts_match_severities() {
    let mut aggregator = Aggregator::new();
    aggregator.extend([
        finding(Severity::Error, "a"),
        finding(Severity::Warning, "b"),
        finding(Severity::Warning, "c"),
        finding(Severity::Info, "d"),
    ]);
    let report = aggregator.finalize();

    assert_eq!(report.errors, 1);
    assert_eq!(report.warnings, 2);
    assert_eq!(report.info, 1);
    assert_eq!(report.len(), 4);
}

#[test]
fn location_display_is_stable() {
    assert_eq!(Location::branch("main").to_string(), "main");
    assert_eq!(Location::file("src/app.py").to_string(), "src/app.py");
    assert_eq!(Location::line("src/app.py", 7).to_string(), "src/app.py:7");
    assert_eq!(
        Location::cell("nb/analysis.ipynb", 3).to_string(),
        "nb/analysis.ipynb[cell 3]"
    );
}

#[test]
fn severity_display_is_lowercase() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!(Severity::Info.to_string(), "info");
}

#[test]
fn category_display_is_kebab_case() {
    assert_eq!(Category::BranchHygiene.to_string(), "branch-hygiene");
    assert_eq!(Category::FileHygiene.to_string(), "file-hygiene");
    assert_eq!(Category::Notebook.to_string(), "notebook");
    assert_eq!(Category::PythonSource.to_string(), "python-source");
    assert_eq!(Category::ExternalLint.to_string(), "external-lint");
}
