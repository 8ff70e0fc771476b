//! Tests for finding aggregation and deduplication

use repograde_core::{Aggregator, Category, Finding, Location, Severity};

#[test]
fn identical_findings_collapse_to_one() {
    let duplicate = Finding::new(
        Severity::Error,
        Category::FileHygiene,
        Location::file("data/.DS_Store"),
        "stray artifact committed: deny-listed file name '.DS_Store'",
    );

    let mut aggregator = Aggregator::new();
    aggregator.extend([duplicate.clone(), duplicate.clone()]);
    let report = aggregator.finalize();

    assert_eq!(report.len(), 1);
    assert_eq!(report.errors, 1);
}

#[test]
fn first_occurrence_wins_across_batches() {
    let finding = Finding::new(
        Severity::Warning,
        Category::BranchHygiene,
        Location::branch("wip"),
        "branch name 'wip' is a disallowed placeholder name",
    );

    let mut aggregator = Aggregator::new();
    aggregator.extend([finding.clone()]);
    aggregator.extend([finding.clone()]);
    let report = aggregator.finalize();

    assert_eq!(report.len(), 1);
}

#[test]
fn same_location_and_message_in_different_categories_both_survive() {
    // The restricted-API check and an external linter may flag the same
    // line; categories differ, so both are kept
    let a = Finding::new(
        Severity::Error,
        Category::PythonSource,
        Location::line("src/app.py", 1),
        "'subprocess' imported but unused",
    );
    let b = Finding::new(
        Severity::Error,
        Category::ExternalLint,
        Location::line("src/app.py", 1),
        "'subprocess' imported but unused",
    );

    let mut aggregator = Aggregator::new();
    aggregator.extend([a, b]);
    let report = aggregator.finalize();

    assert_eq!(report.len(), 2);
}

#[test]
fn insertion_order_is_preserved() {
    let messages = ["first", "second", "third"];
    let mut aggregator = Aggregator::new();
    aggregator.extend(messages.iter().map(|m| {
        Finding::new(
            Severity::Info,
            Category::BranchHygiene,
            Location::branch(*m),
            *m,
        )
    }));
    let report = aggregator.finalize();

    let rendered: Vec<&str> = report.findings.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(rendered, messages);
}

#[test]
fn distinct_locations_are_not_deduplicated() {
    let mut aggregator = Aggregator::new();
    aggregator.extend([
        Finding::new(
            Severity::Error,
            Category::PythonSource,
            Location::line("src/app.py", 3),
            "module-level statement outside any function or class",
        ),
        Finding::new(
            Severity::Error,
            Category::PythonSource,
            Location::line("src/app.py", 9),
            "module-level statement outside any function or class",
        ),
    ]);
    let report = aggregator.finalize();

    assert_eq!(report.len(), 2);
}
