//! Tests for configuration loading

use repograde_core::GradeConfig;
use tempfile::TempDir;

#[test]
fn defaults_match_the_house_rules() {
    let config = GradeConfig::default();

    assert_eq!(config.notebook.max_cells, 10);
    assert_eq!(config.notebook.max_lines_per_cell, 15);
    assert_eq!(config.branches.staleness_days, 90);
    assert_eq!(config.output.display_limit, 5);
    assert!(config.lint.pyflakes);
    assert!(config.lint.black);
    assert!(!config.lint.pylint);
    assert!(config
        .python
        .restricted
        .contains(&"subprocess".to_string()));
    assert!(config
        .hygiene
        .deny_segments
        .contains(&"__pycache__".to_string()));
}

#[test]
fn partial_file_overrides_only_named_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".repograde.toml");
    std::fs::write(
        &path,
        r#"
[notebook]
max_cells = 20

[lint]
pylint = true
"#,
    )
    .unwrap();

    let config = GradeConfig::from_file(&path).unwrap();
    assert_eq!(config.notebook.max_cells, 20);
    assert_eq!(config.notebook.max_lines_per_cell, 15);
    assert!(config.lint.pylint);
    assert!(config.lint.pyflakes);
}

#[test]
fn find_and_load_walks_ancestors() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".repograde.toml"),
        "[output]\ndisplay_limit = 3\n",
    )
    .unwrap();
    let nested = dir.path().join("src").join("pkg");
    std::fs::create_dir_all(&nested).unwrap();

    let config = GradeConfig::find_and_load(&nested).unwrap();
    assert_eq!(config.output.display_limit, 3);
}

#[test]
fn missing_config_means_defaults() {
    let dir = TempDir::new().unwrap();
    let config = GradeConfig::find_and_load(dir.path()).unwrap();
    assert_eq!(config.notebook.max_cells, 10);
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".repograde.toml");
    std::fs::write(&path, "[notebook\nmax_cells = ").unwrap();

    assert!(GradeConfig::from_file(&path).is_err());
}

#[test]
fn save_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".repograde.toml");

    let mut config = GradeConfig::default();
    config.notebook.max_cells = 12;
    config.save(&path).unwrap();

    let loaded = GradeConfig::from_file(&path).unwrap();
    assert_eq!(loaded.notebook.max_cells, 12);
}
