//! Configuration file parsing for .repograde.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for .repograde.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeConfig {
    #[serde(default)]
    pub branches: BranchConfig,

    #[serde(default)]
    pub notebook: NotebookConfig,

    #[serde(default)]
    pub python: PythonConfig,

    #[serde(default)]
    pub hygiene: HygieneConfig,

    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchConfig {
    /// Branch names must match this pattern unless they are disallowed outright
    #[serde(default = "default_branch_pattern")]
    pub pattern: String,

    /// Placeholder names that are flagged even when they match the pattern
    #[serde(default = "default_disallowed_branches")]
    pub disallowed: Vec<String>,

    /// Branches with no commit in this many days are considered dead and
    /// excluded from info reporting
    #[serde(default = "default_staleness_days")]
    pub staleness_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookConfig {
    /// Max cells per notebook (code and non-code)
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,

    /// Max non-blank lines in a single code cell
    #[serde(default = "default_max_lines_per_cell")]
    pub max_lines_per_cell: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PythonConfig {
    /// Module names that must not be imported or called
    #[serde(default = "default_restricted_apis")]
    pub restricted: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HygieneConfig {
    /// Path segments that mark a file as a stray artifact
    #[serde(default = "default_deny_segments")]
    pub deny_segments: Vec<String>,

    /// Exact file names that mark a file as a stray artifact
    #[serde(default = "default_deny_filenames")]
    pub deny_filenames: Vec<String>,

    /// Extensions (without dot) that mark a file as a stray artifact
    #[serde(default = "default_deny_extensions")]
    pub deny_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default = "default_true")]
    pub pyflakes: bool,

    #[serde(default = "default_true")]
    pub black: bool,

    /// Opt-in; also enabled by the --lint flag
    #[serde(default)]
    pub pylint: bool,

    /// Deadline per analyzer invocation
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Findings shown per severity section before truncation
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Enable color output
    #[serde(default = "default_true")]
    pub color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Paths excluded from the file universe (gitignore syntax)
    #[serde(default = "default_ignore_paths")]
    pub paths: Vec<String>,
}

// Default functions
fn default_branch_pattern() -> String {
    "^[a-z0-9]+(-[a-z0-9]+)*$".to_string()
}

fn default_disallowed_branches() -> Vec<String> {
    ["master", "patch-1", "new-branch", "test", "temp", "wip"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_staleness_days() -> i64 {
    90
}

fn default_max_cells() -> usize {
    10
}

fn default_max_lines_per_cell() -> usize {
    15
}

fn default_restricted_apis() -> Vec<String> {
    vec!["subprocess".to_string()]
}

fn default_deny_segments() -> Vec<String> {
    [
        "__pycache__",
        ".ipynb_checkpoints",
        ".pytest_cache",
        ".mypy_cache",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_deny_filenames() -> Vec<String> {
    vec![".DS_Store".to_string(), "Thumbs.db".to_string()]
}

fn default_deny_extensions() -> Vec<String> {
    ["pyc", "pyo", "swp", "orig"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_display_limit() -> usize {
    5
}

fn default_ignore_paths() -> Vec<String> {
    vec![
        ".git/".to_string(),
        ".venv/".to_string(),
        "venv/".to_string(),
        "env/".to_string(),
        "node_modules/".to_string(),
        "site-packages/".to_string(),
    ]
}

impl Default for GradeConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty TOML should parse to defaults")
    }
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            pattern: default_branch_pattern(),
            disallowed: default_disallowed_branches(),
            staleness_days: default_staleness_days(),
        }
    }
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            max_cells: default_max_cells(),
            max_lines_per_cell: default_max_lines_per_cell(),
        }
    }
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            restricted: default_restricted_apis(),
        }
    }
}

impl Default for HygieneConfig {
    fn default() -> Self {
        Self {
            deny_segments: default_deny_segments(),
            deny_filenames: default_deny_filenames(),
            deny_extensions: default_deny_extensions(),
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            pyflakes: true,
            black: true,
            pylint: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            display_limit: default_display_limit(),
            color: true,
        }
    }
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            paths: default_ignore_paths(),
        }
    }
}

impl GradeConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: GradeConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find and load .repograde.toml from the given directory or ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(".repograde.toml");
            if config_path.exists() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
