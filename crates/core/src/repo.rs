//! Repository accessor — wraps the git backend behind the engine's needs
//!
//! Lists branches with last-commit metadata, resolves a branch tip to a file
//! universe (tree walk, no checkout required), narrows that universe to a
//! date window, and materializes file contents so checks and external
//! analyzers always see real paths on disk.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use git2::{BranchType, ObjectType, Oid, Repository, Sort};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

use crate::discovery::ScopeFilter;

/// Infrastructure failures from the repository accessor
///
/// These abort the run before a report exists; they are never converted
/// into findings.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("{0} is not a git repository")]
    NotARepository(PathBuf),

    #[error("branch '{0}' does not exist")]
    UnknownBranch(String),

    #[error("failed to clone '{url}': {source}")]
    Clone {
        url: String,
        #[source]
        source: git2::Error,
    },

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One branch with the metadata the hygiene check needs
#[derive(Debug, Clone)]
pub struct BranchInfo {
    /// Short name, remote-tracking prefix stripped
    pub name: String,
    pub last_commit_time: DateTime<Utc>,
    pub last_commit_author: String,
}

/// A file in scope for one evaluation run
#[derive(Debug, Clone)]
pub struct ScopedFile {
    /// Path relative to the repository root, as recorded in the branch tree
    pub rel_path: PathBuf,
    /// Readable on-disk path (working tree or snapshot)
    pub abs_path: PathBuf,
}

impl ScopedFile {
    /// Lowercased extension, if any
    pub fn extension(&self) -> Option<String> {
        self.rel_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// The resolved file universe for one run
///
/// Owns the blob snapshot directory when contents had to be exported, so
/// the paths in `files` stay valid for as long as the scope is alive.
#[derive(Debug)]
pub struct FileScope {
    pub files: Vec<ScopedFile>,
    _snapshot: Option<TempDir>,
}

impl FileScope {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Read-only access to one repository for the duration of a run
pub struct RepoAccessor {
    repo: Repository,
    root: PathBuf,
    // Keeps a cloned remote repository alive until the run ends
    _clone_dir: Option<TempDir>,
}

impl std::fmt::Debug for RepoAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoAccessor")
            .field("root", &self.root)
            .field("_clone_dir", &self._clone_dir)
            .finish_non_exhaustive()
    }
}

impl RepoAccessor {
    /// Open an existing local repository
    pub fn open(path: &Path) -> Result<Self, RepoError> {
        let repo =
            Repository::open(path).map_err(|_| RepoError::NotARepository(path.to_path_buf()))?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf());
        Ok(Self {
            repo,
            root,
            _clone_dir: None,
        })
    }

    /// Clone a remote repository into a temporary directory
    pub fn clone_remote(url: &str) -> Result<Self, RepoError> {
        let dir = TempDir::new()?;
        let name = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("repo")
            .trim_end_matches(".git");
        let target = dir.path().join(name);

        let repo = Repository::clone(url, &target).map_err(|source| RepoError::Clone {
            url: url.to_string(),
            source,
        })?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| target.clone());

        Ok(Self {
            repo,
            root,
            _clone_dir: Some(dir),
        })
    }

    /// Whether the argument looks like a remote repository URL rather than
    /// a local path
    pub fn looks_like_remote(target: &str) -> bool {
        target.starts_with("http://")
            || target.starts_with("https://")
            || target.starts_with("git@")
            || target.starts_with("ssh://")
            || target.ends_with(".git")
    }

    /// Repository root on disk
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name of the currently checked-out branch
    pub fn current_branch(&self) -> Result<String, RepoError> {
        let head = self.repo.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    /// Whether a branch (local or remote-tracking) resolves to a commit
    pub fn branch_exists(&self, name: &str) -> bool {
        self.resolve_branch_commit(name).is_ok()
    }

    /// All branches (local and remote-tracking), deduplicated by short name
    ///
    /// The remote `HEAD` pointer is skipped; local branches win over their
    /// remote-tracking twins.
    pub fn list_branches(&self) -> Result<Vec<BranchInfo>, RepoError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut branches = Vec::new();

        for branch_type in [BranchType::Local, BranchType::Remote] {
            for entry in self.repo.branches(Some(branch_type))? {
                let (branch, _) = entry?;
                let full_name = match branch.name()? {
                    Some(n) => n.to_string(),
                    None => continue,
                };

                let short = match branch_type {
                    BranchType::Local => full_name.clone(),
                    BranchType::Remote => match full_name.split_once('/') {
                        Some((_, rest)) => rest.to_string(),
                        None => full_name.clone(),
                    },
                };
                if short == "HEAD" || !seen.insert(short.clone()) {
                    continue;
                }

                let commit = match branch.get().peel_to_commit() {
                    Ok(c) => c,
                    Err(_) => continue,
                };
                let last_commit_time = DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0)
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
                let last_commit_author = commit
                    .author()
                    .name()
                    .unwrap_or("unknown")
                    .to_string();

                branches.push(BranchInfo {
                    name: short,
                    last_commit_time,
                    last_commit_author,
                });
            }
        }

        branches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(branches)
    }

    /// Files reachable from a branch tip, optionally narrowed to paths
    /// touched by commits on or after `since`
    ///
    /// Contents come from the working tree when the branch is checked out
    /// and the file exists on disk; otherwise blobs are exported into a
    /// snapshot directory owned by the returned scope.
    pub fn files_in_scope(
        &self,
        branch: &str,
        since: Option<NaiveDate>,
        filter: &ScopeFilter,
    ) -> Result<FileScope, RepoError> {
        let commit = self.resolve_branch_commit(branch)?;
        let tree = commit.tree()?;

        // Pass 1: collect (relative_path, oid) pairs from the branch tree
        let mut entries: Vec<(PathBuf, Oid)> = Vec::new();
        tree.walk(git2::TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() != Some(ObjectType::Blob) {
                return git2::TreeWalkResult::Ok;
            }
            let name = match entry.name() {
                Some(n) => n,
                None => return git2::TreeWalkResult::Ok,
            };
            let rel_path = if dir.is_empty() {
                PathBuf::from(name)
            } else {
                PathBuf::from(dir).join(name)
            };
            if !filter.is_ignored(&rel_path) {
                entries.push((rel_path, entry.id()));
            }
            git2::TreeWalkResult::Ok
        })?;

        // Pass 2: optional date window
        if let Some(cutoff) = since {
            let touched = self.paths_touched_since(commit.id(), cutoff)?;
            entries.retain(|(rel, _)| touched.contains(rel));
        }

        // Pass 3: materialize contents
        let on_current_branch = self
            .current_branch()
            .map(|current| current == branch)
            .unwrap_or(false);

        let mut snapshot: Option<TempDir> = None;
        let mut files = Vec::with_capacity(entries.len());

        for (rel_path, oid) in entries {
            let workdir_path = self.root.join(&rel_path);
            let abs_path = if on_current_branch && workdir_path.is_file() {
                workdir_path
            } else {
                if snapshot.is_none() {
                    snapshot = Some(TempDir::new()?);
                }
                let snap = snapshot.as_ref().expect("snapshot initialized above");
                let target = snap.path().join(&rel_path);
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let blob = self.repo.find_blob(oid)?;
                std::fs::write(&target, blob.content())?;
                target
            };

            files.push(ScopedFile { rel_path, abs_path });
        }

        files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(FileScope {
            files,
            _snapshot: snapshot,
        })
    }

    /// Paths changed by commits dated on or after the cutoff, walking back
    /// from `tip`
    fn paths_touched_since(
        &self,
        tip: Oid,
        cutoff: NaiveDate,
    ) -> Result<HashSet<PathBuf>, RepoError> {
        let cutoff_ts = cutoff.and_time(NaiveTime::MIN).and_utc().timestamp();

        let mut walk = self.repo.revwalk()?;
        walk.push(tip)?;
        walk.set_sorting(Sort::TIME)?;

        let mut touched = HashSet::new();
        for oid in walk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            if commit.time().seconds() < cutoff_ts {
                continue;
            }

            let new_tree = commit.tree()?;
            let old_tree = match commit.parent(0) {
                Ok(parent) => Some(parent.tree()?),
                Err(_) => None, // root commit
            };
            let diff =
                self.repo
                    .diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), None)?;
            diff.foreach(
                &mut |delta, _| {
                    if let Some(path) = delta.new_file().path() {
                        touched.insert(path.to_path_buf());
                    }
                    true
                },
                None,
                None,
                None,
            )?;
        }

        Ok(touched)
    }

    fn resolve_branch_commit(&self, name: &str) -> Result<git2::Commit<'_>, RepoError> {
        if let Ok(branch) = self.repo.find_branch(name, BranchType::Local) {
            return Ok(branch.get().peel_to_commit()?);
        }
        if let Ok(branch) = self
            .repo
            .find_branch(&format!("origin/{}", name), BranchType::Remote)
        {
            return Ok(branch.get().peel_to_commit()?);
        }
        self.repo
            .revparse_single(name)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| RepoError::UnknownBranch(name.to_string()))
    }
}
