//! Version-control engine access
//!
//! The history walker and diff resolver only need two things from the
//! engine: a newest-first walk over commits and a tree comparison between
//! two commits. [`HistorySource`] is that seam; [`Git2Source`] implements it
//! with libgit2.

use crate::error::{CollectError, CollectResult};
use crate::models::{ChangeRecord, CommitRecord};
use git2::{DiffFindOptions, Oid, Repository, Sort};
use std::path::Path;
use tracing::debug;

/// Lazy, single-use sequence of commits.
pub type CommitIter<'a> = Box<dyn Iterator<Item = CollectResult<CommitRecord>> + 'a>;

/// Narrow interface onto the version-control engine.
pub trait HistorySource {
    /// Walk every commit reachable from HEAD, newest first. Each commit is
    /// yielded exactly once.
    fn walk_commits(&self) -> CollectResult<CommitIter<'_>>;

    /// Compare the snapshots of two commits, in the engine's delta order.
    fn diff_trees(&self, old_id: &str, new_id: &str) -> CollectResult<Vec<ChangeRecord>>;
}

/// libgit2-backed history source.
pub struct Git2Source {
    repo: Repository,
    detect_renames: bool,
}

impl Git2Source {
    /// Open the repository at `path` (its `.git` directory or working-copy root).
    pub fn open(path: &Path) -> CollectResult<Self> {
        let repo = Repository::open(path).map_err(|source| CollectError::RepositoryOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self {
            repo,
            detect_renames: true,
        })
    }

    /// Enable or disable rename/copy detection in tree comparisons.
    pub fn with_rename_detection(mut self, enabled: bool) -> Self {
        self.detect_renames = enabled;
        self
    }

    fn find_tree(&self, id: &str) -> Result<git2::Tree<'_>, git2::Error> {
        let oid = Oid::from_str(id)?;
        self.repo.find_commit(oid)?.tree()
    }
}

impl HistorySource for Git2Source {
    fn walk_commits(&self) -> CollectResult<CommitIter<'_>> {
        // Unborn HEAD: nothing to walk, not a failure
        if self.repo.is_empty()? {
            debug!("Repository has no commits yet");
            return Ok(Box::new(std::iter::empty::<CollectResult<CommitRecord>>()));
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        Ok(Box::new(revwalk.map(move |oid_result| -> CollectResult<CommitRecord> {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            Ok(CommitRecord::from_commit(&commit))
        })))
    }

    fn diff_trees(&self, old_id: &str, new_id: &str) -> CollectResult<Vec<ChangeRecord>> {
        let old_tree = self
            .find_tree(old_id)
            .map_err(|e| CollectError::comparison(old_id, new_id, e))?;
        let new_tree = self
            .find_tree(new_id)
            .map_err(|e| CollectError::comparison(old_id, new_id, e))?;

        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)
            .map_err(|e| CollectError::comparison(old_id, new_id, e))?;

        if self.detect_renames {
            let mut find_opts = DiffFindOptions::new();
            find_opts.renames(true).copies(true);
            diff.find_similar(Some(&mut find_opts))
                .map_err(|e| CollectError::comparison(old_id, new_id, e))?;
        }

        Ok(diff.deltas().map(|delta| ChangeRecord::from_delta(&delta)).collect())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_non_repo_fails() {
        let dir = tempdir().unwrap();
        let result = Git2Source::open(dir.path());
        assert!(matches!(result, Err(CollectError::RepositoryOpen { .. })));
    }

    #[test]
    fn test_empty_repo_walks_nothing() -> anyhow::Result<()> {
        let dir = tempdir()?;
        Repository::init(dir.path())?;

        let source = Git2Source::open(dir.path())?;
        assert_eq!(source.walk_commits()?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_diff_unknown_commit_is_comparison_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        Repository::init(dir.path())?;

        let source = Git2Source::open(dir.path())?;
        let result = source.diff_trees(&"a".repeat(40), &"b".repeat(40));
        assert!(matches!(result, Err(CollectError::Comparison { .. })));
        Ok(())
    }
}
