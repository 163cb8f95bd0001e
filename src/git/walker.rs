//! Single-pass history walk that builds one generation of the stores.

use super::adjacent::AdjacentDiffCache;
use super::changes::ChangeSetStore;
use super::index::CommitIndex;
use super::source::HistorySource;
use crate::error::CollectResult;
use crate::models::{ChangeRecord, CommitRecord};
use tracing::{debug, warn};

/// Everything one walk produces. Built off to the side and swapped in whole,
/// so a reader never sees a half-populated generation.
#[derive(Debug, Default)]
pub struct HistorySnapshot {
    pub commits: CommitIndex,
    pub changes: ChangeSetStore,
    pub adjacent: AdjacentDiffCache,
}

/// Counters for one walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    pub commits: usize,
    pub root_commits: usize,
    pub merge_commits: usize,
    pub changes: usize,
    pub failed_comparisons: usize,
    pub skipped_commits: usize,
}

/// Walks a [`HistorySource`] once and fills a fresh [`HistorySnapshot`].
pub struct HistoryWalker<'a> {
    source: &'a dyn HistorySource,
    snapshot: HistorySnapshot,
    stats: WalkStats,
}

impl<'a> HistoryWalker<'a> {
    pub fn new(source: &'a dyn HistorySource) -> Self {
        Self {
            source,
            snapshot: HistorySnapshot::default(),
            stats: WalkStats::default(),
        }
    }

    /// Visit every commit once. Unreadable commits are skipped and failed
    /// comparisons cached as empty; only a walk that cannot start is an error.
    pub fn walk(mut self) -> CollectResult<(HistorySnapshot, WalkStats)> {
        let source = self.source;
        for commit_result in source.walk_commits()? {
            match commit_result {
                Ok(commit) => self.visit(commit),
                Err(e) => {
                    warn!("Skipping unreadable commit: {}", e);
                    self.stats.skipped_commits += 1;
                }
            }
        }

        debug!(
            "Walked {} commits ({} root, {} merge), {} changes, {} failed comparisons",
            self.stats.commits,
            self.stats.root_commits,
            self.stats.merge_commits,
            self.stats.changes,
            self.stats.failed_comparisons
        );

        Ok((self.snapshot, self.stats))
    }

    fn visit(&mut self, commit: CommitRecord) {
        let commit_id = commit.id.clone();
        self.stats.commits += 1;

        let changes = match commit.first_parent() {
            None => {
                self.stats.root_commits += 1;
                Vec::new()
            }
            Some(parent_id) => {
                if commit.parents.len() > 1 {
                    // Merges are diffed against their first parent only
                    self.stats.merge_commits += 1;
                }
                self.store_changes(parent_id, &commit_id)
            }
        };

        self.snapshot.commits.insert(commit);
        self.snapshot.adjacent.insert(commit_id, changes);
    }

    fn store_changes(&mut self, parent_id: &str, commit_id: &str) -> Vec<ChangeRecord> {
        match self.source.diff_trees(parent_id, commit_id) {
            Ok(changes) => {
                self.stats.changes += changes.len();
                for change in &changes {
                    self.snapshot.changes.insert(change.clone());
                }
                changes
            }
            Err(e) => {
                warn!("Recording empty diff for {}: {}", commit_id, e);
                self.stats.failed_comparisons += 1;
                Vec::new()
            }
        }
    }
}
