//! Git collector: owns one collected generation and answers queries on it.

use super::resolver::DiffResolver;
use super::source::{Git2Source, HistorySource};
use super::walker::{HistorySnapshot, HistoryWalker, WalkStats};
use crate::collectors::{CollectorKind, DataCollector};
use crate::error::CollectResult;
use crate::models::ChangeRecord;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Collects commit history and per-commit diffs from a git repository.
///
/// Reusable: every `collect` replaces the previous generation, so one
/// collector can be pointed at different repositories (or snapshots of the
/// same one) in turn. Queries are total; unknown ids give empty values.
pub struct GitCollector {
    source: Option<Box<dyn HistorySource>>,
    snapshot: HistorySnapshot,
    detect_renames: bool,
    last_stats: Option<WalkStats>,
}

impl GitCollector {
    pub fn new() -> Self {
        Self {
            source: None,
            snapshot: HistorySnapshot::default(),
            detect_renames: true,
            last_stats: None,
        }
    }

    /// Enable or disable rename/copy detection for subsequent collections.
    pub fn with_rename_detection(mut self, enabled: bool) -> Self {
        self.detect_renames = enabled;
        self
    }

    /// Open the repository at `path` and walk its history.
    ///
    /// Fails only when `path` is not a repository; the previous generation is
    /// left untouched in that case.
    pub fn collect(&mut self, path: &Path) -> CollectResult<WalkStats> {
        let source = Git2Source::open(path)?.with_rename_detection(self.detect_renames);
        let stats = self.collect_from(Box::new(source));
        info!(
            "Finished collecting {} commits from {:?}",
            stats.commits, path
        );
        Ok(stats)
    }

    /// Walk an already opened source and swap in the new generation.
    pub fn collect_from(&mut self, source: Box<dyn HistorySource>) -> WalkStats {
        let (snapshot, stats) = match HistoryWalker::new(&*source).walk() {
            Ok(walked) => walked,
            Err(e) => {
                warn!("History walk failed, collected nothing: {}", e);
                (HistorySnapshot::default(), WalkStats::default())
            }
        };

        self.snapshot = snapshot;
        self.source = Some(source);
        self.last_stats = Some(stats);
        stats
    }

    /// Stats of the last successful collection, if any.
    pub fn last_stats(&self) -> Option<WalkStats> {
        self.last_stats
    }

    fn resolver(&self) -> DiffResolver<'_> {
        DiffResolver::new(&self.snapshot, self.source.as_deref())
    }

    /// Every collected commit id, newest first in walk order.
    pub fn all_commit_ids(&self) -> Vec<&str> {
        self.snapshot.commits.all_commit_ids()
    }

    pub fn most_recent_commit_id(&self) -> String {
        self.snapshot.commits.most_recent_commit_id()
    }

    pub fn least_recent_commit_id(&self) -> String {
        self.snapshot.commits.least_recent_commit_id()
    }

    /// Change id to resulting path for the files changed between two commits.
    pub fn changed_files_between_commits(
        &self,
        new_id: &str,
        old_id: &str,
    ) -> HashMap<String, String> {
        self.resolver().changed_files_between_commits(new_id, old_id)
    }

    pub fn changes_between_commits(&self, new_id: &str, old_id: &str) -> Vec<ChangeRecord> {
        self.resolver().changes_between_commits(new_id, old_id)
    }

    pub fn file_change_type(&self, change_id: &str) -> String {
        self.snapshot.changes.file_change_type(change_id)
    }

    pub fn file_change_path(&self, change_id: &str) -> String {
        self.snapshot.changes.file_change_path(change_id)
    }

    pub fn committer_name(&self, commit_id: &str) -> String {
        self.snapshot.commits.committer_name(commit_id)
    }

    pub fn committer_email(&self, commit_id: &str) -> String {
        self.snapshot.commits.committer_email(commit_id)
    }

    pub fn commit_time(&self, commit_id: &str) -> i64 {
        self.snapshot.commits.commit_time(commit_id)
    }

    pub fn log_message(&self, commit_id: &str) -> String {
        self.snapshot.commits.log_message(commit_id)
    }

    pub fn parent_ids(&self, commit_id: &str) -> Vec<String> {
        self.snapshot.commits.parent_ids(commit_id)
    }
}

impl Default for GitCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl DataCollector for GitCollector {
    fn kind(&self) -> CollectorKind {
        CollectorKind::Git
    }

    fn collect(&mut self, target: &str) -> anyhow::Result<()> {
        GitCollector::collect(self, Path::new(target))?;
        Ok(())
    }

    fn is_collected(&self) -> bool {
        self.last_stats.is_some()
    }

    fn summary(&self) -> serde_json::Value {
        let stats = self.last_stats.unwrap_or_default();
        json!({
            "kind": self.kind().as_str(),
            "commits": self.snapshot.commits.len(),
            "changes": self.snapshot.changes.len(),
            "most_recent": self.most_recent_commit_id(),
            "least_recent": self.least_recent_commit_id(),
            "merge_commits": stats.merge_commits,
            "failed_comparisons": stats.failed_comparisons,
        })
    }
}
