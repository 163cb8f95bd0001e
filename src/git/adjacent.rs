//! Adjacent-diff cache: each commit's changes against its first parent.

use crate::models::ChangeRecord;
use std::collections::HashMap;

/// Change records per commit, in the engine's delta order.
///
/// Each commit keeps its own records: the change-set store is keyed by
/// content id, so two commits producing the same blob would otherwise share
/// one path. An empty list is a real cached value (root commits, failed
/// comparisons); `None` from [`AdjacentDiffCache::get`] means the commit was
/// never walked.
#[derive(Debug, Default)]
pub struct AdjacentDiffCache {
    diffs: HashMap<String, Vec<ChangeRecord>>,
}

impl AdjacentDiffCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, commit_id: impl Into<String>, changes: Vec<ChangeRecord>) {
        self.diffs.insert(commit_id.into(), changes);
    }

    pub fn get(&self, commit_id: &str) -> Option<&[ChangeRecord]> {
        self.diffs.get(commit_id).map(Vec::as_slice)
    }

    /// Change ids of a commit's cached diff, in delta order.
    pub fn change_ids(&self, commit_id: &str) -> Option<Vec<&str>> {
        self.get(commit_id)
            .map(|changes| changes.iter().map(|c| c.id.as_str()).collect())
    }

    pub fn contains(&self, commit_id: &str) -> bool {
        self.diffs.contains_key(commit_id)
    }

    pub fn commit_ids(&self) -> impl Iterator<Item = &str> {
        self.diffs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }
}
