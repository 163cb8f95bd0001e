//! Diff resolution between arbitrary commit pairs.
//!
//! A commit queried against any of its direct parents is answered from the
//! adjacent diff cache; any other pair is compared on demand by the engine
//! and not memoised.
//!
//! The cached diff of a merge is always the one against its first parent,
//! so querying a merge against its second parent returns that same
//! first-parent diff rather than a comparison with the second parent.

use super::walker::HistorySnapshot;
use super::source::HistorySource;
use crate::models::ChangeRecord;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Read-only view over one generation plus the engine for cache misses.
pub struct DiffResolver<'a> {
    snapshot: &'a HistorySnapshot,
    source: Option<&'a dyn HistorySource>,
}

impl<'a> DiffResolver<'a> {
    pub fn new(snapshot: &'a HistorySnapshot, source: Option<&'a dyn HistorySource>) -> Self {
        Self { snapshot, source }
    }

    /// Change id to resulting path for every file changed between the two
    /// commits. Blank ids and failed comparisons yield an empty map.
    pub fn changed_files_between_commits(
        &self,
        new_id: &str,
        old_id: &str,
    ) -> HashMap<String, String> {
        self.changes_between_commits(new_id, old_id)
            .into_iter()
            .map(|change| (change.id, change.path))
            .collect()
    }

    /// Full change records between the two commits, same lookup rules as
    /// [`Self::changed_files_between_commits`].
    pub fn changes_between_commits(&self, new_id: &str, old_id: &str) -> Vec<ChangeRecord> {
        let (new_id, old_id) = (new_id.trim(), old_id.trim());
        if new_id.is_empty() || old_id.is_empty() {
            warn!("Must provide existing commit IDs");
            return Vec::new();
        }

        if let Some(cached) = self.cached(new_id, old_id) {
            return cached;
        }

        self.compare(new_id, old_id)
    }

    fn cached(&self, new_id: &str, old_id: &str) -> Option<Vec<ChangeRecord>> {
        if !self.snapshot.commits.is_parent(new_id, old_id) {
            return None;
        }
        let changes = self.snapshot.adjacent.get(new_id)?;
        debug!("Adjacent diff cache hit for {}", new_id);

        Some(changes.to_vec())
    }

    fn compare(&self, new_id: &str, old_id: &str) -> Vec<ChangeRecord> {
        let Some(source) = self.source else {
            warn!("No repository collected, cannot compare {} against {}", new_id, old_id);
            return Vec::new();
        };

        match source.diff_trees(old_id, new_id) {
            Ok(changes) => changes,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }
}
