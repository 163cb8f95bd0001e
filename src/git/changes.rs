//! Change-set store: one change record per post-change content hash.

use crate::models::ChangeRecord;
use std::collections::HashMap;

/// Change records keyed by the blob hash of the file after the change.
///
/// Unrelated changes that produce byte-identical content share a key; the
/// last one registered wins.
#[derive(Debug, Default)]
pub struct ChangeSetStore {
    changes: HashMap<String, ChangeRecord>,
}

impl ChangeSetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change and return its key.
    pub fn insert(&mut self, change: ChangeRecord) -> String {
        let id = change.id.clone();
        self.changes.insert(id.clone(), change);
        id
    }

    pub fn get(&self, change_id: &str) -> Option<&ChangeRecord> {
        self.changes.get(change_id)
    }

    /// Change kind name (`ADD`, `MODIFY`, ...), or empty for an unknown id.
    pub fn file_change_type(&self, change_id: &str) -> String {
        self.get(change_id)
            .map(|c| c.kind.as_str().to_string())
            .unwrap_or_default()
    }

    /// Path after the change, or empty for an unknown id.
    pub fn file_change_path(&self, change_id: &str) -> String {
        self.get(change_id)
            .map(|c| c.path.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChangeKind;

    #[test]
    fn test_lookup_known_change() {
        let mut store = ChangeSetStore::new();
        let id = store.insert(ChangeRecord::new("abc", ChangeKind::Modify, "src/lib.rs"));

        assert_eq!(id, "abc");
        assert_eq!(store.file_change_type("abc"), "MODIFY");
        assert_eq!(store.file_change_path("abc"), "src/lib.rs");
    }

    #[test]
    fn test_unknown_id_is_silent_miss() {
        let store = ChangeSetStore::new();
        assert_eq!(store.file_change_type("nope"), "");
        assert_eq!(store.file_change_path("nope"), "");
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_identical_content_last_write_wins() {
        let mut store = ChangeSetStore::new();
        store.insert(ChangeRecord::new("same", ChangeKind::Add, "a.txt"));
        store.insert(ChangeRecord::new("same", ChangeKind::Copy, "b.txt"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.file_change_type("same"), "COPY");
        assert_eq!(store.file_change_path("same"), "b.txt");
    }
}
