//! Commit index with chronological extremum queries.

use crate::models::CommitRecord;
use std::collections::{BTreeSet, HashMap};

/// All commits seen by one history walk.
///
/// Besides the id lookup, commits are kept in a `(timestamp, id)` ordered
/// set so most/least recent are O(log n) and ties on timestamp resolve by id.
#[derive(Debug, Default)]
pub struct CommitIndex {
    commits: HashMap<String, CommitRecord>,
    /// Walk order, newest first
    order: Vec<String>,
    chronology: BTreeSet<(i64, String)>,
}

impl CommitIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a commit. A repeated id replaces the earlier record but keeps
    /// its position in walk order.
    pub fn insert(&mut self, commit: CommitRecord) {
        if let Some(previous) = self.commits.get(&commit.id) {
            self.chronology
                .remove(&(previous.timestamp, previous.id.clone()));
        } else {
            self.order.push(commit.id.clone());
        }
        self.chronology.insert((commit.timestamp, commit.id.clone()));
        self.commits.insert(commit.id.clone(), commit);
    }

    pub fn get(&self, commit_id: &str) -> Option<&CommitRecord> {
        self.commits.get(commit_id)
    }

    pub fn contains(&self, commit_id: &str) -> bool {
        self.commits.contains_key(commit_id)
    }

    /// Every known commit id, in walk order, without duplicates.
    pub fn all_commit_ids(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Commit with the greatest timestamp (greatest id on a tie), or empty.
    pub fn most_recent_commit_id(&self) -> String {
        self.chronology
            .last()
            .map(|(_, id)| id.clone())
            .unwrap_or_default()
    }

    /// Commit with the smallest timestamp (smallest id on a tie), or empty.
    pub fn least_recent_commit_id(&self) -> String {
        self.chronology
            .first()
            .map(|(_, id)| id.clone())
            .unwrap_or_default()
    }

    /// Whether `old_id` is one of `new_id`'s direct parents.
    pub fn is_parent(&self, new_id: &str, old_id: &str) -> bool {
        self.get(new_id)
            .is_some_and(|c| c.parents.iter().any(|p| p == old_id))
    }

    pub fn committer_name(&self, commit_id: &str) -> String {
        self.get(commit_id)
            .map(|c| c.committer_name.clone())
            .unwrap_or_default()
    }

    pub fn committer_email(&self, commit_id: &str) -> String {
        self.get(commit_id)
            .map(|c| c.committer_email.clone())
            .unwrap_or_default()
    }

    /// Committer timestamp in seconds, 0 for an unknown commit.
    pub fn commit_time(&self, commit_id: &str) -> i64 {
        self.get(commit_id).map(|c| c.timestamp).unwrap_or(0)
    }

    pub fn log_message(&self, commit_id: &str) -> String {
        self.get(commit_id)
            .map(|c| c.message.clone())
            .unwrap_or_default()
    }

    pub fn parent_ids(&self, commit_id: &str) -> Vec<String> {
        self.get(commit_id)
            .map(|c| c.parents.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}
