//! Core data models for gitevo
//!
//! Commits and file-level change records as read from the version-control
//! engine. Both are immutable once built.

use serde::{Deserialize, Serialize};

/// Kind of change a file went through between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Add,
    Modify,
    Delete,
    Rename,
    Copy,
    /// Anything the engine reports outside the five kinds above
    Other,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Add => "ADD",
            ChangeKind::Modify => "MODIFY",
            ChangeKind::Delete => "DELETE",
            ChangeKind::Rename => "RENAME",
            ChangeKind::Copy => "COPY",
            ChangeKind::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<git2::Delta> for ChangeKind {
    fn from(delta: git2::Delta) -> Self {
        match delta {
            git2::Delta::Added => ChangeKind::Add,
            git2::Delta::Modified => ChangeKind::Modify,
            git2::Delta::Deleted => ChangeKind::Delete,
            git2::Delta::Renamed => ChangeKind::Rename,
            git2::Delta::Copied => ChangeKind::Copy,
            _ => ChangeKind::Other,
        }
    }
}

/// A single commit as recorded by the history walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit hash
    pub id: String,
    /// Committer timestamp, seconds since epoch
    pub timestamp: i64,
    /// Parent hashes, first parent first
    pub parents: Vec<String>,
    pub committer_name: String,
    pub committer_email: String,
    /// Full commit message
    pub message: String,
}

impl CommitRecord {
    /// Minimal record, mostly useful for tests and in-memory sources.
    pub fn new(id: impl Into<String>, timestamp: i64, parents: &[&str]) -> Self {
        Self {
            id: id.into(),
            timestamp,
            parents: parents.iter().map(|p| p.to_string()).collect(),
            committer_name: String::new(),
            committer_email: String::new(),
            message: String::new(),
        }
    }

    /// Build a record from a libgit2 commit.
    pub fn from_commit(commit: &git2::Commit<'_>) -> Self {
        let committer = commit.committer();
        Self {
            id: commit.id().to_string(),
            timestamp: commit.time().seconds(),
            parents: commit.parent_ids().map(|oid| oid.to_string()).collect(),
            committer_name: committer.name().unwrap_or("").to_string(),
            committer_email: committer.email().unwrap_or("").to_string(),
            message: commit.message().unwrap_or("").to_string(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// A file-level change, keyed by the content hash of the file after the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Blob hash after the change (all zeros for a deletion)
    pub id: String,
    pub kind: ChangeKind,
    /// Path after the change, empty for a deletion
    pub path: String,
}

impl ChangeRecord {
    pub fn new(id: impl Into<String>, kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            path: path.into(),
        }
    }

    /// Build a record from a libgit2 diff delta.
    pub fn from_delta(delta: &git2::DiffDelta<'_>) -> Self {
        let kind = ChangeKind::from(delta.status());
        let path = match kind {
            ChangeKind::Delete => String::new(),
            _ => delta
                .new_file()
                .path()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
        };

        Self {
            id: delta.new_file().id().to_string(),
            kind,
            path,
        }
    }
}
