//! gitevo - structural evolution data from git repositories
//!
//! Walks a repository's commit graph once, indexes every commit, caches each
//! commit's file-level diff against its first parent, and answers arbitrary
//! "what changed between A and B" queries from that cache, falling back to
//! an on-demand tree comparison for non-adjacent pairs.

pub mod collectors;
pub mod config;
pub mod error;
pub mod file_types;
pub mod git;
pub mod github;
pub mod models;

pub use error::{CollectError, CollectResult};
pub use models::{ChangeKind, ChangeRecord, CommitRecord};
