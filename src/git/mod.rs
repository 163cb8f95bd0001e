//! Git history collection
//!
//! Walks a repository's commit graph once, indexes every commit, caches each
//! commit's diff against its first parent, and answers "what changed between
//! A and B" from that cache when A and B are parent and child.
//!
//! # Components
//!
//! - [`CommitIndex`]: commits by id, most/least recent by timestamp
//! - [`ChangeSetStore`]: change records by post-change blob hash
//! - [`AdjacentDiffCache`]: change records per commit against its first parent
//! - [`HistoryWalker`]: the single traversal that fills the three above
//! - [`DiffResolver`]: cache-or-compare lookups for arbitrary pairs
//!
//! # Example
//!
//! ```no_run
//! use gitevo::git::GitCollector;
//! use std::path::Path;
//!
//! let mut collector = GitCollector::new();
//! collector.collect(Path::new("/path/to/repo")).unwrap();
//!
//! let newest = collector.most_recent_commit_id();
//! for parent in collector.parent_ids(&newest) {
//!     for (change_id, path) in collector.changed_files_between_commits(&newest, &parent) {
//!         println!("{} {} {}", collector.file_change_type(&change_id), change_id, path);
//!     }
//! }
//! ```

pub mod adjacent;
pub mod changes;
pub mod collector;
pub mod index;
pub mod resolver;
pub mod source;
pub mod walker;

pub use adjacent::AdjacentDiffCache;
pub use changes::ChangeSetStore;
pub use collector::GitCollector;
pub use index::CommitIndex;
pub use resolver::DiffResolver;
pub use source::{Git2Source, HistorySource};
pub use walker::{HistorySnapshot, HistoryWalker, WalkStats};
