//! Error types for history collection

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while collecting or comparing history
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Failed to open git repository at {path:?}: {source}")]
    RepositoryOpen {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to compare {old} against {new}: {reason}")]
    Comparison {
        old: String,
        new: String,
        reason: String,
    },

    #[error("Git engine error: {0}")]
    Engine(#[from] git2::Error),
}

impl CollectError {
    /// Wrap an engine failure that happened while comparing two commits.
    pub fn comparison(old: &str, new: &str, err: impl std::fmt::Display) -> Self {
        CollectError::Comparison {
            old: old.to_string(),
            new: new.to_string(),
            reason: err.to_string(),
        }
    }
}

pub type CollectResult<T> = Result<T, CollectError>;
