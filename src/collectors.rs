//! Data collector interface and static registry
//!
//! Every collector follows the same shape: collect once from an identifying
//! string (a repository path, a `owner/name` slug), then expose typed
//! getters. The registry maps a [`CollectorKind`] to its implementation.

use crate::config::UserConfig;
use crate::git::GitCollector;
use crate::github::GitHubCollector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known collector implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CollectorKind {
    Git,
    GitHub,
}

impl CollectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectorKind::Git => "GIT",
            CollectorKind::GitHub => "GITHUB",
        }
    }
}

impl fmt::Display for CollectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "git" => Ok(CollectorKind::Git),
            "github" => Ok(CollectorKind::GitHub),
            other => Err(format!("unknown collector '{}'", other)),
        }
    }
}

/// Common interface for collectors
pub trait DataCollector {
    fn kind(&self) -> CollectorKind;

    /// Collect from `target`, replacing anything collected before.
    fn collect(&mut self, target: &str) -> anyhow::Result<()>;

    /// Whether a collection has completed on this instance
    fn is_collected(&self) -> bool;

    /// Short machine-readable description of what was collected
    fn summary(&self) -> serde_json::Value;
}

/// Holds one collector per kind
pub struct CollectorRegistry {
    collectors: Vec<Box<dyn DataCollector>>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self {
            collectors: Vec::new(),
        }
    }

    /// Registry with the built-in git and GitHub collectors.
    pub fn with_defaults(config: &UserConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(
            GitCollector::new().with_rename_detection(config.detect_renames()),
        ));
        registry.register(Box::new(GitHubCollector::from_config(config)));
        registry
    }

    /// Add a collector, replacing any registered collector of the same kind.
    pub fn register(&mut self, collector: Box<dyn DataCollector>) {
        let kind = collector.kind();
        self.collectors.retain(|c| c.kind() != kind);
        tracing::debug!("Registered collector: {}", kind);
        self.collectors.push(collector);
    }

    pub fn get(&self, kind: CollectorKind) -> Option<&dyn DataCollector> {
        self.collectors
            .iter()
            .find(|c| c.kind() == kind)
            .map(|c| c.as_ref())
    }

    pub fn get_mut(&mut self, kind: CollectorKind) -> Option<&mut (dyn DataCollector + 'static)> {
        self.collectors
            .iter_mut()
            .find(|c| c.kind() == kind)
            .map(|c| c.as_mut())
    }

    pub fn kinds(&self) -> Vec<CollectorKind> {
        self.collectors.iter().map(|c| c.kind()).collect()
    }
}

impl Default for CollectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Dummy {
        collected: Option<String>,
    }

    impl DataCollector for Dummy {
        fn kind(&self) -> CollectorKind {
            CollectorKind::Git
        }

        fn collect(&mut self, target: &str) -> anyhow::Result<()> {
            self.collected = Some(target.to_string());
            Ok(())
        }

        fn is_collected(&self) -> bool {
            self.collected.is_some()
        }

        fn summary(&self) -> serde_json::Value {
            json!({ "target": self.collected })
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("git".parse::<CollectorKind>(), Ok(CollectorKind::Git));
        assert_eq!("GitHub".parse::<CollectorKind>(), Ok(CollectorKind::GitHub));
        assert!("svn".parse::<CollectorKind>().is_err());
        assert_eq!(CollectorKind::GitHub.to_string(), "GITHUB");
    }

    #[test]
    fn test_defaults_register_both_kinds() {
        let registry = CollectorRegistry::with_defaults(&UserConfig::default());
        assert_eq!(registry.kinds(), vec![CollectorKind::Git, CollectorKind::GitHub]);
        assert!(!registry.get(CollectorKind::Git).unwrap().is_collected());
    }

    #[test]
    fn test_register_replaces_same_kind() -> anyhow::Result<()> {
        let mut registry = CollectorRegistry::with_defaults(&UserConfig::default());
        registry.register(Box::new(Dummy { collected: None }));
        assert_eq!(registry.kinds(), vec![CollectorKind::GitHub, CollectorKind::Git]);

        let git = registry.get_mut(CollectorKind::Git).unwrap();
        git.collect("somewhere")?;
        assert!(git.is_collected());
        assert_eq!(git.summary()["target"], "somewhere");
        Ok(())
    }

    #[test]
    fn test_git_collect_through_trait_rejects_non_repo() {
        let mut registry = CollectorRegistry::with_defaults(&UserConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let git = registry.get_mut(CollectorKind::Git).unwrap();

        assert!(git.collect(&dir.path().to_string_lossy()).is_err());
        assert!(!git.is_collected());
    }
}
