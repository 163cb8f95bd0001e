//! User-level configuration for gitevo
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/gitevo/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GitConfig {
    /// Folder holding already cloned repositories (default: ./repositories)
    pub repositories_dir: Option<PathBuf>,

    /// Detect renames and copies when comparing trees (default: true)
    pub detect_renames: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// API base URL (default: https://api.github.com)
    pub api_url: Option<String>,

    /// Personal access token, needed for collaborator listings
    pub token: Option<String>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/gitevo/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            config.merge(Self::load_file(&path)?);
        }

        if let Ok(dir) = std::env::var("GITEVO_REPOSITORIES_DIR") {
            config.git.repositories_dir = Some(PathBuf::from(dir));
        }
        if let Ok(url) = std::env::var("GITEVO_GITHUB_API_URL") {
            config.github.api_url = Some(url);
        }
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            config.github.token = Some(token);
        }

        Ok(config)
    }

    /// Parse a single config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gitevo").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.git.repositories_dir.is_some() {
            self.git.repositories_dir = other.git.repositories_dir;
        }
        if other.git.detect_renames.is_some() {
            self.git.detect_renames = other.git.detect_renames;
        }
        if other.github.api_url.is_some() {
            self.github.api_url = other.github.api_url;
        }
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
    }

    /// Folder where repositories are expected to be cloned.
    pub fn repositories_dir(&self) -> PathBuf {
        self.git.repositories_dir.clone().unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("repositories")
        })
    }

    /// Map a collect target to a repository path: existing paths are used as
    /// is, anything else is looked up under the repositories folder.
    pub fn resolve_repository(&self, target: &Path) -> PathBuf {
        if target.exists() {
            target.to_path_buf()
        } else {
            self.repositories_dir().join(target)
        }
    }

    pub fn detect_renames(&self) -> bool {
        self.git.detect_renames.unwrap_or(true)
    }

    pub fn github_api_url(&self) -> &str {
        self.github
            .api_url
            .as_deref()
            .unwrap_or(DEFAULT_GITHUB_API_URL)
            .trim_end_matches('/')
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref()
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# gitevo User Configuration

[git]
# Where cloned repositories live; plain names passed to gitevo resolve here
# repositories_dir = "/home/me/repositories"

# Report renames/copies instead of delete+add pairs
# detect_renames = true

[github]
# api_url = "https://api.github.com"

# Needed for collaborator listings (or set GITHUB_TOKEN)
# token = "ghp_..."
"#;
            std::fs::write(&config_path, example)?;
        }

        Ok(config_path)
    }
}
