//! Configuration module for gitevo
//!
//! This module handles:
//! - Location of cloned repositories
//! - Tree comparison settings
//! - Remote metadata API settings

mod user_config;

pub use user_config::{GitConfig, GitHubConfig, UserConfig, DEFAULT_GITHUB_API_URL};
