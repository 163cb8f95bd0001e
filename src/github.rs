//! Remote repository metadata from the GitHub REST API
//!
//! Uses ureq (sync HTTP), no async runtime needed. The collect target is the
//! repository's full name, e.g. `JCTools/JCTools`. No retries: a failed
//! request fails the collect.

use crate::collectors::{CollectorKind, DataCollector};
use crate::config::UserConfig;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while talking to the remote API
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Invalid repository name '{0}', expected owner/name")]
    InvalidName(String),

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Missing API token: set GITHUB_TOKEN or [github] token")]
    MissingToken,

    #[error("No repository collected yet")]
    NotCollected,
}

pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentRepository {
    pub id: u64,
    pub full_name: String,
}

/// Subset of the `GET /repos/{owner}/{repo}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    pub html_url: String,
    pub url: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub subscribers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    /// Repository size in KB
    #[serde(default)]
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub parent: Option<ParentRepository>,
}

#[derive(Debug, Deserialize)]
struct Collaborator {
    login: String,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .new_agent()
}

/// Collects metadata of a remote GitHub repository.
pub struct GitHubCollector {
    api_url: String,
    token: Option<String>,
    agent: ureq::Agent,
    metadata: Option<RepositoryMetadata>,
    languages: BTreeMap<String, u64>,
}

impl GitHubCollector {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token,
            agent: make_agent(),
            metadata: None,
            languages: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &UserConfig) -> Self {
        Self::new(
            config.github_api_url(),
            config.github_token().map(str::to_string),
        )
    }

    /// Fetch metadata and language breakdown for `owner/name`.
    pub fn collect_repository(&mut self, full_name: &str) -> RemoteResult<()> {
        let full_name = full_name.trim().trim_matches('/');
        match full_name.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
            _ => return Err(RemoteError::InvalidName(full_name.to_string())),
        }

        let metadata: RepositoryMetadata = self.get_json(&format!("/repos/{}", full_name))?;
        let languages: BTreeMap<String, u64> =
            self.get_json(&format!("/repos/{}/languages", full_name))?;

        info!("Connected to {}", metadata.html_url);
        self.metadata = Some(metadata);
        self.languages = languages;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> RemoteResult<T> {
        let url = format!("{}{}", self.api_url, path);
        debug!("GET {}", url);

        let mut req = self
            .agent
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "gitevo");
        if let Some(token) = &self.token {
            req = req.header("Authorization", &format!("Bearer {}", token));
        }

        let response = req
            .call()
            .map_err(|e| RemoteError::RequestFailed(e.to_string()))?;
        let status = response.status().as_u16();
        if status >= 400 {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            return Err(RemoteError::ApiError {
                status,
                message: error_text,
            });
        }

        response
            .into_body()
            .read_json()
            .map_err(|e| RemoteError::ParseError(e.to_string()))
    }

    pub fn metadata(&self) -> Option<&RepositoryMetadata> {
        self.metadata.as_ref()
    }

    pub fn forks(&self) -> u64 {
        self.metadata.as_ref().map(|m| m.forks_count).unwrap_or(0)
    }

    pub fn stargazers_count(&self) -> u64 {
        self.metadata.as_ref().map(|m| m.stargazers_count).unwrap_or(0)
    }

    pub fn watchers_count(&self) -> u64 {
        self.metadata.as_ref().map(|m| m.watchers_count).unwrap_or(0)
    }

    pub fn subscribers_count(&self) -> u64 {
        self.metadata.as_ref().map(|m| m.subscribers_count).unwrap_or(0)
    }

    pub fn open_issue_count(&self) -> u64 {
        self.metadata.as_ref().map(|m| m.open_issues_count).unwrap_or(0)
    }

    pub fn size(&self) -> u64 {
        self.metadata.as_ref().map(|m| m.size).unwrap_or(0)
    }

    pub fn repository_id(&self) -> u64 {
        self.metadata.as_ref().map(|m| m.id).unwrap_or(0)
    }

    /// Id of the repository this one was forked from, if any.
    pub fn parent_repository_id(&self) -> Option<u64> {
        self.metadata.as_ref()?.parent.as_ref().map(|p| p.id)
    }

    pub fn is_fork(&self) -> bool {
        self.metadata.as_ref().is_some_and(|m| m.fork)
    }

    pub fn login(&self) -> &str {
        self.metadata.as_ref().map(|m| m.owner.login.as_str()).unwrap_or("")
    }

    pub fn owner_name(&self) -> &str {
        self.login()
    }

    pub fn name(&self) -> &str {
        self.metadata.as_ref().map(|m| m.name.as_str()).unwrap_or("")
    }

    pub fn full_name(&self) -> &str {
        self.metadata.as_ref().map(|m| m.full_name.as_str()).unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.description.as_deref())
            .unwrap_or("")
    }

    pub fn homepage(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.homepage.as_deref())
            .unwrap_or("")
    }

    pub fn language(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.language.as_deref())
            .unwrap_or("")
    }

    pub fn html_url(&self) -> &str {
        self.metadata.as_ref().map(|m| m.html_url.as_str()).unwrap_or("")
    }

    pub fn url(&self) -> &str {
        self.metadata.as_ref().map(|m| m.url.as_str()).unwrap_or("")
    }

    /// Creation time, seconds since epoch (0 before collection).
    pub fn created_at(&self) -> i64 {
        self.metadata
            .as_ref()
            .map(|m| m.created_at.timestamp())
            .unwrap_or(0)
    }

    /// Last update time, seconds since epoch (0 before collection).
    pub fn updated_at(&self) -> i64 {
        self.metadata
            .as_ref()
            .map(|m| m.updated_at.timestamp())
            .unwrap_or(0)
    }

    /// Bytes of code per language.
    pub fn languages(&self) -> &BTreeMap<String, u64> {
        &self.languages
    }

    /// Logins of the repository's collaborators. Requires a token.
    pub fn collaborator_names(&self) -> RemoteResult<Vec<String>> {
        let full_name = &self.metadata.as_ref().ok_or(RemoteError::NotCollected)?.full_name;
        if self.token.is_none() {
            return Err(RemoteError::MissingToken);
        }
        let collaborators: Vec<Collaborator> =
            self.get_json(&format!("/repos/{}/collaborators", full_name))?;
        Ok(collaborators.into_iter().map(|c| c.login).collect())
    }
}

impl DataCollector for GitHubCollector {
    fn kind(&self) -> CollectorKind {
        CollectorKind::GitHub
    }

    fn collect(&mut self, target: &str) -> anyhow::Result<()> {
        self.collect_repository(target)?;
        Ok(())
    }

    fn is_collected(&self) -> bool {
        self.metadata.is_some()
    }

    fn summary(&self) -> serde_json::Value {
        json!({
            "kind": self.kind().as_str(),
            "full_name": self.full_name(),
            "language": self.language(),
            "stars": self.stargazers_count(),
            "forks": self.forks(),
            "open_issues": self.open_issue_count(),
            "is_fork": self.is_fork(),
            "created_at": self.created_at(),
            "languages": self.languages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    const REPO_JSON: &str = r#"{
        "id": 26394157,
        "name": "JCTools",
        "full_name": "JCTools/JCTools",
        "owner": { "login": "JCTools" },
        "description": "Java Concurrency Tools for the JVM.",
        "homepage": null,
        "html_url": "https://github.com/JCTools/JCTools",
        "url": "https://api.github.com/repos/JCTools/JCTools",
        "language": "Java",
        "fork": false,
        "forks_count": 550,
        "stargazers_count": 3400,
        "watchers_count": 3400,
        "subscribers_count": 150,
        "open_issues_count": 12,
        "size": 4200,
        "created_at": "2014-11-09T12:00:00Z",
        "updated_at": "2020-01-01T00:00:00Z"
    }"#;

    /// Serve canned responses for `requests` connections, routed by path suffix.
    fn serve(requests: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            for stream in listener.incoming().take(requests) {
                let mut stream = stream.unwrap();
                let mut buf = [0u8; 4096];
                let n = stream.read(&mut buf).unwrap();
                let request = String::from_utf8_lossy(&buf[..n]);
                let request_line = request.lines().next().unwrap_or("");

                let (status, body) = if request_line.contains("/languages") {
                    ("200 OK", r#"{"Java": 1200000, "Shell": 3000}"#)
                } else if request_line.contains("/repos/JCTools/JCTools ") {
                    ("200 OK", REPO_JSON)
                } else if request_line.contains("/repos/broken/json ") {
                    ("200 OK", "<html>not json</html>")
                } else {
                    ("404 Not Found", r#"{"message": "Not Found"}"#)
                };

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_parse_repository_metadata() {
        let meta: RepositoryMetadata = serde_json::from_str(REPO_JSON).unwrap();
        assert_eq!(meta.full_name, "JCTools/JCTools");
        assert_eq!(meta.owner.login, "JCTools");
        assert!(meta.homepage.is_none());
        assert!(meta.parent.is_none());
        assert_eq!(meta.created_at.timestamp(), 1415534400);
    }

    #[test]
    fn test_getters_before_collect_are_empty() {
        let collector = GitHubCollector::new("http://127.0.0.1:1", None);
        assert!(!collector.is_collected());
        assert_eq!(collector.forks(), 0);
        assert_eq!(collector.full_name(), "");
        assert_eq!(collector.parent_repository_id(), None);
        assert!(matches!(
            collector.collaborator_names(),
            Err(RemoteError::NotCollected)
        ));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let mut collector = GitHubCollector::new("http://127.0.0.1:1", None);
        for bad in ["", "justname", "/name", "a/b/c"] {
            assert!(matches!(
                collector.collect_repository(bad),
                Err(RemoteError::InvalidName(_))
            ));
        }
    }

    #[test]
    fn test_unreachable_api_fails() {
        let mut collector = GitHubCollector::new("http://127.0.0.1:1", None);
        assert!(matches!(
            collector.collect_repository("JCTools/JCTools"),
            Err(RemoteError::RequestFailed(_))
        ));
        assert!(!collector.is_collected());
    }

    #[test]
    fn test_collect_from_local_api() {
        let base = serve(2);
        let mut collector = GitHubCollector::new(base, None);
        collector.collect_repository("JCTools/JCTools").unwrap();

        assert!(collector.is_collected());
        assert_eq!(collector.login(), "JCTools");
        assert_eq!(collector.language(), "Java");
        assert_eq!(collector.stargazers_count(), 3400);
        assert_eq!(collector.subscribers_count(), 150);
        assert_eq!(collector.updated_at(), 1577836800);
        assert_eq!(collector.languages().get("Shell"), Some(&3000));
        assert!(matches!(
            collector.collaborator_names(),
            Err(RemoteError::MissingToken)
        ));
        assert_eq!(collector.summary()["stars"], 3400);
    }

    #[test]
    fn test_api_error_status() {
        let base = serve(1);
        let mut collector = GitHubCollector::new(base, None);
        let err = collector.collect_repository("nobody/nothing").unwrap_err();
        assert!(matches!(err, RemoteError::ApiError { status: 404, .. }));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let base = serve(1);
        let mut collector = GitHubCollector::new(base, None);
        let err = collector.collect_repository("broken/json").unwrap_err();
        assert!(matches!(err, RemoteError::ParseError(_)));
        assert!(collector.metadata().is_none());
    }
}
