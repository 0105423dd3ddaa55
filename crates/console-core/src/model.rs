use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity issued by the session provider. Store operations take it as an
/// explicit parameter; the core never reads it from ambient context.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> anyhow::Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            anyhow::bail!("user id must not be empty");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-projection of an issued API key. The plaintext secret is returned
/// separately on generation and is never part of the list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub key: String,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub usage: u64,
}

/// A repository known to the user's GitHub account. `is_indexed` marks the
/// ones already registered with the backend for indexing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubRepository {
    pub github_id: u64,
    pub full_name: String,
    pub name: String,
    pub private: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub default_branch: String,
    pub url: String,
    pub is_indexed: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodebaseStatus {
    Indexed,
}

/// Derived view over the repository list, filtered to `is_indexed`. Never an
/// independent entity: entries exist only while the latest fetch carries the
/// flag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedCodebase {
    pub id: String,
    pub full_name: String,
    pub github_url: String,
    pub default_branch: String,
    pub is_private: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub status: CodebaseStatus,
    /// Stamped at derivation time; the backend does not report when the
    /// repository was registered for indexing.
    pub created_at: String,
}

/// Result of reconciling redirect signals with the backend status check.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Connected,
    NotConnected,
    Failed(String),
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ConnectionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("  ").is_err());
        assert!(UserId::new("user_2x").is_ok());
    }

    #[test]
    fn api_key_usage_defaults_to_zero() {
        let value = json!({
            "key": "ck_123",
            "name": "ci",
            "createdAt": "2025-05-01T12:00:00Z"
        });
        let key: ApiKey = serde_json::from_value(value).unwrap();
        assert_eq!(key.usage, 0);
    }

    #[test]
    fn repository_deserializes_camel_case() {
        let value = json!({
            "githubId": 42,
            "fullName": "octocat/hello",
            "name": "hello",
            "private": true,
            "description": null,
            "defaultBranch": "main",
            "url": "https://github.com/octocat/hello",
            "isIndexed": true
        });
        let repo: GitHubRepository = serde_json::from_value(value).unwrap();
        assert_eq!(repo.github_id, 42);
        assert!(repo.is_indexed);
        assert!(repo.description.is_none());
    }

    #[test]
    fn codebase_status_serializes_as_marker() {
        let value = serde_json::to_value(CodebaseStatus::Indexed).unwrap();
        assert_eq!(value, json!("INDEXED"));
    }

    #[test]
    fn connection_status_reports_failure_reason() {
        let status = ConnectionStatus::Failed("nope".to_string());
        assert_eq!(status.error(), Some("nope"));
        assert!(!status.is_connected());
        assert!(ConnectionStatus::Connected.is_connected());
    }
}
