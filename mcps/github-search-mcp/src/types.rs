//! Output types for the search tool
//!
//! The envelope is the only thing written to stdout (CLI) or returned as
//! tool content (MCP), so the field names here are the wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::github::ApiRepository;

/// A repository as reported to the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryResult {
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub open_issues: u64,
    /// SPDX identifier, e.g. "MIT"
    pub license: Option<String>,
    /// Raw README text; absent unless requested and successfully fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
}

impl From<ApiRepository> for RepositoryResult {
    fn from(repo: ApiRepository) -> Self {
        Self {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            url: repo.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo.language,
            topics: repo.topics,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at: repo.pushed_at,
            open_issues: repo.open_issues_count,
            license: repo.license.and_then(|l| l.spdx_id),
            readme: None,
        }
    }
}

/// Successful search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub success: bool,
    pub count: usize,
    pub repositories: Vec<RepositoryResult>,
    /// Only present when nothing matched and fallback suggestions were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failed invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub error_type: String,
    /// Upstream HTTP status, if the API answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Top-level JSON object returned by one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Success(SearchEnvelope),
    Failure(ErrorEnvelope),
}

impl Envelope {
    pub fn success(repositories: Vec<RepositoryResult>) -> Self {
        Self::Success(SearchEnvelope {
            success: true,
            count: repositories.len(),
            repositories,
            suggestions: None,
            message: None,
        })
    }

    pub fn failure(error: &SearchError) -> Self {
        Self::Failure(ErrorEnvelope {
            success: false,
            error: error.to_string(),
            error_type: error.error_type().to_string(),
            status: error.status(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Serialize as compact or indented JSON
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubError;
    use serde_json::Value;

    fn api_repo() -> ApiRepository {
        serde_json::from_value(serde_json::json!({
            "name": "openpyxl",
            "full_name": "theorchard/openpyxl",
            "description": null,
            "html_url": "https://github.com/theorchard/openpyxl",
            "stargazers_count": 1200,
            "forks_count": 300,
            "language": "Python",
            "created_at": "2015-01-01T00:00:00Z",
            "updated_at": "2024-05-01T12:00:00Z",
            "pushed_at": null,
            "open_issues_count": 4,
            "license": { "key": "mit", "spdx_id": "MIT" }
        }))
        .unwrap()
    }

    #[test]
    fn test_from_api_repository() {
        let repo = RepositoryResult::from(api_repo());
        assert_eq!(repo.url, "https://github.com/theorchard/openpyxl");
        assert_eq!(repo.stars, 1200);
        assert_eq!(repo.license.as_deref(), Some("MIT"));
        assert!(repo.topics.is_empty());
        assert!(repo.pushed_at.is_none());
    }

    #[test]
    fn test_readme_key_omitted_when_absent() {
        let repo = RepositoryResult::from(api_repo());
        let value = serde_json::to_value(&repo).unwrap();
        assert!(value.get("readme").is_none());
        assert_eq!(value["description"], Value::Null);
        assert_eq!(value["updated_at"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope::success(vec![RepositoryResult::from(api_repo())]);
        let value: Value = serde_json::from_str(&envelope.to_json(false).unwrap()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 1);
        assert!(value.get("suggestions").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_failure_envelope_shape() {
        let err = SearchError::from(GitHubError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        });
        let envelope = Envelope::failure(&err);
        assert!(!envelope.is_success());

        let value: Value = serde_json::from_str(&envelope.to_json(true).unwrap()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error_type"], "api_error");
        assert_eq!(value["status"], 503);
        assert!(value["error"].as_str().unwrap().contains("503"));
    }

    #[test]
    fn test_envelope_round_trips_by_shape() {
        let json = r#"{"success": false, "error": "'keywords' is required", "error_type": "validation_error"}"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert!(matches!(envelope, Envelope::Failure(ref e) if e.status.is_none()));
    }
}
