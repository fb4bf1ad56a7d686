//! GitHub API response types
//!
//! Only the fields the search tool reads are modelled; serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body of `GET /search/repositories`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Total matches reported by GitHub (not the page size)
    #[serde(default)]
    pub total_count: u64,
    /// Set when the search timed out server-side
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<ApiRepository>,
}

/// A repository item as returned by the search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Null for repositories that never received a push
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    pub open_issues_count: u64,
    #[serde(default)]
    pub license: Option<ApiLicense>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLicense {
    #[serde(default)]
    pub spdx_id: Option<String>,
}

/// Body of `GET /repos/{owner}/{repo}/readme`
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeResponse {
    /// Base64 payload, wrapped at 60 columns
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// GitHub's JSON error body
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
