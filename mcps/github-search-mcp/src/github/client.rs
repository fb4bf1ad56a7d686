//! HTTP client for the GitHub REST API
//!
//! See: https://docs.github.com/en/rest/search/search#search-repositories

use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::{GitHubError, GitHubResult};
use super::types::{ApiErrorBody, ReadmeResponse, SearchResponse};
use crate::auth::Token;
use crate::config::GitHubConfig;
use crate::params::SortBy;
use crate::readme;

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    authenticated: bool,
}

impl GitHubClient {
    /// Build a client from config, attaching the bearer token when one is given
    pub fn new(config: &GitHubConfig, token: Option<&Token>) -> GitHubResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_str(&config.api_version)
                .map_err(|_| GitHubError::InvalidHeader("api_version"))?,
        );

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|_| GitHubError::InvalidHeader("GitHub token"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base().to_string(),
            authenticated: token.is_some(),
        })
    }

    /// Run one repository search, descending by `sort`
    #[instrument(skip(self), fields(authenticated = self.authenticated))]
    pub async fn search_repositories(
        &self,
        query: &str,
        sort: SortBy,
        per_page: u32,
    ) -> GitHubResult<SearchResponse> {
        let url = format!("{}/search/repositories", self.base_url);

        let params = [
            ("q", query.to_string()),
            ("sort", sort.as_str().to_string()),
            ("order", "desc".to_string()),
            ("per_page", per_page.to_string()),
        ];

        debug!("GET {}", url);
        let response = self.client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }

        let body = response.text().await?;
        let search: SearchResponse = serde_json::from_str(&body)?;

        if search.incomplete_results {
            warn!("GitHub reported incomplete search results");
        }
        debug!(
            total = search.total_count,
            returned = search.items.len(),
            "search complete"
        );

        Ok(search)
    }

    /// Fetch and decode a repository README
    ///
    /// Returns `Ok(None)` when the repository has no README (404).
    #[instrument(skip(self))]
    pub async fn fetch_readme(&self, full_name: &str) -> GitHubResult<Option<String>> {
        let url = format!("{}/repos/{}/readme", self.base_url, full_name);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("no README for {}", full_name);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }

        let body = response.text().await?;
        let readme: ReadmeResponse = serde_json::from_str(&body)?;

        if readme.content.is_empty() {
            return Ok(None);
        }
        if let Some(encoding) = readme.encoding.as_deref() {
            if encoding != "base64" {
                return Err(GitHubError::Readme(format!(
                    "unsupported encoding '{}'",
                    encoding
                )));
            }
        }

        readme::decode_content(&readme.content).map(Some)
    }

    async fn error_from_response(&self, response: Response) -> GitHubError {
        let status = response.status();
        let reset = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok());
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|b| b.message)
            .unwrap_or(text);

        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            warn!(status = status.as_u16(), "GitHub rate limit hit");
            return GitHubError::RateLimited {
                status: status.as_u16(),
                message: rate_limit_message(&message, self.authenticated, reset, retry_after),
            };
        }

        warn!(status = status.as_u16(), message = %message, "GitHub API error");
        GitHubError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn rate_limit_message(
    upstream: &str,
    authenticated: bool,
    reset: Option<i64>,
    retry_after: Option<u64>,
) -> String {
    let mut message = upstream.trim().trim_end_matches('.').to_string();

    if !authenticated {
        message.push_str(
            ". Unauthenticated requests have a low limit; set GITHUB_TOKEN or run `gh auth login`",
        );
    }

    if let Some(secs) = retry_after {
        message.push_str(&format!(". Retry after {} seconds", secs));
    } else if let Some(at) = reset.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
        message.push_str(&format!(". Limit resets at {}", at.to_rfc3339()));
    } else {
        message.push_str(". Wait a while before searching again");
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_message_unauthenticated() {
        let msg = rate_limit_message("API rate limit exceeded", false, Some(0), None);
        assert!(msg.starts_with("API rate limit exceeded"));
        assert!(msg.contains("GITHUB_TOKEN"));
        assert!(msg.contains("1970-01-01T00:00:00+00:00"));
    }

    #[test]
    fn test_rate_limit_message_prefers_retry_after() {
        let msg = rate_limit_message("slow down", true, Some(0), Some(60));
        assert!(!msg.contains("GITHUB_TOKEN"));
        assert!(msg.contains("Retry after 60 seconds"));
        assert!(!msg.contains("resets at"));
    }

    #[test]
    fn test_client_records_authentication() {
        let config = GitHubConfig::default();
        let anon = GitHubClient::new(&config, None).unwrap();
        assert!(!anon.authenticated);

        let token = Token::new("ghp_example");
        let authed = GitHubClient::new(&config, Some(&token)).unwrap();
        assert!(authed.authenticated);
    }
}
