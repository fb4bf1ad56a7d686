//! The search tool
//!
//! One invocation is strictly linear: validate → build query → one search
//! call → optionally one README call per kept result → envelope. Calls are
//! awaited one after another; nothing is retried.

use tracing::{debug, info, instrument, warn};

use crate::auth::{resolve_token, TokenSource};
use crate::config::Config;
use crate::error::SearchError;
use crate::github::GitHubClient;
use crate::params::{SearchParams, SearchRequest, SortBy};
use crate::query::build_query;
use crate::readme;
use crate::suggest::{suggestions, NO_RESULTS_MESSAGE};
use crate::types::{Envelope, RepositoryResult};

/// GitHub repository search with optional README retrieval
#[derive(Clone)]
pub struct SearchTool {
    client: GitHubClient,
    default_max_results: u32,
    readme_max_chars: usize,
}

impl SearchTool {
    pub fn new(client: GitHubClient, config: &Config) -> Self {
        Self {
            client,
            default_max_results: config.search.default_max_results,
            readme_max_chars: config.search.readme_max_chars,
        }
    }

    /// Resolve a token and build the HTTP client
    pub async fn connect(config: &Config) -> Result<Self, SearchError> {
        let token = resolve_token(config.github.use_gh_cli).await;
        match token {
            Some((_, TokenSource::Environment(var))) => info!("Using GitHub token from {}", var),
            Some((_, TokenSource::GhCli)) => info!("Using GitHub token from gh CLI"),
            None => warn!("No GitHub token found; using unauthenticated rate limits"),
        }

        let client = GitHubClient::new(&config.github, token.as_ref().map(|(t, _)| t))?;
        Ok(Self::new(client, config))
    }

    /// Validate raw parameters, search, and wrap the outcome
    pub async fn run(&self, params: SearchParams) -> Envelope {
        match params.validate(self.default_max_results) {
            Ok(request) => self.execute(&request).await,
            Err(e) => {
                debug!("rejected request: {}", e);
                Envelope::failure(&e)
            }
        }
    }

    /// Search for an already validated request and wrap the outcome
    pub async fn execute(&self, request: &SearchRequest) -> Envelope {
        match self.search(request).await {
            Ok(repositories) if repositories.is_empty() && request.fallback_search => {
                let mut envelope = Envelope::success(repositories);
                if let Envelope::Success(ref mut ok) = envelope {
                    ok.suggestions = Some(suggestions(request));
                    ok.message = Some(NO_RESULTS_MESSAGE.to_string());
                }
                envelope
            }
            Ok(repositories) => Envelope::success(repositories),
            Err(e) => {
                warn!(error_type = e.error_type(), "search failed: {}", e);
                Envelope::failure(&e)
            }
        }
    }

    /// Run the search and return ordered, capped results
    #[instrument(skip_all, fields(keywords = %request.keywords, sort = request.sort_by.as_str()))]
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RepositoryResult>, SearchError> {
        let query = build_query(request);
        info!("Searching GitHub: {} (limit: {})", query, request.max_results);

        let response = self
            .client
            .search_repositories(&query, request.sort_by, request.max_results)
            .await?;

        let mut repositories: Vec<RepositoryResult> = response
            .items
            .into_iter()
            .map(RepositoryResult::from)
            .filter(|r| r.stars >= request.min_stars)
            .collect();

        sort_results(&mut repositories, request.sort_by);
        repositories.truncate(request.max_results as usize);

        if request.include_readme {
            for repo in repositories.iter_mut() {
                repo.readme = self.readme_for(&repo.full_name).await;
            }
        }

        info!("Returning {} repositories", repositories.len());
        Ok(repositories)
    }

    /// README failures only cost the field, never the search
    async fn readme_for(&self, full_name: &str) -> Option<String> {
        match self.client.fetch_readme(full_name).await {
            Ok(text) => text.map(|t| readme::truncate(t, self.readme_max_chars)),
            Err(e) => {
                warn!("README fetch failed for {}: {}", full_name, e);
                None
            }
        }
    }
}

/// Validate, connect, search
///
/// Validation happens before token discovery so bad input never touches the
/// network or spawns `gh`.
pub async fn run(config: &Config, params: SearchParams) -> Envelope {
    let request = match params.validate(config.search.default_max_results) {
        Ok(request) => request,
        Err(e) => return Envelope::failure(&e),
    };

    match SearchTool::connect(config).await {
        Ok(tool) => tool.execute(&request).await,
        Err(e) => Envelope::failure(&e),
    }
}

/// Descending by the sort field; `help-wanted-issues` keeps upstream order
fn sort_results(repositories: &mut [RepositoryResult], sort: SortBy) {
    match sort {
        SortBy::Stars => repositories.sort_by(|a, b| b.stars.cmp(&a.stars)),
        SortBy::Forks => repositories.sort_by(|a, b| b.forks.cmp(&a.forks)),
        SortBy::Updated => repositories.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortBy::HelpWantedIssues => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo(name: &str, stars: u64, forks: u64, updated_day: u32) -> RepositoryResult {
        let ts = Utc.with_ymd_and_hms(2024, 1, updated_day, 0, 0, 0).unwrap();
        RepositoryResult {
            name: name.to_string(),
            full_name: format!("owner/{}", name),
            description: None,
            url: format!("https://github.com/owner/{}", name),
            stars,
            forks,
            language: None,
            topics: vec![],
            created_at: ts,
            updated_at: ts,
            pushed_at: Some(ts),
            open_issues: 0,
            license: None,
            readme: None,
        }
    }

    fn names(repos: &[RepositoryResult]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_stars_descending() {
        let mut repos = vec![repo("a", 10, 0, 1), repo("b", 30, 0, 1), repo("c", 20, 0, 1)];
        sort_results(&mut repos, SortBy::Stars);
        assert_eq!(names(&repos), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_by_forks_descending() {
        let mut repos = vec![repo("a", 0, 5, 1), repo("b", 0, 1, 1), repo("c", 0, 9, 1)];
        sort_results(&mut repos, SortBy::Forks);
        assert_eq!(names(&repos), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_by_updated_most_recent_first() {
        let mut repos = vec![repo("a", 0, 0, 3), repo("b", 0, 0, 9), repo("c", 0, 0, 1)];
        sort_results(&mut repos, SortBy::Updated);
        assert_eq!(names(&repos), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_help_wanted_keeps_upstream_order() {
        let mut repos = vec![repo("a", 1, 0, 1), repo("b", 3, 0, 1), repo("c", 2, 0, 1)];
        sort_results(&mut repos, SortBy::HelpWantedIssues);
        assert_eq!(names(&repos), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_run_rejects_missing_keywords_without_connecting() {
        // Unroutable API URL: a network attempt would surface as api_error
        let mut config = Config::default();
        config.github.api_url = "http://127.0.0.1:9".to_string();
        config.github.use_gh_cli = false;

        let envelope = run(&config, SearchParams::default()).await;
        match envelope {
            Envelope::Failure(e) => assert_eq!(e.error_type, "validation_error"),
            Envelope::Success(_) => panic!("expected failure"),
        }
    }
}
