//! Top-level error type for a search invocation

use thiserror::Error;

use crate::github::GitHubError;

/// Errors surfaced to the caller as a failure envelope
#[derive(Error, Debug)]
pub enum SearchError {
    /// Bad input; reported before any network call
    #[error("{0}")]
    Validation(String),

    /// The search endpoint failed or could not be reached
    #[error(transparent)]
    GitHub(#[from] GitHubError),
}

impl SearchError {
    /// Machine-readable category for the `error_type` field
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::GitHub(e) if e.is_rate_limited() => "rate_limit_error",
            Self::GitHub(GitHubError::Api { .. } | GitHubError::Request(_)) => "api_error",
            Self::GitHub(_) => "unexpected_error",
        }
    }

    /// Upstream HTTP status, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => None,
            Self::GitHub(e) => e.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let validation = SearchError::Validation("bad".into());
        assert_eq!(validation.error_type(), "validation_error");
        assert_eq!(validation.status(), None);

        let limited = SearchError::from(GitHubError::RateLimited {
            status: 429,
            message: "slow down".into(),
        });
        assert_eq!(limited.error_type(), "rate_limit_error");
        assert_eq!(limited.status(), Some(429));

        let api = SearchError::from(GitHubError::Api {
            status: 503,
            message: "unavailable".into(),
        });
        assert_eq!(api.error_type(), "api_error");
        assert_eq!(api.to_string(), "GitHub API error: 503 - unavailable");

        let header = SearchError::from(GitHubError::InvalidHeader("GitHub token"));
        assert_eq!(header.error_type(), "unexpected_error");
    }
}
