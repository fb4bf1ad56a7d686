//! Error types for GitHub API calls

use thiserror::Error;

/// Errors that can occur when talking to the GitHub API
#[derive(Error, Debug)]
pub enum GitHubError {
    /// The API answered 403 or 429
    #[error("GitHub API rate limit exceeded ({status}): {message}")]
    RateLimited {
        /// HTTP status returned by GitHub
        status: u16,
        /// Upstream message plus advice for the caller
        message: String,
    },

    /// Any other non-2xx response
    #[error("GitHub API error: {status} - {message}")]
    Api {
        /// HTTP status returned by GitHub
        status: u16,
        /// Upstream error message (or raw body)
        message: String,
    },

    /// Transport-level failure (DNS, TLS, timeout, connection reset)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the JSON we expected
    #[error("failed to parse GitHub response: {0}")]
    Decode(#[from] serde_json::Error),

    /// README content could not be turned into text
    #[error("failed to decode README: {0}")]
    Readme(String),

    /// A configured value (token, API version) cannot be sent as a header
    #[error("{0} is not a valid HTTP header value")]
    InvalidHeader(&'static str),
}

impl GitHubError {
    /// HTTP status carried by the error, if the upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Result type alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;
