//! GitHub REST API client
//!
//! Thin wrapper over `reqwest` covering the two endpoints the search tool
//! needs: repository search and README retrieval.

pub mod client;
pub mod error;
pub mod types;

pub use client::GitHubClient;
pub use error::{GitHubError, GitHubResult};
pub use types::{ApiLicense, ApiRepository, ReadmeResponse, SearchResponse};
