//! GitHub Search Library
//!
//! Repository search tool for LLM agents: validates a structured request,
//! queries the GitHub search API, optionally pulls README text, and returns
//! a JSON envelope.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use github_search_mcp::{search, Config, SearchParams};
//!
//! let config = Config::load()?;
//! let params = SearchParams::from_json(r#"{"keywords": "excel", "language": "python"}"#)?;
//! let envelope = search::run(&config, params).await;
//! println!("{}", envelope.to_json(true)?);
//! ```
//!
//! # Configuration
//! Set `GITHUB_TOKEN` (or log in with `gh`) for higher rate limits.
//! Other settings live in `~/.binks/github-search.toml`.

pub mod auth;
pub mod config;
pub mod error;
pub mod github;
pub mod params;
pub mod prompts;
pub mod query;
pub mod readme;
pub mod search;
pub mod server;
pub mod suggest;
pub mod types;

// Re-export main entry points
pub use config::Config;
pub use error::SearchError;
pub use params::{SearchParams, SearchRequest, SortBy};
pub use search::SearchTool;
pub use server::GitHubSearchMcpServer;
pub use types::{Envelope, RepositoryResult};
