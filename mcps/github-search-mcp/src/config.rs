//! Configuration loading for github-search
//!
//! Configuration is loaded from:
//! 1. Environment variable GITHUB_API_URL (API base URL only)
//! 2. Environment variable GITHUB_SEARCH_CONFIG_PATH
//! 3. ~/.binks/github-search.toml
//! 4. Default values

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API connection settings
    #[serde(default)]
    pub github: GitHubConfig,
    /// Search behaviour settings
    #[serde(default)]
    pub search: SearchConfig,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL (override for GitHub Enterprise or test stubs)
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Value sent in the X-GitHub-Api-Version header
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// User-Agent header (GitHub rejects requests without one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Ask `gh auth token` when no token is in the environment
    #[serde(default = "default_true")]
    pub use_gh_cli: bool,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result count used when a request does not set `max_results`
    #[serde(default = "default_max_results")]
    pub default_max_results: u32,
    /// READMEs longer than this many characters are cut off
    #[serde(default = "default_readme_max_chars")]
    pub readme_max_chars: usize,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_api_version() -> String {
    "2022-11-28".to_string()
}

fn default_user_agent() -> String {
    format!("github-search-mcp/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_max_results() -> u32 {
    5
}

fn default_readme_max_chars() -> usize {
    5000
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_version: default_api_version(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            use_gh_cli: default_true(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_results: default_max_results(),
            readme_max_chars: default_readme_max_chars(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(_) => {
                tracing::debug!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::debug!("No config path specified, using defaults");
                Self::default()
            }
        };

        // API URL from environment (highest priority)
        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            if !url.is_empty() {
                config.github.api_url = url;
            }
        }

        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("GITHUB_SEARCH_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        dirs::home_dir().map(|home| home.join(".binks").join("github-search.toml"))
    }
}

impl GitHubConfig {
    /// API base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.api_version, "2022-11-28");
        assert_eq!(config.github.timeout_seconds, 30);
        assert!(config.github.use_gh_cli);
        assert_eq!(config.search.default_max_results, 5);
        assert_eq!(config.search.readme_max_chars, 5000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[github]\napi_url = \"https://ghe.example.com/api/v3/\"\nuse_gh_cli = false\n\n[search]\nreadme_max_chars = 100"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.github.api_base(), "https://ghe.example.com/api/v3");
        assert!(!config.github.use_gh_cli);
        assert_eq!(config.github.timeout_seconds, 30);
        assert_eq!(config.search.readme_max_chars, 100);
        assert_eq!(config.search.default_max_results, 5);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[github\napi_url = ").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }
}
