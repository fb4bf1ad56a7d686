//! Token discovery for GitHub API calls
//!
//! Authentication is opportunistic: a token raises the rate limit, but
//! searches still work without one. Lookup order:
//! 1. `GITHUB_TOKEN`
//! 2. `GH_TOKEN`
//! 3. `gh auth token` (GitHub CLI)

use std::fmt;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// How long to wait for `gh auth token` before giving up
const GH_CLI_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variables checked for a personal access token, in order
const TOKEN_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// A GitHub access token
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Where a resolved token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment(&'static str),
    GhCli,
}

/// Find a token from the environment, falling back to the GitHub CLI
#[instrument]
pub async fn resolve_token(use_gh_cli: bool) -> Option<(Token, TokenSource)> {
    if let Some(found) = token_from_vars(|name| std::env::var(name).ok()) {
        return Some(found);
    }

    if use_gh_cli {
        if let Some(token) = token_from_gh_cli().await {
            return Some((token, TokenSource::GhCli));
        }
    }

    debug!("no GitHub token found, requests will be unauthenticated");
    None
}

/// First non-empty token among [`TOKEN_VARS`], read through `lookup`
pub fn token_from_vars<F>(lookup: F) -> Option<(Token, TokenSource)>
where
    F: Fn(&str) -> Option<String>,
{
    TOKEN_VARS.iter().find_map(|&name| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| (Token::new(v), TokenSource::Environment(name)))
    })
}

/// Ask the GitHub CLI for its stored token
///
/// Any failure (not installed, not logged in, timeout) yields `None`.
async fn token_from_gh_cli() -> Option<Token> {
    let child = Command::new("gh")
        .args(["auth", "token"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            debug!("gh CLI unavailable: {}", e);
            return None;
        }
    };

    let output = match tokio::time::timeout(GH_CLI_TIMEOUT, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            debug!("gh auth token failed: {}", e);
            return None;
        }
        Err(_) => {
            debug!("gh auth token timed out");
            return None;
        }
    };

    if !output.status.success() {
        debug!(
            code = output.status.code().unwrap_or(-1),
            "gh auth token exited unsuccessfully"
        );
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then(|| Token::new(token))
}
