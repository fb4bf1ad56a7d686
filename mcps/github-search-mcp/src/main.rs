//! GitHub Search
//!
//! Searches GitHub repositories on behalf of an LLM agent.
//!
//! # Usage
//!
//! ```bash
//! github-search '{"keywords": "python web framework", "min_stars": 1000}'
//! echo '{"keywords": "react components", "language": "typescript"}' | github-search --pretty
//! github-search serve          # MCP server over stdio
//! github-search instructions   # print the agent system prompt
//! ```
//!
//! The JSON envelope is written to stdout; logs go to stderr.
//! Exit status is 1 when the envelope reports a failure.

use std::io::{IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use github_search_mcp::prompts::AGENT_INSTRUCTIONS;
use github_search_mcp::{search, Config, Envelope, GitHubSearchMcpServer, SearchParams};

/// Read when neither an argument nor piped stdin provides parameters
const PARAMS_FILE: &str = "search_params.json";

#[derive(Parser)]
#[command(name = "github-search")]
#[command(about = "Search GitHub repositories with advanced filtering")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON object with search parameters (can also be piped via stdin)
    parameters: Option<String>,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// GitHub API base URL (overrides config and GITHUB_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP server over stdio
    Serve,
    /// Print the agent instructions document
    Instructions,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Some(Commands::Serve) => "info",
        _ => "warn",
    };
    init_tracing(default_level)?;

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url.clone() {
        config.github.api_url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.github.timeout_seconds = timeout;
    }

    match cli.command {
        Some(Commands::Serve) => {
            serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Instructions) => {
            println!("{}", AGENT_INSTRUCTIONS);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let Some(input) = read_parameters(cli.parameters)? else {
                Cli::command().print_help()?;
                return Ok(ExitCode::FAILURE);
            };
            run_once(&config, &input, cli.pretty).await
        }
    }
}

/// Logs go to stderr; stdout carries only the JSON envelope or MCP frames
fn init_tracing(default_level: &str) -> Result<()> {
    let directive = format!("github_search_mcp={}", default_level);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

/// Positional argument, then piped stdin, then `search_params.json`
fn read_parameters(arg: Option<String>) -> Result<Option<String>> {
    if let Some(arg) = arg {
        return Ok(Some(arg));
    }

    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let mut input = String::new();
        stdin
            .lock()
            .read_to_string(&mut input)
            .context("failed to read parameters from stdin")?;
        let input = input.trim();
        if !input.is_empty() {
            return Ok(Some(input.to_string()));
        }
    }

    let path = Path::new(PARAMS_FILE);
    if path.exists() {
        tracing::info!("Reading parameters from {}", PARAMS_FILE);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", PARAMS_FILE))?;
        return Ok(Some(content.trim().to_string()));
    }

    Ok(None)
}

async fn run_once(config: &Config, input: &str, pretty: bool) -> Result<ExitCode> {
    let envelope = match SearchParams::from_json(input) {
        Ok(params) => search::run(config, params).await,
        Err(e) => Envelope::failure(&e),
    };

    println!("{}", envelope.to_json(pretty)?);

    Ok(if envelope.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn serve(config: Config) -> Result<()> {
    tracing::info!("Starting GitHub Search MCP Server");
    tracing::info!("GitHub API: {}", config.github.api_base());

    let server = GitHubSearchMcpServer::new(config);
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
