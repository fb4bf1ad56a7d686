//! MCP Server implementation for GitHub repository search
//!
//! Exposes the search tool to MCP hosts over stdio. Tool failures are
//! returned as error results carrying the same JSON envelope the CLI prints,
//! so the agent can read `error_type` and react.

use std::borrow::Cow;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::Deserialize;

use crate::config::Config;
use crate::params::SearchParams;
use crate::prompts::{AGENT_INSTRUCTIONS, SERVER_INSTRUCTIONS};
use crate::search;
use crate::types::Envelope;

/// Raw `search_repositories` arguments
///
/// Published with the [`SearchParams`] schema but accepted as any JSON value,
/// so badly typed arguments come back as a `validation_error` envelope
/// instead of a protocol error.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct SearchArguments(pub serde_json::Value);

impl JsonSchema for SearchArguments {
    fn schema_name() -> Cow<'static, str> {
        SearchParams::schema_name()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        SearchParams::json_schema(generator)
    }
}

/// The main GitHub Search MCP Server
#[derive(Clone)]
pub struct GitHubSearchMcpServer {
    config: Config,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GitHubSearchMcpServer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search GitHub repositories by keywords with optional language, min_stars, topic and sort filters. Returns repository metadata and, unless include_readme is false, README text."
    )]
    async fn search_repositories(
        &self,
        Parameters(SearchArguments(args)): Parameters<SearchArguments>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = match SearchParams::from_value(args) {
            Ok(params) => {
                tracing::info!("search_repositories: {:?}", params.keywords);
                search::run(&self.config, params).await
            }
            Err(e) => {
                tracing::warn!("search_repositories: {}", e);
                Envelope::failure(&e)
            }
        };
        let json = envelope
            .to_json(true)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        if envelope.is_success() {
            Ok(CallToolResult::success(vec![Content::text(json)]))
        } else {
            Ok(CallToolResult::error(vec![Content::text(json)]))
        }
    }

    #[tool(description = "Get the full agent instructions: search workflow, output template and rules.")]
    async fn get_agent_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(AGENT_INSTRUCTIONS)]))
    }
}

#[tool_handler]
impl rmcp::ServerHandler for GitHubSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
