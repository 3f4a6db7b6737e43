//! # mcp-graphql
//!
//! MCP (Model Context Protocol) server that lets AI agents explore and query
//! a GraphQL API without loading its whole schema into their context.

#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::format_push_string)]
#![allow(clippy::needless_pass_by_value)]
//!
//! The server introspects the configured endpoint (or reads a saved
//! introspection or SDL file), builds a keyword index over every field reachable
//! from the root operation types, and exposes tools to:
//! - search fields by keyword and get a query template
//! - render a type definition to a bounded depth
//! - print the full schema as SDL
//! - list curated query examples and workflows
//! - execute queries, with mutations rejected unless enabled
//! - report schema and connectivity status
//!
//! ## Example
//!
//! ```ignore
//! use clap::Parser;
//! use mcp_graphql::{Config, GraphQLMcpServer};
//!
//! let server = GraphQLMcpServer::new(Config::parse())?;
//! server.run_stdio().await?;
//! ```

mod config;
mod examples;
mod service;
mod tools;
mod types;

pub use config::{Config, Headers, DEFAULT_ENDPOINT};
pub use examples::{
    contextual_examples, render_examples, suggest_keywords, ExampleCategory, QueryExample,
    QUERY_EXAMPLES, SEARCH_PATTERNS,
};
pub use service::{operation_kinds, DebugReport, McpService, ProbeResponse, QueryError};
pub use tools::GraphQLToolRouter;
pub use types::{
    DebugStatusParams, IntrospectTypeParams, MAX_TYPE_DEPTH, QueryExamplesParams, QueryGraphqlParams,
    SearchSchemaParams,
};

use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

/// MCP server over one GraphQL endpoint
pub struct GraphQLMcpServer {
    service: Arc<McpService>,
}

impl GraphQLMcpServer {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            service: Arc::new(McpService::new(config)?),
        })
    }

    pub fn service(&self) -> &Arc<McpService> {
        &self.service
    }

    /// Tool router sharing this server's service
    pub fn router(&self) -> GraphQLToolRouter {
        GraphQLToolRouter::new(Arc::clone(&self.service))
    }

    /// Run the MCP server with stdio transport
    ///
    /// The schema is loaded before serving. If that fails the server still
    /// starts and the next tool call that needs the schema tries again.
    pub async fn run_stdio(self) -> Result<()> {
        let config = self.service.config();
        tracing::info!(name = %config.name, endpoint = %config.endpoint, "Starting GraphQL MCP server");

        if let Err(e) = self.service.initialize().await {
            tracing::warn!("Schema not loaded at startup, will retry on first use: {e:#}");
        }

        let server = self.router().serve(rmcp::transport::stdio()).await?;
        tracing::info!("GraphQL MCP server running");

        server.waiting().await?;

        tracing::info!("GraphQL MCP server stopped");
        Ok(())
    }
}
