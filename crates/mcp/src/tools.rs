//! MCP tool definitions
//!
//! This module defines the tools exposed to AI agents via MCP. Each tool
//! delegates to [`McpService`] and renders the outcome as text for the agent.

use crate::examples::{contextual_examples, pattern, render_examples, suggest_keywords};
use crate::service::{pretty, DebugReport, McpService};
use crate::types::{
    DebugStatusParams, IntrospectTypeParams, QueryExamplesParams, QueryGraphqlParams,
    SearchSchemaParams,
};
use mcp_graphql_index::{query_template, SearchResult};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::fmt::Write;
use std::sync::Arc;

/// GraphQL MCP tool router
///
/// This struct implements `ServerHandler` and exposes the schema search and
/// query tools.
#[derive(Clone)]
pub struct GraphQLToolRouter {
    service: Arc<McpService>,
    tool_router: ToolRouter<Self>,
}

impl GraphQLToolRouter {
    /// Create a new tool router with the given service
    pub fn new(service: Arc<McpService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }
}

fn text(content: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content.into())])
}

fn failure(content: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(content.into())])
}

#[tool_router]
impl GraphQLToolRouter {
    #[tool(
        name = "search-schema",
        description = "ALWAYS START HERE: Search GraphQL schema fields by keywords instead of loading the whole schema. Use broad keywords first (player, match, hero), then narrow down (winrate, performance). Returns field paths, types, descriptions, and a generated query template."
    )]
    pub async fn search_schema(
        &self,
        Parameters(params): Parameters<SearchSchemaParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(match self
            .service
            .search(&params.keywords, params.max_results)
            .await
        {
            Ok(results) if results.is_empty() => text(format_no_results(&params.keywords)),
            Ok(results) => text(format_search_results(&params.keywords, &results)),
            Err(e) => failure(format!("Schema search failed: {e:#}")),
        })
    }

    #[tool(
        name = "introspect-type",
        description = "DEEP DIVE: Get the structure of a specific GraphQL type with controlled depth. Use this AFTER search-schema when you need to explore a specific type (like PlayerType, MatchType, HeroType)."
    )]
    pub async fn introspect_type(
        &self,
        Parameters(params): Parameters<IntrospectTypeParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(match self
            .service
            .type_definition(&params.type_name, params.depth())
            .await
        {
            Ok(definition) => text(definition),
            Err(e) => failure(format!("Type introspection failed: {e:#}")),
        })
    }

    #[tool(
        name = "introspect-schema",
        description = "Return the complete schema as SDL. The output is large; prefer search-schema and introspect-type."
    )]
    pub async fn introspect_schema(&self) -> Result<CallToolResult, McpError> {
        Ok(match self.service.schema_sdl().await {
            Ok(sdl) => text(sdl),
            Err(e) => failure(format!("Failed to get GraphQL schema: {e:#}")),
        })
    }

    #[tool(
        name = "get-query-examples",
        description = "GUIDANCE: Get curated query examples, workflows, and best practices for common Dota 2 data analysis tasks."
    )]
    #[allow(clippy::unused_async)]
    pub async fn get_query_examples(
        &self,
        Parameters(params): Parameters<QueryExamplesParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text(render_examples(params.category)))
    }

    #[tool(
        name = "query-graphql",
        description = "EXECUTE: Run a GraphQL query against the API. Use query templates from search-schema as starting points and variables for dynamic values. Mutations are rejected unless enabled in the configuration."
    )]
    pub async fn query_graphql(
        &self,
        Parameters(params): Parameters<QueryGraphqlParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(match self
            .service
            .execute_query(&params.query, params.variables.as_deref())
            .await
        {
            Ok(data) => text(pretty(&data)),
            Err(e) => failure(e.to_string()),
        })
    }

    #[tool(
        name = "debug-schema-status",
        description = "DEBUG: Check schema initialization status, API connectivity, and index statistics, then rebuild the index. Use this if search-schema returns no results."
    )]
    pub async fn debug_schema_status(
        &self,
        Parameters(params): Parameters<DebugStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.service.debug_report(params.include_headers).await;
        Ok(text(format_debug_report(&report)))
    }
}

#[tool_handler]
impl ServerHandler for GraphQLToolRouter {
    fn get_info(&self) -> ServerInfo {
        let config = self.service.config();
        ServerInfo {
            server_info: Implementation {
                name: config.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "GraphQL MCP server for {}. \
                 Use search-schema to find relevant fields, introspect-type to explore a type, \
                 and query-graphql to run queries. get-query-examples lists curated workflows.",
                config.endpoint
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Format search results, query template and related examples
fn format_search_results(keywords: &[String], results: &[SearchResult]) -> String {
    let mut output = format!("Found {} relevant fields:\n\n", results.len());
    for result in results {
        let field = &result.field;
        let _ = write!(
            output,
            "{} ({}) - depth: {}",
            field.path, field.type_name, field.depth
        );
        if let Some(description) = &field.description {
            let _ = write!(output, " - {description}");
        }
        output.push('\n');
    }

    let fields: Vec<_> = results.iter().map(|r| r.field.clone()).collect();
    let _ = write!(output, "\n=== Query Template ===\n{}", query_template(&fields));

    let examples = contextual_examples(keywords);
    if !examples.is_empty() {
        output.push_str("\n\n=== Contextual Examples ===\n");
        for example in examples {
            let _ = writeln!(
                output,
                "{}:\n{}\nVariables: {}\n",
                example.description, example.query, example.variables
            );
        }
    }
    output
}

/// Format the no-results answer with keyword suggestions
fn format_no_results(keywords: &[String]) -> String {
    let suggestions = suggest_keywords(&keywords.join(" "));
    let mut output = format!("No fields found for keywords: {}\n", keywords.join(", "));
    if !suggestions.is_empty() {
        let _ = write!(
            output,
            "\nTry these related keywords instead:\n{}\n",
            suggestions.join(", ")
        );
    }
    let _ = write!(
        output,
        "\nCommon search patterns:\n- Player data: {}\n- Match data: {}\n- Hero data: {}",
        pattern("player").join(", "),
        pattern("match").join(", "),
        pattern("hero").join(", ")
    );
    output
}

/// Format the debug report as human-readable text
fn format_debug_report(report: &DebugReport) -> String {
    let mut output = String::from("=== Schema Debug Information ===\n");
    let before = &report.status_before;
    let _ = writeln!(output, "Schema initialized: {}", before.initialized);
    let _ = writeln!(output, "Endpoint: {}", report.endpoint);
    if let Some(path) = &report.schema_file {
        let _ = writeln!(output, "Schema file: {path}");
    }
    let _ = writeln!(
        output,
        "Index size: {} keywords, {} fields, {} cached types (generation {})",
        before.index_size, before.fields, before.cached_types, before.generation
    );

    if let Some(names) = &report.header_names {
        if names.is_empty() {
            output.push_str("Headers: (none)\n");
        } else {
            let _ = writeln!(output, "Headers: {}", names.join(", "));
        }
    }

    match &report.probe {
        Ok(probe) => {
            let _ = writeln!(output, "API Test Status: {}", probe.status);
            if let Some(body) = &probe.error_body {
                let _ = writeln!(output, "API Error Response: {body}");
            }
        }
        Err(e) => {
            let _ = writeln!(output, "API Connection Error: {e}");
        }
    }

    match &report.reinitialize {
        Ok(stats) => {
            output.push_str("Schema reinitialization: SUCCESS\n");
            let _ = writeln!(
                output,
                "Index size after reinit: {} keywords, {} fields",
                stats.keywords, stats.fields
            );
        }
        Err(e) => {
            let _ = writeln!(output, "Schema reinitialization: FAILED - {e}");
            let after = &report.status_after;
            if after.initialized {
                let _ = writeln!(
                    output,
                    "Previous index kept: generation {}, {} keywords",
                    after.generation, after.index_size
                );
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_graphql_index::FieldDescriptor;

    fn result(path: &str, type_name: &str, depth: u32, description: Option<&str>) -> SearchResult {
        let name = path.rsplit('.').next().unwrap_or(path);
        SearchResult {
            field: FieldDescriptor {
                name: name.to_string(),
                type_name: type_name.to_string(),
                type_category: None,
                parent_type: if depth == 0 { "Query" } else { "Player" }.to_string(),
                description: description.map(str::to_string),
                depth,
                path: path.to_string(),
            },
            relevance: 1.0,
        }
    }

    #[test]
    fn test_format_search_results() {
        let results = [
            result("Query.player", "Player", 0, Some("Look up a player")),
            result("Query.player.name", "String", 1, None),
        ];
        let output = format_search_results(&["steam".to_string()], &results);
        let output = output.trim_end();

        insta::assert_snapshot!(output, @r#"
        Found 2 relevant fields:

        Query.player (Player) - depth: 0 - Look up a player
        Query.player.name (String) - depth: 1

        === Query Template ===
        query {
          player {
            # Player - add specific fields
          }
        }

        === Contextual Examples ===
        Get basic player information and statistics:
        query GetPlayer($steamId: Long!) {
          player(steamAccountId: $steamId) {
            steamAccount {
              name
              avatar
              profileUri
            }
            matchCount
            winCount
            imp
            # More fields available - use search-schema to discover
          }
        }
        Variables: {"steamId": "123456789"}
        "#);
    }

    #[test]
    fn test_format_no_results() {
        let output = format_no_results(&["xyz123".to_string()]);
        assert!(output.starts_with("No fields found for keywords: xyz123\n\nCommon search patterns:"));
        assert!(output.contains("- Hero data: hero, character, champion, abilities, talents"));

        let output = format_no_results(&["radiant".to_string()]);
        assert!(output.contains("Try these related keywords instead:\nmatch, game, duration"));
    }
}
