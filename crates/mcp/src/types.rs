//! MCP tool parameter types
//!
//! Field names follow the camelCase convention agents see in the tool
//! schemas.

use crate::examples::ExampleCategory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const fn default_max_results() -> usize {
    10
}

const fn default_max_depth() -> usize {
    2
}

/// Deepest rendering the introspect-type tool offers.
pub const MAX_TYPE_DEPTH: usize = 3;

/// Parameters for the search-schema tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchSchemaParams {
    #[schemars(
        description = "Search keywords - use Dota 2 concepts like: player, match, hero, winrate, steam, performance, tournament, league, items, abilities, statistics"
    )]
    pub keywords: Vec<String>,

    #[schemars(
        description = "Maximum results (default: 10). Increase for broader discovery, decrease for focused results"
    )]
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

/// Parameters for the introspect-type tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectTypeParams {
    #[schemars(
        description = "GraphQL type name from search results (e.g., PlayerType, MatchType, HeroType, LeagueType)"
    )]
    pub type_name: String,

    #[schemars(
        description = "Depth control: 1=shallow (the type itself), 2=moderate (2 levels), 3=deep (3 levels)"
    )]
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl IntrospectTypeParams {
    /// Requested depth limited to `1..=MAX_TYPE_DEPTH`.
    pub fn depth(&self) -> usize {
        self.max_depth.clamp(1, MAX_TYPE_DEPTH)
    }
}

/// Parameters for the get-query-examples tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryExamplesParams {
    #[schemars(
        description = "Category of examples: player analysis, match analysis, hero research, league data, workflow patterns, or all examples"
    )]
    #[serde(default)]
    pub category: ExampleCategory,
}

/// Parameters for the query-graphql tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryGraphqlParams {
    #[schemars(
        description = "GraphQL query - start with templates from search-schema, use variables for dynamic values like: query($steamId: Long!) { player(steamAccountId: $steamId) { ... } }"
    )]
    pub query: String,

    #[schemars(
        description = r#"JSON string with query variables, e.g., '{"steamId": "123456789", "matchId": "7891234567"}'"#
    )]
    #[serde(default)]
    pub variables: Option<String>,
}

/// Parameters for the debug-schema-status tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebugStatusParams {
    #[schemars(description = "Include the configured request header names in the output")]
    #[serde(default)]
    pub include_headers: bool,
}
