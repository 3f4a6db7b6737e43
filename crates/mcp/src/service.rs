//! Core MCP service implementation
//!
//! `McpService` owns the schema index and the connection settings for the
//! GraphQL endpoint, and provides the business logic behind every tool.
//! The index is filled lazily: the first operation that needs it triggers
//! introspection, and a failed attempt is retried on the next use.

use crate::config::Config;
use anyhow::{Context, Result};
use apollo_parser::{cst, Parser};
use mcp_graphql_index::{IndexError, IndexStats, IndexStatus, SchemaIndex, SearchResult};
use mcp_graphql_introspect::{
    load_local_schema, IntrospectionClient, OperationKind, SchemaDescriptor,
};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Query sent to check that the endpoint answers at all.
const PROBE_QUERY: &str = "{ __typename }";

/// Why `query-graphql` did not return data.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid GraphQL query: {0}")]
    Syntax(String),

    #[error("Mutations are not allowed unless you enable them in the configuration. Please use a query operation instead.")]
    MutationsDisabled,

    #[error("Variables must be a JSON object: {0}")]
    InvalidVariables(String),

    #[error("Failed to execute GraphQL query: {0}")]
    Transport(String),

    #[error("GraphQL request failed: HTTP {status}\n{body}")]
    Http { status: u16, body: String },

    #[error("The GraphQL response has errors, please fix the query: {0}")]
    GraphQL(String),
}

/// Answer to the connectivity probe.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    /// Response body, kept only for non-success statuses.
    pub error_body: Option<String>,
}

/// Everything `debug-schema-status` reports.
#[derive(Debug)]
pub struct DebugReport {
    pub endpoint: String,
    pub schema_file: Option<String>,
    pub status_before: IndexStatus,
    /// Configured header names; values are never reported.
    pub header_names: Option<Vec<String>>,
    pub probe: std::result::Result<ProbeResponse, String>,
    pub reinitialize: std::result::Result<IndexStats, String>,
    pub status_after: IndexStatus,
}

/// The service behind the MCP tools.
pub struct McpService {
    config: Config,
    index: Arc<SchemaIndex>,
    introspection: IntrospectionClient,
    http: reqwest::Client,
    /// Serializes lazy initialization so concurrent first calls introspect once.
    init: Mutex<()>,
}

impl McpService {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_index(config, Arc::new(SchemaIndex::new()))
    }

    /// Creates a service over an index that may be shared with other owners.
    pub fn with_index(config: Config, index: Arc<SchemaIndex>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;
        let introspection = IntrospectionClient::new()
            .with_headers(config.headers.clone())
            .with_timeout(config.timeout());

        Ok(Self {
            config,
            index,
            introspection,
            http,
            init: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &Arc<SchemaIndex> {
        &self.index
    }

    /// Loads and indexes the schema unless the index is already ready.
    pub async fn initialize(&self) -> Result<()> {
        if self.index.is_ready() {
            return Ok(());
        }
        let _guard = self.init.lock().await;
        if self.index.is_ready() {
            return Ok(());
        }
        self.reinitialize().await.map(|_| ())
    }

    /// Loads the schema again and rebuilds the index, replacing the current
    /// one on success.
    #[tracing::instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    pub async fn reinitialize(&self) -> Result<IndexStats> {
        let rebuild = self.index.begin_rebuild();
        let schema = self.load_schema().await?;
        let stats = rebuild.index(schema).context("Schema indexing failed")?;
        tracing::info!(
            generation = stats.generation,
            fields = stats.fields,
            keywords = stats.keywords,
            published = stats.published,
            "Schema indexed successfully"
        );
        Ok(stats)
    }

    async fn load_schema(&self) -> Result<SchemaDescriptor> {
        if let Some(path) = &self.config.schema {
            load_local_schema(path)
                .await
                .with_context(|| format!("Failed to load schema from {}", path.display()))
        } else {
            self.introspection
                .fetch_remote_schema(&self.config.endpoint)
                .await
                .with_context(|| format!("Failed to introspect {}", self.config.endpoint))
        }
    }

    pub async fn search(&self, keywords: &[String], max_results: usize) -> Result<Vec<SearchResult>> {
        self.initialize().await?;
        Ok(self.index.search_fields(keywords, max_results))
    }

    pub async fn type_definition(&self, type_name: &str, max_depth: usize) -> Result<String> {
        self.initialize().await?;
        Ok(self.index.type_definition(type_name, max_depth)?)
    }

    /// SDL of the indexed schema.
    pub async fn schema_sdl(&self) -> Result<String> {
        self.initialize().await?;
        let snapshot = self.index.snapshot().ok_or(IndexError::NotInitialized)?;
        Ok(snapshot.schema().to_sdl())
    }

    fn post(&self, body: &Value) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json");
        for (name, value) in &self.config.headers {
            request = request.header(name, value);
        }
        request.json(body)
    }

    /// Validates `query` and forwards it to the endpoint.
    ///
    /// Documents with syntax errors are rejected before any request is
    /// made, and so are mutations unless they are enabled. A response with
    /// a non-empty `errors` array is reported as an error.
    #[tracing::instrument(skip_all)]
    pub async fn execute_query(
        &self,
        query: &str,
        variables: Option<&str>,
    ) -> std::result::Result<Value, QueryError> {
        let operations = operation_kinds(query)?;
        if operations.contains(&OperationKind::Mutation) && !self.config.allow_mutations {
            tracing::warn!("Rejected mutation");
            return Err(QueryError::MutationsDisabled);
        }

        let variables = variables
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_variables)
            .transpose()?;

        let response = self
            .post(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "GraphQL request failed");
            return Err(QueryError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let has_errors = data
            .get("errors")
            .and_then(Value::as_array)
            .is_some_and(|errors| !errors.is_empty());
        if has_errors {
            return Err(QueryError::GraphQL(pretty(&data)));
        }
        Ok(data)
    }

    /// Sends `{ __typename }` to the endpoint.
    async fn probe(&self) -> std::result::Result<ProbeResponse, String> {
        let response = self
            .post(&json!({ "query": PROBE_QUERY }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let error_body = if status.is_success() {
            None
        } else {
            Some(response.text().await.unwrap_or_default())
        };
        Ok(ProbeResponse {
            status: status.as_u16(),
            error_body,
        })
    }

    /// Collects index status, probes the endpoint and forces a rebuild.
    #[tracing::instrument(skip(self))]
    pub async fn debug_report(&self, include_headers: bool) -> DebugReport {
        let status_before = self.index.status();
        let header_names = include_headers.then(|| {
            let mut names: Vec<String> = self.config.headers.keys().cloned().collect();
            names.sort();
            names
        });
        let probe = self.probe().await;
        let reinitialize = self.reinitialize().await.map_err(|e| format!("{e:#}"));

        DebugReport {
            endpoint: self.config.endpoint.clone(),
            schema_file: self.config.schema.as_ref().map(|p| p.display().to_string()),
            status_before,
            header_names,
            probe,
            reinitialize,
            status_after: self.index.status(),
        }
    }
}

/// Kinds of all operations in `document`, in order. The shorthand form
/// `{ ... }` counts as a query.
pub fn operation_kinds(document: &str) -> std::result::Result<Vec<OperationKind>, QueryError> {
    let tree = Parser::new(document).parse();
    if let Some(error) = tree.errors().next() {
        return Err(QueryError::Syntax(format!(
            "{} at offset {}",
            error.message(),
            error.index()
        )));
    }

    Ok(tree
        .document()
        .definitions()
        .filter_map(|definition| match definition {
            cst::Definition::OperationDefinition(op) => Some(
                op.operation_type()
                    .map_or(OperationKind::Query, |op_type| operation_kind(&op_type)),
            ),
            _ => None,
        })
        .collect())
}

fn operation_kind(op_type: &cst::OperationType) -> OperationKind {
    if op_type.query_token().is_some() {
        OperationKind::Query
    } else if op_type.mutation_token().is_some() {
        OperationKind::Mutation
    } else {
        OperationKind::Subscription
    }
}

fn parse_variables(raw: &str) -> std::result::Result<Value, QueryError> {
    match serde_json::from_str(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(other) => Err(QueryError::InvalidVariables(format!("got {other}"))),
        Err(e) => Err(QueryError::InvalidVariables(e.to_string())),
    }
}

pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_kinds() {
        assert_eq!(
            operation_kinds("{ player { name } }").unwrap(),
            vec![OperationKind::Query]
        );
        assert_eq!(
            operation_kinds(
                "query A { a } mutation B { b } subscription C { c } fragment F on T { f }"
            )
            .unwrap(),
            vec![
                OperationKind::Query,
                OperationKind::Mutation,
                OperationKind::Subscription
            ]
        );
    }

    #[test]
    fn test_syntax_error() {
        let err = operation_kinds("query { player { ").unwrap_err();
        assert!(matches!(err, QueryError::Syntax(_)));
        assert!(err.to_string().starts_with("Invalid GraphQL query: "));
    }

    #[test]
    fn test_parse_variables() {
        assert_eq!(
            parse_variables(r#"{"steamId": 1}"#).unwrap(),
            json!({ "steamId": 1 })
        );
        assert!(matches!(
            parse_variables("[1, 2]"),
            Err(QueryError::InvalidVariables(_))
        ));
        assert!(matches!(
            parse_variables("{nope"),
            Err(QueryError::InvalidVariables(_))
        ));
    }
}
