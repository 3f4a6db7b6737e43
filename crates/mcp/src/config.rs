//! Server configuration from command-line flags and environment variables.

use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.stratz.com/graphql";

/// Extra request headers, parsed from a JSON object of strings.
pub type Headers = HashMap<String, String>;

#[derive(Debug, Clone, Parser)]
#[command(name = "mcp-graphql")]
#[command(about = "MCP server for schema search and queries against a GraphQL API", long_about = None)]
#[command(version)]
pub struct Config {
    /// Server name reported to MCP clients
    #[arg(long, env = "NAME", default_value = "mcp-graphql")]
    pub name: String,

    /// GraphQL endpoint to introspect and query
    #[arg(long, env = "ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Allow mutation operations in `query-graphql`
    #[arg(long, env = "ALLOW_MUTATIONS")]
    pub allow_mutations: bool,

    /// Request headers as a JSON object, e.g. '{"Authorization": "Bearer ..."}'
    #[arg(long, env = "HEADERS", default_value = "{}", value_parser = parse_headers)]
    pub headers: Headers,

    /// Saved introspection JSON or SDL to index instead of introspecting the endpoint
    #[arg(long, env = "SCHEMA", value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Timeout for every request to the endpoint, in seconds
    #[arg(long, env = "TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Config {
    /// Configuration for `endpoint` with every other setting at its default.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            name: "mcp-graphql".to_string(),
            endpoint: endpoint.into(),
            allow_mutations: false,
            headers: Headers::new(),
            schema: None,
            timeout_secs: 30,
        }
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_headers(raw: &str) -> Result<Headers, String> {
    serde_json::from_str(raw)
        .map_err(|e| format!("HEADERS must be a JSON object of string values: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::for_endpoint(DEFAULT_ENDPOINT);
        assert_eq!(config.name, "mcp-graphql");
        assert!(!config.allow_mutations);
        assert!(config.headers.is_empty());
        assert_eq!(config.schema, None);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_explicit_endpoint() {
        let config =
            Config::try_parse_from(["mcp-graphql", "--endpoint", "http://localhost:4000/graphql"])
                .unwrap();
        assert_eq!(config.endpoint, "http://localhost:4000/graphql");
    }

    #[test]
    fn test_headers_json() {
        let config = Config::try_parse_from([
            "mcp-graphql",
            "--headers",
            r#"{"Authorization": "Bearer abc", "X-Client": "mcp"}"#,
        ])
        .unwrap();
        assert_eq!(config.headers["Authorization"], "Bearer abc");
        assert_eq!(config.headers.len(), 2);
    }

    #[test]
    fn test_headers_must_be_string_object() {
        assert!(Config::try_parse_from(["mcp-graphql", "--headers", "not json"]).is_err());
        assert!(Config::try_parse_from(["mcp-graphql", "--headers", r#"{"X-Retry": 3}"#]).is_err());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "mcp-graphql",
            "--allow-mutations",
            "--schema",
            "schema.json",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert!(config.allow_mutations);
        assert_eq!(config.schema, Some(PathBuf::from("schema.json")));
        assert_eq!(config.timeout_secs, 5);
    }
}
