//! HTTP introspection client.
//!
//! Sends the standard introspection query to a GraphQL endpoint with
//! caller-supplied headers and timeouts, and normalizes the answer into a
//! [`SchemaDescriptor`]. Every call performs a fresh request.

use crate::{IntrospectionError, Result, SchemaDescriptor, INTROSPECTION_QUERY};
use std::collections::HashMap;
use std::time::Duration;

/// Default timeout for introspection requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// A configurable client for executing GraphQL introspection queries.
///
/// ```no_run
/// use mcp_graphql_introspect::IntrospectionClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = IntrospectionClient::new()
///     .with_header("Authorization", "Bearer my-token")
///     .fetch_remote_schema("https://api.example.com/graphql")
///     .await?;
/// println!("{} types", schema.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IntrospectionClient {
    headers: HashMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
}

impl Default for IntrospectionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IntrospectionClient {
    /// Creates a client with a 30 second request timeout, a 10 second
    /// connection timeout and no extra headers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Adds a header sent with every introspection request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Maximum time for the whole request (connect + transfer).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Fetches and normalizes the schema served at `endpoint`.
    ///
    /// # Errors
    ///
    /// - [`IntrospectionError::Transport`] when no response was received
    /// - [`IntrospectionError::Http`] on a non-success status
    /// - [`IntrospectionError::Protocol`] when the body is not introspection data
    #[tracing::instrument(skip(self))]
    pub async fn fetch_remote_schema(&self, endpoint: &str) -> Result<SchemaDescriptor> {
        let raw = self.fetch_raw(endpoint).await?;
        let schema = SchemaDescriptor::from_json(raw)?;
        tracing::info!(types = schema.len(), "Introspection successful");
        Ok(schema)
    }

    /// Executes the introspection query and returns the response JSON as is.
    pub async fn fetch_raw(&self, endpoint: &str) -> Result<serde_json::Value> {
        tracing::debug!("Creating HTTP client with timeouts");
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| {
                IntrospectionError::Transport(format!("Failed to create HTTP client: {e}"))
            })?;

        let query_body = serde_json::json!({
            "query": INTROSPECTION_QUERY
        });

        tracing::info!("Sending introspection query");
        let mut request = client
            .post(endpoint)
            .header("Content-Type", "application/json");

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request
            .json(&query_body)
            .send()
            .await
            .map_err(|e| IntrospectionError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(IntrospectionError::Http(status.as_u16(), error_body));
        }

        response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse introspection response");
            IntrospectionError::Protocol(e.to_string())
        })
    }
}

/// One-shot remote fetch with the given request headers.
pub async fn fetch_remote_schema<I, K, V>(endpoint: &str, headers: I) -> Result<SchemaDescriptor>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    IntrospectionClient::new()
        .with_headers(headers)
        .fetch_remote_schema(endpoint)
        .await
}
