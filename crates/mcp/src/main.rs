use anyhow::Result;
use clap::Parser;
use mcp_graphql::{Config, GraphQLMcpServer};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::parse();
    GraphQLMcpServer::new(config)?.run_stdio().await
}

/// Logs go to stderr; stdout carries the MCP protocol.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
