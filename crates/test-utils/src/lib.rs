//! Shared test infrastructure for the GraphQL MCP server crates.
//!
//! - [`fixtures`] - schema descriptors and introspection payloads

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]

pub mod fixtures;
