//! GraphQL introspection for the schema search server.
//!
//! This crate obtains a schema description either by sending the standard
//! introspection query to a remote endpoint or by reading a saved
//! introspection document or SDL file, and normalizes it into a
//! [`SchemaDescriptor`].
//!
//! # Examples
//!
//! ```no_run
//! use mcp_graphql_introspect::fetch_remote_schema;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let headers = [("Authorization", "Bearer my-token")];
//!     let schema = fetch_remote_schema("https://api.example.com/graphql", headers).await?;
//!     println!("{}", schema.to_sdl());
//!     Ok(())
//! }
//! ```
//!
//! ```no_run
//! use mcp_graphql_introspect::load_local_schema;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = load_local_schema(Path::new("schema.json")).await?;
//!     assert!(!schema.is_empty());
//!     Ok(())
//! }
//! ```

mod client;
mod descriptor;
mod error;
mod local;
mod parse;
mod query;
mod sdl;
mod types;

pub use client::{fetch_remote_schema, IntrospectionClient};
pub use descriptor::{
    FieldDefinition, InputValueDefinition, OperationKind, RootTypes, SchemaDescriptor, TypeCategory,
    TypeDefinition, TypeDefinitionKind, TypeRef,
};
pub use error::{IntrospectionError, Result};
pub use local::load_local_schema;
pub use query::INTROSPECTION_QUERY;
pub use types::*;
