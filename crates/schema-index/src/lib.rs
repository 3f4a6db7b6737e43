//! Keyword search over the fields of a GraphQL schema.
//!
//! Every field reachable from a root operation type, down to
//! [`MAX_INDEX_DEPTH`] levels, is recorded once per path and filed under the
//! keywords taken from its name, its type name and its description. Searches
//! rank the matches by relevance; the index can also render bounded-depth
//! type definitions and skeleton queries for the fields it finds.
//!
//! ```
//! use mcp_graphql_index::SchemaIndex;
//! use mcp_graphql_introspect::{FieldDefinition, RootTypes, SchemaDescriptor, TypeDefinition, TypeRef};
//!
//! let schema = SchemaDescriptor::new(
//!     RootTypes::conventional(),
//!     vec![TypeDefinition::object(
//!         "Query",
//!         vec![FieldDefinition::new("heroes", TypeRef::named("String").list())],
//!     )],
//! );
//!
//! let index = SchemaIndex::new();
//! index.index_schema(schema)?;
//! let results = index.search_fields(&["hero"], 10);
//! assert_eq!(results[0].field.path, "Query.heroes");
//! # Ok::<(), mcp_graphql_index::IndexError>(())
//! ```

mod definition;
mod error;
mod field;
mod index;
mod keywords;
mod snapshot;
mod template;

pub use definition::MAX_RENDERED_FIELDS;
pub use error::{IndexError, Result};
pub use field::{FieldDescriptor, SearchResult};
pub use index::{IndexStatus, Rebuild, SchemaIndex};
pub use snapshot::{IndexSnapshot, IndexStats, MAX_INDEX_DEPTH};
pub use template::{query_template, MAX_TEMPLATE_FIELDS};
