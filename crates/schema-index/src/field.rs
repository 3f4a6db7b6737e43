use mcp_graphql_introspect::TypeCategory;
use serde::Serialize;

/// One occurrence of a field, reached through a specific path from a root
/// operation type.
///
/// The same schema field can appear several times under different paths;
/// `path` is the unique key, `name` is not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    /// Named type the field resolves to, list and non-null wrappers removed.
    pub type_name: String,
    /// Category of `type_name`, `None` when the schema does not define it.
    #[serde(skip)]
    pub type_category: Option<TypeCategory>,
    /// Owning type. Root fields use the operation label (`Query`, ...).
    pub parent_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Traversal steps from the root operation type; root fields are 0.
    pub depth: u32,
    /// Dotted route, e.g. `Query.player.matches`.
    pub path: String,
}

/// A field paired with the relevance it scored for one search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub field: FieldDescriptor,
    #[serde(rename = "relevanceScore")]
    pub relevance: f64,
}
