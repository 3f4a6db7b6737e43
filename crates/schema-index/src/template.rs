//! Query skeletons built from search results.

use crate::FieldDescriptor;
use mcp_graphql_introspect::OperationKind;
use std::fmt::Write;

/// At most this many root query fields are placed in a template.
pub const MAX_TEMPLATE_FIELDS: usize = 5;

const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

/// Builds a skeleton `query { ... }` from the root `Query` fields among
/// `fields`.
///
/// Leaf fields are emitted bare. Fields of composite type get an empty
/// selection with a comment naming the type, since the query is not valid
/// until something is selected there.
///
/// ```
/// use mcp_graphql_index::{query_template, FieldDescriptor};
///
/// let field = FieldDescriptor {
///     name: "status".to_string(),
///     type_name: "String".to_string(),
///     type_category: None,
///     parent_type: "Query".to_string(),
///     description: None,
///     depth: 0,
///     path: "Query.status".to_string(),
/// };
/// assert_eq!(query_template(&[field]), "query {\n  status\n}");
/// ```
#[must_use]
pub fn query_template(fields: &[FieldDescriptor]) -> String {
    let root_fields: Vec<&FieldDescriptor> = fields
        .iter()
        .filter(|f| f.depth == 0 && f.parent_type == OperationKind::Query.label())
        .take(MAX_TEMPLATE_FIELDS)
        .collect();

    if root_fields.is_empty() {
        return "query {\n  # no root Query fields among the given results\n}".to_string();
    }

    let mut template = String::from("query {\n");
    for field in root_fields {
        if is_leaf(field) {
            let _ = writeln!(template, "  {}", field.name);
        } else {
            let _ = writeln!(
                template,
                "  {} {{\n    # {} - add specific fields\n  }}",
                field.name, field.type_name
            );
        }
    }
    template.push('}');
    template
}

fn is_leaf(field: &FieldDescriptor) -> bool {
    field.type_category.map_or_else(
        || BUILTIN_SCALARS.contains(&field.type_name.as_str()),
        mcp_graphql_introspect::TypeCategory::is_leaf,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_graphql_introspect::TypeCategory;

    fn field(name: &str, type_name: &str, category: Option<TypeCategory>, depth: u32) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            type_name: type_name.to_string(),
            type_category: category,
            parent_type: if depth == 0 { "Query" } else { "Player" }.to_string(),
            description: None,
            depth,
            path: format!("Query.{name}"),
        }
    }

    #[test]
    fn test_composite_fields_get_placeholder_selection() {
        let fields = [
            field("player", "Player", Some(TypeCategory::Object), 0),
            field("name", "String", Some(TypeCategory::Scalar), 1),
            field("lane", "Lane", Some(TypeCategory::Enum), 0),
        ];
        assert_eq!(
            query_template(&fields),
            "query {\n  player {\n    # Player - add specific fields\n  }\n  lane\n}"
        );
    }

    #[test]
    fn test_unknown_category_falls_back_to_builtin_scalars() {
        let fields = [field("id", "ID", None, 0), field("hero", "Hero", None, 0)];
        assert_eq!(
            query_template(&fields),
            "query {\n  id\n  hero {\n    # Hero - add specific fields\n  }\n}"
        );
    }

    #[test]
    fn test_at_most_five_fields() {
        let fields: Vec<_> = (0..8)
            .map(|i| field(&format!("f{i}"), "Int", Some(TypeCategory::Scalar), 0))
            .collect();
        let template = query_template(&fields);
        assert!(template.contains("  f4\n"));
        assert!(!template.contains("f5"));
    }

    #[test]
    fn test_no_root_fields() {
        let fields = [field("name", "String", None, 1)];
        assert!(query_template(&fields).starts_with("query {\n  #"));
    }
}
