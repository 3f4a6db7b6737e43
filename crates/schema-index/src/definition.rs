//! Bounded-depth, SDL-like rendering of a single type.

use mcp_graphql_introspect::{
    FieldDefinition, SchemaDescriptor, TypeCategory, TypeDefinition, TypeDefinitionKind,
};
use std::collections::HashSet;
use std::fmt::Write;

/// At most this many fields (or enum values) are listed per type.
pub const MAX_RENDERED_FIELDS: usize = 10;

/// Renders `root` followed by the object and interface types its fields
/// reach, one block per type, while the nesting level stays below
/// `max_depth`. A type already rendered in this call appears by name only.
///
/// With `max_depth == 0` only the type name is returned.
pub(crate) fn render_type_definition(
    schema: &SchemaDescriptor,
    root: &TypeDefinition,
    max_depth: usize,
) -> String {
    if max_depth == 0 {
        return root.name.clone();
    }

    let mut visited = HashSet::new();
    let mut blocks = Vec::new();
    render_block(schema, root, 0, max_depth, &mut visited, &mut blocks);
    blocks.join("\n\n")
}

fn render_block<'a>(
    schema: &'a SchemaDescriptor,
    type_def: &'a TypeDefinition,
    level: usize,
    max_depth: usize,
    visited: &mut HashSet<&'a str>,
    blocks: &mut Vec<String>,
) {
    visited.insert(type_def.name.as_str());

    let mut nested: Vec<&TypeDefinition> = Vec::new();
    let block = match &type_def.kind {
        TypeDefinitionKind::Object { fields, .. } | TypeDefinitionKind::Interface { fields, .. } => {
            let keyword = if type_def.category() == TypeCategory::Object {
                "type"
            } else {
                "interface"
            };
            fields_block(keyword, type_def, fields, |field| {
                if level + 1 < max_depth {
                    queue_nested(schema, field, visited, &mut nested);
                }
            })
        }
        TypeDefinitionKind::Scalar => format!("scalar {}", type_def.name),
        TypeDefinitionKind::Union { members } => {
            format!("union {} = {}", type_def.name, members.join(" | "))
        }
        TypeDefinitionKind::Enum { values } => {
            let mut block = format!("enum {} {{\n", type_def.name);
            for value in values.iter().take(MAX_RENDERED_FIELDS) {
                let _ = writeln!(block, "  {value}");
            }
            block.push('}');
            block
        }
        TypeDefinitionKind::InputObject { fields } => {
            let mut block = format!("input {} {{\n", type_def.name);
            for field in fields.iter().take(MAX_RENDERED_FIELDS) {
                let _ = writeln!(block, "  {}: {}", field.name, field.ty);
            }
            block.push('}');
            block
        }
    };
    blocks.push(block);

    for child in nested {
        if !visited.contains(child.name.as_str()) {
            render_block(schema, child, level + 1, max_depth, visited, blocks);
        }
    }
}

fn fields_block(
    keyword: &str,
    type_def: &TypeDefinition,
    fields: &[FieldDefinition],
    mut on_field: impl FnMut(&FieldDefinition),
) -> String {
    let mut block = format!("{keyword} {} {{\n", type_def.name);
    for field in fields.iter().take(MAX_RENDERED_FIELDS) {
        block.push_str("  ");
        block.push_str(&field.name);
        if !field.arguments.is_empty() {
            let args: Vec<String> = field
                .arguments
                .iter()
                .map(|arg| format!("{}: {}", arg.name, arg.ty))
                .collect();
            let _ = write!(block, "({})", args.join(", "));
        }
        let _ = writeln!(block, ": {}", field.ty);
        on_field(field);
    }
    block.push('}');
    block
}

fn queue_nested<'a>(
    schema: &'a SchemaDescriptor,
    field: &FieldDefinition,
    visited: &HashSet<&'a str>,
    nested: &mut Vec<&'a TypeDefinition>,
) {
    let Some(target) = schema.get(field.ty.named_type()) else {
        return;
    };
    if target.category().has_fields()
        && !visited.contains(target.name.as_str())
        && !nested.iter().any(|t| t.name == target.name)
    {
        nested.push(target);
    }
}
