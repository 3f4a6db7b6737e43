//! SDL rendering of a [`SchemaDescriptor`].

use crate::descriptor::{
    FieldDefinition, InputValueDefinition, SchemaDescriptor, TypeDefinition, TypeDefinitionKind,
};
use std::fmt::{self, Write};

/// Built-in GraphQL scalar types that are never printed.
const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

impl SchemaDescriptor {
    /// Renders the schema as SDL.
    ///
    /// Introspection types (`__*`) and built-in scalars are omitted. A
    /// `schema { ... }` block is only emitted when a root type does not use
    /// its conventional name.
    #[must_use]
    #[tracing::instrument(skip(self), fields(types = self.len()))]
    pub fn to_sdl(&self) -> String {
        let mut sdl = String::new();
        // Writing into a String cannot fail.
        let _ = write_schema(&mut sdl, self);
        tracing::debug!(sdl_length = sdl.len(), "SDL generation complete");
        sdl.trim_end().to_string()
    }
}

fn write_schema(sdl: &mut String, schema: &SchemaDescriptor) -> fmt::Result {
    let roots = schema.roots();
    let needs_schema_def = roots.query.as_deref().is_some_and(|t| t != "Query")
        || roots.mutation.as_deref().is_some_and(|t| t != "Mutation")
        || roots
            .subscription
            .as_deref()
            .is_some_and(|t| t != "Subscription");

    if needs_schema_def {
        sdl.push_str("schema {\n");
        if let Some(query) = &roots.query {
            writeln!(sdl, "  query: {query}")?;
        }
        if let Some(mutation) = &roots.mutation {
            writeln!(sdl, "  mutation: {mutation}")?;
        }
        if let Some(subscription) = &roots.subscription {
            writeln!(sdl, "  subscription: {subscription}")?;
        }
        sdl.push_str("}\n\n");
    }

    for type_def in schema.types() {
        if type_def.name.starts_with("__") || BUILTIN_SCALARS.contains(&type_def.name.as_str()) {
            continue;
        }
        write_type(sdl, type_def)?;
        sdl.push_str("\n\n");
    }
    Ok(())
}

fn write_type(sdl: &mut String, type_def: &TypeDefinition) -> fmt::Result {
    write_description(sdl, type_def.description.as_deref(), 0)?;
    match &type_def.kind {
        TypeDefinitionKind::Scalar => write!(sdl, "scalar {}", type_def.name),
        TypeDefinitionKind::Object { fields, interfaces } => {
            write!(sdl, "type {}", type_def.name)?;
            write_fields_block(sdl, fields, interfaces)
        }
        TypeDefinitionKind::Interface { fields, interfaces } => {
            write!(sdl, "interface {}", type_def.name)?;
            write_fields_block(sdl, fields, interfaces)
        }
        TypeDefinitionKind::Union { members } => {
            write!(sdl, "union {} = {}", type_def.name, members.join(" | "))
        }
        TypeDefinitionKind::Enum { values } => {
            writeln!(sdl, "enum {} {{", type_def.name)?;
            for value in values {
                writeln!(sdl, "  {value}")?;
            }
            sdl.push('}');
            Ok(())
        }
        TypeDefinitionKind::InputObject { fields } => {
            writeln!(sdl, "input {} {{", type_def.name)?;
            for field in fields {
                write_description(sdl, field.description.as_deref(), 1)?;
                sdl.push_str("  ");
                write_input_value(sdl, field)?;
                sdl.push('\n');
            }
            sdl.push('}');
            Ok(())
        }
    }
}

fn write_fields_block(
    sdl: &mut String,
    fields: &[FieldDefinition],
    interfaces: &[String],
) -> fmt::Result {
    if !interfaces.is_empty() {
        write!(sdl, " implements {}", interfaces.join(" & "))?;
    }
    sdl.push_str(" {\n");
    for field in fields {
        write_field(sdl, field)?;
    }
    sdl.push('}');
    Ok(())
}

fn write_field(sdl: &mut String, field: &FieldDefinition) -> fmt::Result {
    write_description(sdl, field.description.as_deref(), 1)?;
    write!(sdl, "  {}", field.name)?;

    if !field.arguments.is_empty() {
        sdl.push('(');
        for (i, arg) in field.arguments.iter().enumerate() {
            if i > 0 {
                sdl.push_str(", ");
            }
            write_input_value(sdl, arg)?;
        }
        sdl.push(')');
    }

    write!(sdl, ": {}", field.ty)?;

    if field.is_deprecated {
        if let Some(reason) = &field.deprecation_reason {
            write!(sdl, " @deprecated(reason: \"{}\")", escape_string(reason))?;
        } else {
            sdl.push_str(" @deprecated");
        }
    }

    sdl.push('\n');
    Ok(())
}

fn write_input_value(sdl: &mut String, value: &InputValueDefinition) -> fmt::Result {
    write!(sdl, "{}: {}", value.name, value.ty)?;
    if let Some(default) = &value.default_value {
        write!(sdl, " = {default}")?;
    }
    Ok(())
}

fn write_description(sdl: &mut String, description: Option<&str>, indent: usize) -> fmt::Result {
    if let Some(desc) = description {
        let indent_str = "  ".repeat(indent);
        if desc.contains('\n') {
            writeln!(sdl, "{indent_str}\"\"\"\n{desc}\n{indent_str}\"\"\"")?;
        } else {
            writeln!(sdl, "{indent_str}\"{}\"", escape_string(desc))?;
        }
    }
    Ok(())
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
