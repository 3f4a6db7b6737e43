//! Building a [`SchemaDescriptor`] from SDL source.

use crate::descriptor::{
    FieldDefinition, InputValueDefinition, RootTypes, SchemaDescriptor, TypeDefinition,
    TypeDefinitionKind, TypeRef,
};
use crate::{IntrospectionError, Result};
use apollo_parser::cst::{self, CstNode};
use apollo_parser::Parser;

/// Scalars every schema has, whether or not the document declares them.
const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

impl SchemaDescriptor {
    /// Parses a schema document written in SDL.
    ///
    /// Object, interface, enum, union, scalar and input object definitions
    /// are kept; directive definitions and type extensions are ignored. Root
    /// types come from the `schema { ... }` block when there is one, otherwise
    /// from the conventionally named types that the document defines.
    pub fn from_sdl(source: &str) -> Result<Self> {
        let tree = Parser::new(source).parse();
        if let Some(error) = tree.errors().next() {
            return Err(IntrospectionError::Protocol(format!(
                "SDL syntax error at offset {}: {}",
                error.index(),
                error.message()
            )));
        }

        let mut types = Vec::new();
        let mut schema_roots = None;
        for definition in tree.document().definitions() {
            let type_def = match definition {
                cst::Definition::SchemaDefinition(schema) => {
                    schema_roots = Some(convert_schema_definition(&schema));
                    None
                }
                cst::Definition::ObjectTypeDefinition(obj) => convert_object(&obj),
                cst::Definition::InterfaceTypeDefinition(iface) => convert_interface(&iface),
                cst::Definition::UnionTypeDefinition(union) => convert_union(&union),
                cst::Definition::EnumTypeDefinition(enum_def) => convert_enum(&enum_def),
                cst::Definition::ScalarTypeDefinition(scalar) => convert_scalar(&scalar),
                cst::Definition::InputObjectTypeDefinition(input) => convert_input_object(&input),
                _ => None,
            };
            types.extend(type_def);
        }

        let mut builtins: Vec<TypeDefinition> = BUILTIN_SCALARS
            .iter()
            .filter(|name| !types.iter().any(|t| t.name == **name))
            .map(|name| TypeDefinition::scalar(*name))
            .collect();
        builtins.append(&mut types);
        let types = builtins;

        let roots = schema_roots.unwrap_or_else(|| {
            let defined = |name: &str| {
                types
                    .iter()
                    .any(|t| t.name == name)
                    .then(|| name.to_string())
            };
            RootTypes {
                query: defined("Query"),
                mutation: defined("Mutation"),
                subscription: defined("Subscription"),
            }
        });

        Ok(Self::new(roots, types))
    }
}

fn convert_schema_definition(schema: &cst::SchemaDefinition) -> RootTypes {
    let mut roots = RootTypes::default();
    for root in schema.root_operation_type_definitions() {
        let (Some(op_type), Some(name)) = (
            root.operation_type(),
            root.named_type().and_then(|n| n.name()),
        ) else {
            continue;
        };
        let name = Some(name.text().to_string());
        if op_type.query_token().is_some() {
            roots.query = name;
        } else if op_type.mutation_token().is_some() {
            roots.mutation = name;
        } else {
            roots.subscription = name;
        }
    }
    roots
}

fn convert_object(obj: &cst::ObjectTypeDefinition) -> Option<TypeDefinition> {
    Some(TypeDefinition {
        name: obj.name()?.text().to_string(),
        description: description(obj.description()),
        kind: TypeDefinitionKind::Object {
            fields: obj
                .fields_definition()
                .map(|fields| convert_fields(&fields))
                .unwrap_or_default(),
            interfaces: implemented(obj.implements_interfaces()),
        },
    })
}

fn convert_interface(iface: &cst::InterfaceTypeDefinition) -> Option<TypeDefinition> {
    Some(TypeDefinition {
        name: iface.name()?.text().to_string(),
        description: description(iface.description()),
        kind: TypeDefinitionKind::Interface {
            fields: iface
                .fields_definition()
                .map(|fields| convert_fields(&fields))
                .unwrap_or_default(),
            interfaces: implemented(iface.implements_interfaces()),
        },
    })
}

fn convert_union(union: &cst::UnionTypeDefinition) -> Option<TypeDefinition> {
    let members = union
        .union_member_types()
        .map(|members| {
            members
                .named_types()
                .filter_map(|named| named.name())
                .map(|name| name.text().to_string())
                .collect()
        })
        .unwrap_or_default();
    Some(TypeDefinition {
        name: union.name()?.text().to_string(),
        description: description(union.description()),
        kind: TypeDefinitionKind::Union { members },
    })
}

fn convert_enum(enum_def: &cst::EnumTypeDefinition) -> Option<TypeDefinition> {
    let values = enum_def
        .enum_values_definition()
        .map(|values| {
            values
                .enum_value_definitions()
                .filter_map(|value| value.enum_value()?.name())
                .map(|name| name.text().to_string())
                .collect()
        })
        .unwrap_or_default();
    Some(TypeDefinition {
        name: enum_def.name()?.text().to_string(),
        description: description(enum_def.description()),
        kind: TypeDefinitionKind::Enum { values },
    })
}

fn convert_scalar(scalar: &cst::ScalarTypeDefinition) -> Option<TypeDefinition> {
    Some(TypeDefinition {
        name: scalar.name()?.text().to_string(),
        description: description(scalar.description()),
        kind: TypeDefinitionKind::Scalar,
    })
}

fn convert_input_object(input: &cst::InputObjectTypeDefinition) -> Option<TypeDefinition> {
    let fields = input
        .input_fields_definition()
        .map(|fields| {
            fields
                .input_value_definitions()
                .filter_map(|value| convert_input_value(&value))
                .collect()
        })
        .unwrap_or_default();
    Some(TypeDefinition {
        name: input.name()?.text().to_string(),
        description: description(input.description()),
        kind: TypeDefinitionKind::InputObject { fields },
    })
}

fn convert_fields(fields: &cst::FieldsDefinition) -> Vec<FieldDefinition> {
    fields
        .field_definitions()
        .filter_map(|field| convert_field(&field))
        .collect()
}

fn convert_field(field: &cst::FieldDefinition) -> Option<FieldDefinition> {
    let arguments = field
        .arguments_definition()
        .map(|args| {
            args.input_value_definitions()
                .filter_map(|value| convert_input_value(&value))
                .collect()
        })
        .unwrap_or_default();
    let deprecated = deprecated_directive(field.directives());
    Some(FieldDefinition {
        name: field.name()?.text().to_string(),
        description: description(field.description()),
        arguments,
        ty: convert_type(&field.ty()?)?,
        is_deprecated: deprecated.is_some(),
        deprecation_reason: deprecated.as_ref().and_then(deprecation_reason),
    })
}

fn convert_input_value(value: &cst::InputValueDefinition) -> Option<InputValueDefinition> {
    Some(InputValueDefinition {
        name: value.name()?.text().to_string(),
        description: description(value.description()),
        ty: convert_type(&value.ty()?)?,
        default_value: value
            .default_value()
            .and_then(|default| default.value())
            .map(|v| v.syntax().text().to_string()),
    })
}

fn convert_type(ty: &cst::Type) -> Option<TypeRef> {
    match ty {
        cst::Type::NamedType(named) => Some(TypeRef::named(named.name()?.text().to_string())),
        cst::Type::ListType(list) => Some(convert_type(&list.ty()?)?.list()),
        cst::Type::NonNullType(non_null) => {
            let inner = if let Some(named) = non_null.named_type() {
                TypeRef::named(named.name()?.text().to_string())
            } else {
                convert_type(&non_null.list_type()?.ty()?)?.list()
            };
            Some(inner.non_null())
        }
    }
}

fn description(description: Option<cst::Description>) -> Option<String> {
    description?.string_value().map(String::from)
}

fn implemented(interfaces: Option<cst::ImplementsInterfaces>) -> Vec<String> {
    interfaces
        .map(|interfaces| {
            interfaces
                .named_types()
                .filter_map(|named| named.name())
                .map(|name| name.text().to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn deprecated_directive(directives: Option<cst::Directives>) -> Option<cst::Directive> {
    directives?
        .directives()
        .find(|d| d.name().is_some_and(|n| n.text().as_str() == "deprecated"))
}

fn deprecation_reason(directive: &cst::Directive) -> Option<String> {
    directive
        .arguments()?
        .arguments()
        .filter(|arg| arg.name().is_some_and(|n| n.text().as_str() == "reason"))
        .find_map(|arg| match arg.value()? {
            cst::Value::StringValue(value) => Some(String::from(value)),
            _ => None,
        })
}
