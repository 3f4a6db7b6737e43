//! Normalized, transport-independent schema description.
//!
//! [`SchemaDescriptor`] is what the rest of the workspace consumes. It is
//! built once from introspection data and never mutated afterwards.

use crate::types::{
    IntrospectionData, IntrospectionField, IntrospectionInputValue, IntrospectionSchema,
    IntrospectionType, IntrospectionTypeRefFull, TypeKind,
};
use crate::{IntrospectionError, Result};
use std::collections::HashMap;
use std::fmt;

/// One of the three root operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub const ALL: [Self; 3] = [Self::Query, Self::Mutation, Self::Subscription];

    /// The conventional root type name, also used as the first path segment.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field or argument type, with list and non-null wrappers made explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    #[must_use]
    pub fn non_null(self) -> Self {
        Self::NonNull(Box::new(self))
    }

    /// The innermost named type.
    #[must_use]
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }

    fn from_introspection(type_ref: &IntrospectionTypeRefFull) -> Result<Self> {
        match type_ref.kind {
            TypeKind::NonNull | TypeKind::List => {
                let inner = type_ref.of_type.as_deref().ok_or_else(|| {
                    IntrospectionError::Protocol(format!(
                        "{:?} type reference without ofType",
                        type_ref.kind
                    ))
                })?;
                let inner = Box::new(Self::from_introspection(inner)?);
                Ok(if type_ref.kind == TypeKind::List {
                    Self::List(inner)
                } else {
                    Self::NonNull(inner)
                })
            }
            _ => type_ref.name.clone().map(Self::Named).ok_or_else(|| {
                IntrospectionError::Protocol(format!(
                    "{:?} type reference without a name",
                    type_ref.kind
                ))
            }),
        }
    }
}

/// Renders GraphQL notation: `String`, `[String]!`, `[Match!]`.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// Coarse classification of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Scalar,
    Enum,
    Object,
    Interface,
    Union,
    InputObject,
}

impl TypeCategory {
    /// Scalars and enums need no sub-selection.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum)
    }

    /// Objects and interfaces expose fields that can be traversed.
    #[must_use]
    pub const fn has_fields(self) -> bool {
        matches!(self, Self::Object | Self::Interface)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: TypeRef,
    pub deprecation_reason: Option<String>,
    pub is_deprecated: bool,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            ty,
            deprecation_reason: None,
            is_deprecated: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.arguments.push(InputValueDefinition {
            name: name.into(),
            description: None,
            ty,
            default_value: None,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefinitionKind {
    Scalar,
    Enum {
        values: Vec<String>,
    },
    Object {
        fields: Vec<FieldDefinition>,
        interfaces: Vec<String>,
    },
    Interface {
        fields: Vec<FieldDefinition>,
        interfaces: Vec<String>,
    },
    Union {
        members: Vec<String>,
    },
    InputObject {
        fields: Vec<InputValueDefinition>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeDefinitionKind,
}

impl TypeDefinition {
    #[must_use]
    pub fn object(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: TypeDefinitionKind::Object {
                fields,
                interfaces: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn interface(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: TypeDefinitionKind::Interface {
                fields,
                interfaces: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: TypeDefinitionKind::Scalar,
        }
    }

    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            kind: TypeDefinitionKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    #[must_use]
    pub fn union<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            kind: TypeDefinitionKind::Union {
                members: members.into_iter().map(Into::into).collect(),
            },
        }
    }

    #[must_use]
    pub const fn category(&self) -> TypeCategory {
        match self.kind {
            TypeDefinitionKind::Scalar => TypeCategory::Scalar,
            TypeDefinitionKind::Enum { .. } => TypeCategory::Enum,
            TypeDefinitionKind::Object { .. } => TypeCategory::Object,
            TypeDefinitionKind::Interface { .. } => TypeCategory::Interface,
            TypeDefinitionKind::Union { .. } => TypeCategory::Union,
            TypeDefinitionKind::InputObject { .. } => TypeCategory::InputObject,
        }
    }

    /// Output fields in declaration order, for objects and interfaces only.
    #[must_use]
    pub fn fields(&self) -> Option<&[FieldDefinition]> {
        match &self.kind {
            TypeDefinitionKind::Object { fields, .. }
            | TypeDefinitionKind::Interface { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

/// Names of the schema's root operation types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootTypes {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl RootTypes {
    /// Roots named `Query`, `Mutation` and `Subscription`.
    #[must_use]
    pub fn conventional() -> Self {
        Self {
            query: Some("Query".to_string()),
            mutation: Some("Mutation".to_string()),
            subscription: Some("Subscription".to_string()),
        }
    }
}

/// A normalized GraphQL schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaDescriptor {
    roots: RootTypes,
    types: Vec<TypeDefinition>,
    by_name: HashMap<String, usize>,
}

impl SchemaDescriptor {
    /// Builds a descriptor from already-normalized types. A later type with a
    /// duplicate name replaces the earlier one.
    #[must_use]
    pub fn new(roots: RootTypes, types: Vec<TypeDefinition>) -> Self {
        let mut descriptor = Self {
            roots,
            types: Vec::with_capacity(types.len()),
            by_name: HashMap::with_capacity(types.len()),
        };
        for type_def in types {
            if let Some(&position) = descriptor.by_name.get(&type_def.name) {
                descriptor.types[position] = type_def;
            } else {
                descriptor
                    .by_name
                    .insert(type_def.name.clone(), descriptor.types.len());
                descriptor.types.push(type_def);
            }
        }
        descriptor
    }

    /// Normalizes the `__schema` object of an introspection response.
    pub fn from_introspection(schema: IntrospectionSchema) -> Result<Self> {
        let roots = RootTypes {
            query: schema.query_type.map(|t| t.name),
            mutation: schema.mutation_type.map(|t| t.name),
            subscription: schema.subscription_type.map(|t| t.name),
        };

        let types = schema
            .types
            .into_iter()
            .map(convert_type)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(roots, types))
    }

    /// Normalizes a JSON introspection document.
    ///
    /// Accepts both the full response (`{"data": {"__schema": ...}}`) and the
    /// bare data object (`{"__schema": ...}`).
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let mut value = value;
        if let Some(errors) = value.get("errors").filter(|e| !e.is_null()) {
            if value.get("data").is_none_or(serde_json::Value::is_null) {
                return Err(IntrospectionError::Protocol(format!(
                    "response carries errors and no data: {errors}"
                )));
            }
        }
        if let Some(data) = value.get_mut("data") {
            value = data.take();
        }
        if value.get("__schema").is_none() {
            return Err(IntrospectionError::Protocol(
                "missing __schema object".to_string(),
            ));
        }

        let data: IntrospectionData = serde_json::from_value(value)
            .map_err(|e| IntrospectionError::Protocol(e.to_string()))?;
        Self::from_introspection(data.schema)
    }

    /// The type name registered for a root operation, if the schema has one.
    #[must_use]
    pub fn root_type(&self, operation: OperationKind) -> Option<&str> {
        match operation {
            OperationKind::Query => self.roots.query.as_deref(),
            OperationKind::Mutation => self.roots.mutation.as_deref(),
            OperationKind::Subscription => self.roots.subscription.as_deref(),
        }
    }

    #[must_use]
    pub const fn roots(&self) -> &RootTypes {
        &self.roots
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.by_name.get(name).map(|&i| &self.types[i])
    }

    /// Types in the order they were supplied.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn convert_field(field: IntrospectionField) -> Result<FieldDefinition> {
    Ok(FieldDefinition {
        ty: TypeRef::from_introspection(&field.type_ref)?,
        arguments: field
            .args
            .into_iter()
            .map(convert_input_value)
            .collect::<Result<_>>()?,
        name: field.name,
        description: field.description,
        deprecation_reason: field.deprecation_reason,
        is_deprecated: field.is_deprecated,
    })
}

fn convert_input_value(value: IntrospectionInputValue) -> Result<InputValueDefinition> {
    Ok(InputValueDefinition {
        ty: TypeRef::from_introspection(&value.type_ref)?,
        name: value.name,
        description: value.description,
        default_value: value.default_value,
    })
}

fn convert_type(type_def: IntrospectionType) -> Result<TypeDefinition> {
    let (name, description, kind) = match type_def {
        IntrospectionType::Scalar(t) => (t.name, t.description, TypeDefinitionKind::Scalar),
        IntrospectionType::Object(t) => (
            t.name,
            t.description,
            TypeDefinitionKind::Object {
                fields: t.fields.into_iter().map(convert_field).collect::<Result<_>>()?,
                interfaces: t.interfaces.into_iter().map(|i| i.name).collect(),
            },
        ),
        IntrospectionType::Interface(t) => (
            t.name,
            t.description,
            TypeDefinitionKind::Interface {
                fields: t.fields.into_iter().map(convert_field).collect::<Result<_>>()?,
                interfaces: t.interfaces.into_iter().map(|i| i.name).collect(),
            },
        ),
        IntrospectionType::Union(t) => (
            t.name,
            t.description,
            TypeDefinitionKind::Union {
                members: t.possible_types.into_iter().map(|m| m.name).collect(),
            },
        ),
        IntrospectionType::Enum(t) => (
            t.name,
            t.description,
            TypeDefinitionKind::Enum {
                values: t.enum_values.into_iter().map(|v| v.name).collect(),
            },
        ),
        IntrospectionType::InputObject(t) => (
            t.name,
            t.description,
            TypeDefinitionKind::InputObject {
                fields: t
                    .input_fields
                    .into_iter()
                    .map(convert_input_value)
                    .collect::<Result<_>>()?,
            },
        ),
    };

    Ok(TypeDefinition {
        name,
        description,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(kind: &str, name: &str) -> serde_json::Value {
        json!({ "kind": kind, "name": name, "ofType": null })
    }

    fn sample_data() -> serde_json::Value {
        json!({
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "subscriptionType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "description": null,
                        "fields": [{
                            "name": "player",
                            "description": "Look up a player",
                            "args": [{ "name": "id", "description": null, "type": named("SCALAR", "Long"), "defaultValue": null }],
                            "type": named("OBJECT", "Player"),
                            "isDeprecated": false,
                            "deprecationReason": null
                        }],
                        "interfaces": []
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Player",
                        "description": null,
                        "fields": [{
                            "name": "matches",
                            "description": null,
                            "args": [],
                            "type": { "kind": "LIST", "name": null, "ofType": named("OBJECT", "Match") },
                            "isDeprecated": false,
                            "deprecationReason": null
                        }],
                        "interfaces": []
                    },
                    { "kind": "SCALAR", "name": "Long", "description": null }
                ]
            }
        })
    }

    #[test]
    fn test_type_ref_display() {
        let ty = TypeRef::named("String").list().non_null();
        assert_eq!(ty.to_string(), "[String]!");
        assert_eq!(ty.named_type(), "String");

        let ty = TypeRef::named("Match").non_null().list();
        assert_eq!(ty.to_string(), "[Match!]");
    }

    #[test]
    fn test_from_json_accepts_bare_data() {
        let schema = SchemaDescriptor::from_json(sample_data()).unwrap();
        assert_eq!(schema.root_type(OperationKind::Query), Some("Query"));
        assert_eq!(schema.root_type(OperationKind::Mutation), None);
        assert_eq!(schema.len(), 3);

        let player = schema.get("Player").unwrap();
        assert_eq!(player.category(), TypeCategory::Object);
        let fields = player.fields().unwrap();
        assert_eq!(fields[0].ty.to_string(), "[Match]");
    }

    #[test]
    fn test_from_json_accepts_full_response() {
        let schema = SchemaDescriptor::from_json(json!({ "data": sample_data() })).unwrap();
        let query = schema.get("Query").unwrap();
        let player = &query.fields().unwrap()[0];
        assert_eq!(player.arguments[0].ty.to_string(), "Long");
        assert_eq!(player.description.as_deref(), Some("Look up a player"));
    }

    #[test]
    fn test_from_json_rejects_errors_without_data() {
        let err = SchemaDescriptor::from_json(json!({
            "errors": [{ "message": "introspection disabled" }]
        }))
        .unwrap_err();
        assert!(matches!(err, IntrospectionError::Protocol(_)));
        assert!(err.to_string().contains("introspection disabled"));
    }

    #[test]
    fn test_from_json_rejects_missing_schema() {
        let err = SchemaDescriptor::from_json(json!({ "data": { "other": 1 } })).unwrap_err();
        assert!(matches!(err, IntrospectionError::Protocol(_)));
    }

    #[test]
    fn test_wrapper_without_of_type_is_protocol_error() {
        let mut data = sample_data();
        data["__schema"]["types"][1]["fields"][0]["type"] =
            json!({ "kind": "LIST", "name": null, "ofType": null });
        let err = SchemaDescriptor::from_json(data).unwrap_err();
        assert!(matches!(err, IntrospectionError::Protocol(_)));
    }

    #[test]
    fn test_duplicate_type_names_keep_last() {
        let schema = SchemaDescriptor::new(
            RootTypes::conventional(),
            vec![TypeDefinition::scalar("Long"), TypeDefinition::enumeration("Long", ["A"])],
        );
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get("Long").unwrap().category(), TypeCategory::Enum);
    }
}
