//! Shared schema fixtures.
//!
//! Use these when the test only needs a schema with certain characteristics
//! (nesting, cycles, depth). When the exact shape of the schema is what the
//! test is about, build it inline so the test stays self-documenting.

use mcp_graphql_introspect::{
    FieldDefinition, RootTypes, SchemaDescriptor, TypeDefinition, TypeRef,
};
use serde_json::{json, Value};

fn scalars() -> Vec<TypeDefinition> {
    ["Long", "String", "Int", "ID", "Boolean"]
        .into_iter()
        .map(TypeDefinition::scalar)
        .collect()
}

/// `Query.player(id: Long): Player`, `Player { name, matches: [Match] }`,
/// `Match { id, durationSeconds }`.
pub fn player_schema() -> SchemaDescriptor {
    let mut types = vec![
        TypeDefinition::object(
            "Query",
            vec![FieldDefinition::new("player", TypeRef::named("Player"))
                .with_description("Look up a player by Steam account id")
                .with_argument("id", TypeRef::named("Long"))],
        ),
        TypeDefinition::object(
            "Player",
            vec![
                FieldDefinition::new("name", TypeRef::named("String")),
                FieldDefinition::new("matches", TypeRef::named("Match").list())
                    .with_description("Recent matches played"),
            ],
        ),
        TypeDefinition::object(
            "Match",
            vec![
                FieldDefinition::new("id", TypeRef::named("Long")),
                FieldDefinition::new("durationSeconds", TypeRef::named("Int"))
                    .with_description("Length of the match in seconds"),
            ],
        ),
    ];
    types.extend(scalars());
    SchemaDescriptor::new(RootTypes::conventional(), types)
}

/// Two root fields where one name contains the other: `player` and
/// `playerStats`.
pub fn player_and_stats_schema() -> SchemaDescriptor {
    let mut types = vec![
        TypeDefinition::object(
            "Query",
            vec![
                FieldDefinition::new("playerStats", TypeRef::named("PlayerStats")),
                FieldDefinition::new("player", TypeRef::named("Player")),
            ],
        ),
        TypeDefinition::object(
            "Player",
            vec![FieldDefinition::new("name", TypeRef::named("String"))],
        ),
        TypeDefinition::object(
            "PlayerStats",
            vec![FieldDefinition::new("winCount", TypeRef::named("Int").non_null())],
        ),
    ];
    types.extend(scalars());
    SchemaDescriptor::new(RootTypes::conventional(), types)
}

/// `Query.node: Node` where `Node.next` is a `Node` again.
pub fn self_referential_schema() -> SchemaDescriptor {
    let mut types = vec![
        TypeDefinition::object(
            "Query",
            vec![FieldDefinition::new("node", TypeRef::named("Node"))],
        ),
        TypeDefinition::object(
            "Node",
            vec![
                FieldDefinition::new("label", TypeRef::named("String")),
                FieldDefinition::new("next", TypeRef::named("Node")),
            ],
        ),
    ];
    types.extend(scalars());
    SchemaDescriptor::new(RootTypes::conventional(), types)
}

/// `Query { a: Shared, b: Shared }` with `Shared { leaf: String }`: one type
/// reached through two sibling fields.
pub fn shared_type_schema() -> SchemaDescriptor {
    let mut types = vec![
        TypeDefinition::object(
            "Query",
            vec![
                FieldDefinition::new("a", TypeRef::named("Shared")),
                FieldDefinition::new("b", TypeRef::named("Shared")),
            ],
        ),
        TypeDefinition::object(
            "Shared",
            vec![FieldDefinition::new("leaf", TypeRef::named("String"))],
        ),
    ];
    types.extend(scalars());
    SchemaDescriptor::new(RootTypes::conventional(), types)
}

/// A chain `Query.level0 -> Level1.level1 -> ... -> Level{levels}` where each
/// `LevelN` also carries a `tagN: String` field.
pub fn deep_chain_schema(levels: usize) -> SchemaDescriptor {
    let mut types = vec![TypeDefinition::object(
        "Query",
        vec![FieldDefinition::new("level0", TypeRef::named("Level1"))],
    )];
    for n in 1..=levels {
        let mut fields = vec![FieldDefinition::new(format!("tag{n}"), TypeRef::named("String"))];
        if n < levels {
            fields.push(FieldDefinition::new(
                format!("level{n}"),
                TypeRef::named(format!("Level{}", n + 1)),
            ));
        }
        types.push(TypeDefinition::object(format!("Level{n}"), fields));
    }
    types.extend(scalars());
    SchemaDescriptor::new(RootTypes::conventional(), types)
}

/// Root types exist but declare no fields.
pub fn empty_schema() -> SchemaDescriptor {
    let mut types = vec![TypeDefinition::object("Query", Vec::new())];
    types.extend(scalars());
    SchemaDescriptor::new(RootTypes::conventional(), types)
}

fn named(kind: &str, name: &str) -> Value {
    json!({ "kind": kind, "name": name, "ofType": null })
}

fn field(name: &str, description: Option<&str>, ty: Value, args: Value) -> Value {
    json!({
        "name": name,
        "description": description,
        "args": args,
        "type": ty,
        "isDeprecated": false,
        "deprecationReason": null
    })
}

/// [`player_schema`] as an introspection HTTP response body
/// (`{"data": {"__schema": ...}}`), with a `Mutation` root added.
pub fn player_introspection_response() -> Value {
    let scalar = |name: &str| {
        json!({ "kind": "SCALAR", "name": name, "description": null })
    };
    json!({
        "data": {
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": { "name": "Mutation" },
                "subscriptionType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "description": null,
                        "interfaces": [],
                        "fields": [field(
                            "player",
                            Some("Look up a player by Steam account id"),
                            named("OBJECT", "Player"),
                            json!([{
                                "name": "id",
                                "description": null,
                                "type": named("SCALAR", "Long"),
                                "defaultValue": null
                            }]),
                        )]
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Mutation",
                        "description": null,
                        "interfaces": [],
                        "fields": [field(
                            "renamePlayer",
                            None,
                            named("OBJECT", "Player"),
                            json!([{
                                "name": "name",
                                "description": null,
                                "type": {
                                    "kind": "NON_NULL",
                                    "name": null,
                                    "ofType": named("SCALAR", "String")
                                },
                                "defaultValue": null
                            }]),
                        )]
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Player",
                        "description": null,
                        "interfaces": [],
                        "fields": [
                            field("name", None, named("SCALAR", "String"), json!([])),
                            field(
                                "matches",
                                Some("Recent matches played"),
                                json!({
                                    "kind": "LIST",
                                    "name": null,
                                    "ofType": named("OBJECT", "Match")
                                }),
                                json!([]),
                            ),
                        ]
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Match",
                        "description": null,
                        "interfaces": [],
                        "fields": [
                            field("id", None, named("SCALAR", "Long"), json!([])),
                            field(
                                "durationSeconds",
                                Some("Length of the match in seconds"),
                                named("SCALAR", "Int"),
                                json!([]),
                            ),
                        ]
                    },
                    scalar("Long"),
                    scalar("String"),
                    scalar("Int"),
                    {
                        "kind": "OBJECT",
                        "name": "__Schema",
                        "description": null,
                        "interfaces": [],
                        "fields": []
                    }
                ]
            }
        }
    })
}
