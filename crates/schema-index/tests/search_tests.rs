//! Integration tests for indexing, search and type rendering.

use mcp_graphql_index::{query_template, IndexError, SchemaIndex, SearchResult, MAX_INDEX_DEPTH};
use mcp_graphql_introspect::SchemaDescriptor;
use mcp_graphql_test_utils::fixtures;
use serde_json::json;

fn indexed(schema: SchemaDescriptor) -> SchemaIndex {
    let index = SchemaIndex::new();
    index.index_schema(schema).unwrap();
    index
}

fn listing(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "{} ({}) depth={} score={}",
                r.field.path, r.field.type_name, r.field.depth, r.relevance
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_exact_name_ranks_first() {
    let index = indexed(fixtures::player_schema());
    let results = index.search_fields(&["player"], 10);

    assert_eq!(results[0].field.path, "Query.player");
    assert!(results[0].relevance >= 10.0);
    insta::assert_snapshot!(listing(&results), @"Query.player (Player) depth=0 score=13");
}

#[test]
fn test_nested_matches_are_penalized_by_depth() {
    let index = indexed(fixtures::player_schema());
    let results = index.search_fields(&["match"], 10);

    insta::assert_snapshot!(listing(&results), @r"
    Query.player.matches (Match) depth=1 score=7.5
    Query.player.matches.durationSeconds (Int) depth=2 score=2
    ");
}

#[test]
fn test_keywords_are_case_insensitive_and_merged() {
    let index = indexed(fixtures::player_schema());
    let results = index.search_fields(&["PLAYER", "  ", "duration"], 10);

    let paths: Vec<_> = results.iter().map(|r| r.field.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["Query.player", "Query.player.matches.durationSeconds"]
    );
}

#[test]
fn test_unknown_keyword_returns_nothing() {
    let index = indexed(fixtures::player_schema());
    assert!(index.search_fields(&["xyz123"], 10).is_empty());
}

#[test]
fn test_max_results_truncates() {
    let index = indexed(fixtures::player_schema());
    let results = index.search_fields(&["match"], 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].field.path, "Query.player.matches");
}

#[test]
fn test_search_is_idempotent() {
    let index = indexed(fixtures::player_schema());
    let first = index.search_fields(&["match", "player"], 10);
    let second = index.search_fields(&["match", "player"], 10);
    assert_eq!(first, second);
}

#[test]
fn test_exact_match_beats_substring_match() {
    let index = indexed(fixtures::player_and_stats_schema());
    let results = index.search_fields(&["player"], 10);

    insta::assert_snapshot!(listing(&results), @r"
    Query.player (Player) depth=0 score=10
    Query.playerStats (PlayerStats) depth=0 score=5
    ");
}

#[test]
fn test_depth_bound() {
    let index = indexed(fixtures::deep_chain_schema(6));
    let snapshot = index.snapshot().unwrap();

    let deepest = snapshot.fields().map(|f| f.depth).max();
    assert_eq!(deepest, Some(MAX_INDEX_DEPTH));
    assert!(index.search_fields(&["tag4"], 10).is_empty());

    let results = index.search_fields(&["tag3"], 10);
    assert_eq!(results[0].field.path, "Query.level0.level1.level2.tag3");
    assert_eq!(results[0].field.depth, 3);
}

#[test]
fn test_self_reference_terminates() {
    let index = indexed(fixtures::self_referential_schema());
    let snapshot = index.snapshot().unwrap();

    let paths: Vec<_> = snapshot.fields().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["Query.node", "Query.node.label", "Query.node.next"]
    );
}

#[test]
fn test_type_reached_twice_is_indexed_under_each_parent() {
    let index = indexed(fixtures::shared_type_schema());
    let snapshot = index.snapshot().unwrap();

    let paths: Vec<_> = snapshot.fields().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["Query.a", "Query.a.leaf", "Query.b", "Query.b.leaf"]
    );

    let results = index.search_fields(&["leaf"], 10);
    let mut leaves: Vec<_> = results.iter().map(|r| r.field.path.as_str()).collect();
    leaves.sort_unstable();
    assert_eq!(leaves, vec!["Query.a.leaf", "Query.b.leaf"]);
    assert!(results.iter().all(|r| (r.relevance - 9.5).abs() < f64::EPSILON));
}

#[test]
fn test_type_definition_depth_one_does_not_expand() {
    let index = indexed(fixtures::player_schema());
    let definition = index.type_definition("Player", 1).unwrap();

    insta::assert_snapshot!(definition, @r"
    type Player {
      name: String
      matches: [Match]
    }
    ");
}

#[test]
fn test_type_definition_expands_nested_types() {
    let index = indexed(fixtures::player_schema());
    let definition = index.type_definition("Query", 2).unwrap();

    insta::assert_snapshot!(definition, @r"
    type Query {
      player(id: Long): Player
    }

    type Player {
      name: String
      matches: [Match]
    }
    ");
}

#[test]
fn test_type_definition_self_reference_is_not_expanded() {
    let index = indexed(fixtures::self_referential_schema());
    let definition = index.type_definition("Node", 2).unwrap();

    insta::assert_snapshot!(definition, @r"
    type Node {
      label: String
      next: Node
    }
    ");
}

#[test]
fn test_type_definition_unknown_type() {
    let index = indexed(fixtures::player_schema());
    assert_eq!(
        index.type_definition("Hero", 2),
        Err(IndexError::TypeNotFound("Hero".to_string()))
    );
    // The index is still usable afterwards.
    assert!(index.type_definition("Match", 1).is_ok());
}

#[test]
fn test_empty_schema_is_rejected() {
    let index = SchemaIndex::new();
    assert_eq!(
        index.index_schema(fixtures::empty_schema()),
        Err(IndexError::EmptyIndex)
    );
    assert!(!index.is_ready());
}

#[test]
fn test_mutation_root_is_indexed() {
    let schema = SchemaDescriptor::from_json(fixtures::player_introspection_response()).unwrap();
    let index = indexed(schema);

    let results = index.search_fields(&["rename"], 10);
    assert_eq!(results[0].field.path, "Mutation.renamePlayer");
    assert_eq!(results[0].field.parent_type, "Mutation");
}

#[test]
fn test_search_result_json_shape() {
    let index = indexed(fixtures::player_schema());
    let results = index.search_fields(&["matches"], 1);

    assert_eq!(
        serde_json::to_value(&results[0]).unwrap(),
        json!({
            "name": "matches",
            "typeName": "Match",
            "parentType": "Player",
            "description": "Recent matches played",
            "depth": 1,
            "path": "Query.player.matches",
            "relevanceScore": 12.5
        })
    );
}

#[test]
fn test_query_template_from_search_results() {
    let index = indexed(fixtures::player_schema());
    let fields: Vec<_> = index
        .search_fields(&["player", "name"], 10)
        .into_iter()
        .map(|r| r.field)
        .collect();

    insta::assert_snapshot!(query_template(&fields), @r"
    query {
      player {
        # Player - add specific fields
      }
    }
    ");
}
