//! End-to-end tests for the MCP service against a mock GraphQL endpoint.

use mcp_graphql::{
    Config, GraphQLToolRouter, IntrospectTypeParams, McpService, QueryError, QueryGraphqlParams,
};
use mcp_graphql_test_utils::fixtures;
use mockito::{Matcher, Mock, ServerGuard};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;

async fn mock_introspection(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("__schema".to_string()))
        .expect(hits)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::player_introspection_response().to_string())
        .create_async()
        .await
}

fn service_for(server: &ServerGuard) -> McpService {
    McpService::new(Config::for_endpoint(format!("{}/graphql", server.url()))).unwrap()
}

fn paths(results: &[mcp_graphql_index::SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.field.path.as_str()).collect()
}

#[tokio::test]
async fn test_first_search_introspects_once() {
    let mut server = mockito::Server::new_async().await;
    let introspection = mock_introspection(&mut server, 1).await;
    let service = service_for(&server);

    assert!(!service.index().is_ready());
    let first = service.search(&["player".to_string()], 10).await.unwrap();
    assert_eq!(first[0].field.path, "Query.player");

    let second = service
        .search(&["duration".to_string()], 10)
        .await
        .unwrap();
    assert_eq!(
        paths(&second),
        vec![
            "Query.player.matches.durationSeconds",
            "Mutation.renamePlayer.matches.durationSeconds"
        ]
    );

    introspection.assert_async().await;
}

#[tokio::test]
async fn test_failed_initialization_is_retried() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("POST", "/graphql")
        .with_status(503)
        .with_body("maintenance")
        .expect(1)
        .create_async()
        .await;
    let service = service_for(&server);

    assert!(service.search(&["player".to_string()], 10).await.is_err());
    assert!(!service.index().is_ready());
    failing.assert_async().await;
    failing.remove_async().await;

    let introspection = mock_introspection(&mut server, 1).await;
    let results = service.search(&["player".to_string()], 10).await.unwrap();
    assert!(!results.is_empty());
    assert_eq!(service.index().status().generation, 2);
    introspection.assert_async().await;
}

#[tokio::test]
async fn test_mutation_rejected_without_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .expect(0)
        .create_async()
        .await;
    let service = service_for(&server);

    let err = service
        .execute_query(r#"mutation { renamePlayer(name: "x") { name } }"#, None)
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::MutationsDisabled));

    // A mutation hidden behind a query in the same document is rejected too.
    let err = service
        .execute_query("query A { player { name } } mutation B { reset }", None)
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::MutationsDisabled));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_mutation_allowed_when_enabled() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("renamePlayer".to_string()))
        .with_status(200)
        .with_body(json!({ "data": { "renamePlayer": { "name": "x" } } }).to_string())
        .create_async()
        .await;

    let mut config = Config::for_endpoint(format!("{}/graphql", server.url()));
    config.allow_mutations = true;
    let service = McpService::new(config).unwrap();

    let data = service
        .execute_query(r#"mutation { renamePlayer(name: "x") { name } }"#, None)
        .await
        .unwrap();
    assert_eq!(data["data"]["renamePlayer"]["name"], "x");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_syntax_error_and_bad_variables_never_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .expect(0)
        .create_async()
        .await;
    let service = service_for(&server);

    let err = service
        .execute_query("query { player { ", None)
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::Syntax(_)));

    let err = service
        .execute_query("{ player { name } }", Some("[1]"))
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidVariables(_)));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_forwards_headers_and_variables() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_header("authorization", "Bearer abc")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({ "variables": { "steamId": 42 } })))
        .with_status(200)
        .with_body(json!({ "data": { "player": { "name": "Miracle" } } }).to_string())
        .create_async()
        .await;

    let mut config = Config::for_endpoint(format!("{}/graphql", server.url()));
    config
        .headers
        .insert("Authorization".to_string(), "Bearer abc".to_string());
    let service = McpService::new(config).unwrap();

    let data = service
        .execute_query(
            "query($steamId: Long!) { player(steamAccountId: $steamId) { name } }",
            Some(r#"{"steamId": 42}"#),
        )
        .await
        .unwrap();
    assert_eq!(data["data"]["player"]["name"], "Miracle");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_graphql_errors_are_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(
            json!({ "errors": [{ "message": "Cannot query field \"foo\" on type \"Query\"." }] })
                .to_string(),
        )
        .create_async()
        .await;
    let service = service_for(&server);

    let err = service
        .execute_query("{ foo }", None)
        .await
        .unwrap_err();
    let QueryError::GraphQL(body) = &err else {
        panic!("expected GraphQL error, got {err:?}");
    };
    assert!(body.contains("Cannot query field"));
    assert!(err.to_string().starts_with("The GraphQL response has errors"));
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    let service = service_for(&server);

    let err = service
        .execute_query("{ player { name } }", None)
        .await
        .unwrap_err();
    match err {
        QueryError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_debug_report_probes_and_rebuilds() {
    let mut server = mockito::Server::new_async().await;
    let _probe = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex(r"\{ __typename \}".to_string()))
        .with_status(401)
        .with_body("unauthorized")
        .create_async()
        .await;
    let introspection = mock_introspection(&mut server, 2).await;

    let mut config = Config::for_endpoint(format!("{}/graphql", server.url()));
    config
        .headers
        .insert("Authorization".to_string(), "Bearer secret".to_string());
    let service = McpService::new(config).unwrap();

    let report = service.debug_report(true).await;
    assert!(!report.status_before.initialized);
    assert_eq!(report.header_names, Some(vec!["Authorization".to_string()]));

    let probe = report.probe.as_ref().unwrap();
    assert_eq!(probe.status, 401);
    assert_eq!(probe.error_body.as_deref(), Some("unauthorized"));

    let stats = report.reinitialize.as_ref().unwrap();
    assert!(stats.published);
    assert!(report.status_after.initialized);
    assert_eq!(report.status_after.fields, stats.fields);

    let without_headers = service.debug_report(false).await;
    assert_eq!(without_headers.header_names, None);
    assert!(without_headers.status_before.initialized);
    introspection.assert_async().await;
}

#[tokio::test]
async fn test_local_schema_file_skips_introspection() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", fixtures::player_introspection_response()).unwrap();

    let mut config = Config::for_endpoint("http://127.0.0.1:9/graphql");
    config.schema = Some(file.path().to_path_buf());
    let service = McpService::new(config).unwrap();

    let results = service.search(&["rename".to_string()], 5).await.unwrap();
    assert_eq!(results[0].field.path, "Mutation.renamePlayer");

    let sdl = service.schema_sdl().await.unwrap();
    assert!(sdl.contains("renamePlayer"));

    let definition = service.type_definition("Match", 1).await.unwrap();
    assert!(definition.contains("durationSeconds"));
}

#[tokio::test]
async fn test_query_tool_reports_errors_as_tool_failures() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .expect(0)
        .create_async()
        .await;
    let router = GraphQLToolRouter::new(Arc::new(service_for(&server)));

    let result = router
        .query_graphql(Parameters(QueryGraphqlParams {
            query: "mutation { reset }".to_string(),
            variables: None,
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_introspect_type_depth_is_capped() {
    let mut server = mockito::Server::new_async().await;
    let introspection = mock_introspection(&mut server, 1).await;
    let service = Arc::new(service_for(&server));
    let router = GraphQLToolRouter::new(Arc::clone(&service));

    let introspect = |max_depth| {
        router.introspect_type(Parameters(IntrospectTypeParams {
            type_name: "Player".to_string(),
            max_depth,
        }))
    };
    let deep = introspect(3).await.unwrap();
    let unbounded = introspect(usize::MAX).await.unwrap();

    assert_eq!(deep.is_error, Some(false));
    assert_eq!(
        serde_json::to_value(&deep).unwrap(),
        serde_json::to_value(&unbounded).unwrap()
    );
    assert_eq!(service.index().status().cached_types, 1);
    introspection.assert_async().await;
}
