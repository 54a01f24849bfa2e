//! Integration tests for the endpoint catalog service.
//!
//! Requests are driven through the fully assembled router with
//! `tower::ServiceExt::oneshot`, so no socket is opened.
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use endpoint_catalog::api::{create_router, register_endpoints};
use endpoint_catalog::config::Config;

fn app() -> Router {
    create_router(&Config::default())
}

async fn get(uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

async fn listing() -> Vec<Value> {
    let (status, _, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);

    match serde_json::from_str(&body).unwrap() {
        Value::Array(items) => items,
        other => panic!("expected array, got {other}"),
    }
}

/// One descriptor per routable endpoint.
#[tokio::test]
async fn test_listing_count_matches_route_table() {
    let (_, routes) = register_endpoints();

    assert_eq!(listing().await.len(), routes.routes().count());
}

/// Every route starts with exactly one slash.
#[tokio::test]
async fn test_routes_have_single_leading_slash() {
    for item in listing().await {
        let route = item["route"].as_str().unwrap();
        assert!(route.starts_with('/'), "{route}");
        assert!(!route.starts_with("//"), "{route}");
    }
}

/// Index descriptor reports the metadata it was registered with.
#[tokio::test]
async fn test_index_descriptor() {
    let items = listing().await;
    let index = items.iter().find(|item| item["route"] == "/").unwrap();

    assert_eq!(index["method"], "GET");
    assert_eq!(index["name"], "Index");
    assert_eq!(index["displayName"], "Mahfoud");
    assert_eq!(
        index["description"],
        "This description is added manually by Mahfoud"
    );
    assert_eq!(index["group"], "v1");
    assert_eq!(index["tags"], "Group 1");
    assert_eq!(index["swaggerSummary"], "Summmary X");
    assert_eq!(index["swaggerOperationId"], "NIndex");
    assert_eq!(index["swaggerTags"], "Mahfoud");
}

/// Plain function routes have no controller fields and empty tags.
#[tokio::test]
async fn test_plain_routes_have_no_controller_fields() {
    let items = listing().await;
    let greeting = items.iter().find(|item| item["route"] == "/greeting").unwrap();
    let object = greeting.as_object().unwrap();

    assert!(!object.contains_key("action"));
    assert!(!object.contains_key("controllerMethod"));
    assert!(!object.contains_key("typeId"));
    assert_eq!(greeting["tags"], "");
    assert_eq!(greeting["swaggerTags"], "");
    assert_eq!(greeting["group"], "v1");
}

#[tokio::test]
async fn test_greeting() {
    let (status, content_type, body) = get("/greeting").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    assert_eq!(body, "Hello, world");
}

#[tokio::test]
async fn test_farewell() {
    let (status, content_type, body) = get("/farewell").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    assert_eq!(body, "Bye, world");
}

/// Documentation routes are served but never listed.
#[tokio::test]
async fn test_docs_are_not_listed() {
    let (status, _, _) = get("/swagger/v1/swagger.json").await;
    assert_eq!(status, StatusCode::OK);

    let routes: Vec<String> = listing()
        .await
        .iter()
        .map(|item| item["route"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(routes, vec!["/farewell", "/", "/greeting"]);
}
