//! HTTP API route definitions.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use super::docs::{docs_router, DocCatalog};
use super::handlers::{farewell, greeting, index, not_found, AppState};
use crate::config::Config;
use crate::registry::{OperationDoc, RouteTable, RouteTableBuilder};

/// Register every application endpoint.
///
/// Returns the stateful router together with the table describing it.
pub fn register_endpoints() -> (Router<AppState>, Arc<RouteTable>) {
    let mut builder = RouteTableBuilder::<AppState>::new();

    builder
        .map_get("/farewell", farewell)
        .with_group_name(DocCatalog::V2.to_string());

    builder
        .map_get("/", index)
        .with_display_name("Mahfoud")
        .with_name("Index")
        .with_tags(["Group 1"])
        .with_description("This description is added manually by Mahfoud")
        .with_operation(
            OperationDoc::new()
                .summary("Summmary X")
                .description("Description X")
                .operation_id("NIndex")
                .tags(["Mahfoud"]),
        )
        .with_group_name(DocCatalog::V1.to_string());

    builder
        .map_get("/greeting", greeting)
        .with_group_name(DocCatalog::V1.to_string());

    builder.map_fallback(not_found);

    builder.build()
}

/// Create the API router.
pub fn create_router(config: &Config) -> Router {
    let (router, routes) = register_endpoints();
    let docs = docs_router(config, &routes);

    router
        .with_state(AppState::new(routes))
        .merge(docs)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::lister::{list_endpoints, EndpointDescriptor};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    fn dev_config() -> Config {
        Config {
            app_env: Environment::Development,
            ..Config::default()
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn table_lists_routes_in_registration_order() {
        let (_, routes) = register_endpoints();

        let patterns: Vec<_> = routes.routes().map(|r| r.pattern()).collect();
        assert_eq!(patterns, vec!["/farewell", "/", "/greeting"]);
        assert_eq!(routes.len(), 4);
    }

    #[test]
    fn index_descriptor_matches_registration() {
        let (_, routes) = register_endpoints();
        let descriptors: Vec<EndpointDescriptor> = list_endpoints(routes.endpoints()).collect();

        let index = descriptors.iter().find(|d| d.route == "/").unwrap();
        assert_eq!(index.method.as_deref(), Some("GET"));
        assert_eq!(index.name.as_deref(), Some("Index"));
        assert_eq!(index.display_name.as_deref(), Some("Mahfoud"));
        assert_eq!(
            index.description.as_deref(),
            Some("This description is added manually by Mahfoud")
        );
        assert_eq!(index.group.as_deref(), Some("v1"));
        assert_eq!(index.tags, "Group 1");
        assert_eq!(index.swagger_summary.as_deref(), Some("Summmary X"));
        assert_eq!(index.swagger_description.as_deref(), Some("Description X"));
        assert_eq!(index.swagger_operation_id.as_deref(), Some("NIndex"));
        assert_eq!(index.swagger_tags, "Mahfoud");

        let farewell = descriptors.iter().find(|d| d.route == "/farewell").unwrap();
        assert_eq!(farewell.group.as_deref(), Some("v2"));
        assert_eq!(farewell.display_name.as_deref(), Some("HTTP: GET /farewell"));
        assert_eq!(farewell.tags, "");
        assert_eq!(farewell.action, None);
    }

    #[tokio::test]
    async fn greeting_endpoint_returns_text() {
        let (status, body) = get(create_router(&Config::default()), "/greeting").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Hello, world");
    }

    #[tokio::test]
    async fn farewell_endpoint_returns_text() {
        let (status, body) = get(create_router(&Config::default()), "/farewell").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Bye, world");
    }

    #[tokio::test]
    async fn unknown_path_returns_404() {
        let (status, _) = get(create_router(&Config::default()), "/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn swagger_ui_only_in_development() {
        let (status, _) = get(create_router(&Config::default()), "/swagger-ui/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(create_router(&dev_config()), "/swagger-ui/").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn documents_served_in_every_mode() {
        for config in [Config::default(), dev_config()] {
            for catalog in DocCatalog::ALL {
                let (status, body) =
                    get(create_router(&config), catalog.document_path()).await;
                assert_eq!(status, StatusCode::OK);

                let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
                assert_eq!(doc["info"]["version"], catalog.to_string());
            }
        }
    }
}
