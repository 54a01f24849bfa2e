//! HTTP API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::debug;

use crate::lister::{list_endpoints, EndpointDescriptor};
use crate::registry::RouteTable;

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Every endpoint registered on the router, fixed at startup.
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// Create new app state.
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self { routes }
    }
}

/// Index handler - lists every routable endpoint with its metadata.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Registered endpoints", body = [EndpointDescriptor])
    )
)]
pub async fn index(State(state): State<AppState>) -> Json<Vec<EndpointDescriptor>> {
    let descriptors: Vec<_> = list_endpoints(state.routes.endpoints()).collect();
    debug!(count = descriptors.len(), "listed endpoints");
    Json(descriptors)
}

/// Greeting handler.
#[utoipa::path(
    get,
    path = "/greeting",
    responses(
        (status = 200, description = "Greeting text", body = String, content_type = "text/plain")
    )
)]
pub async fn greeting() -> &'static str {
    "Hello, world"
}

/// Farewell handler.
#[utoipa::path(
    get,
    path = "/farewell",
    responses(
        (status = 200, description = "Farewell text", body = String, content_type = "text/plain")
    )
)]
pub async fn farewell() -> &'static str {
    "Bye, world"
}

/// Fallback for unmatched requests.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
