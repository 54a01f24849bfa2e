//! OpenAPI documentation catalogs.
//!
//! Handler annotations supply request and response shapes. Which routes a
//! catalog contains, and their operation summary, id and tags, come from the
//! metadata recorded in the [`RouteTable`].

use axum::http::Method;
use axum::{routing::get, Json, Router};
use strum::{Display, EnumString};
use utoipa::openapi::path::{Operation, OperationBuilder, PathItem};
use utoipa::openapi::Response;
use utoipa::OpenApi;
use utoipa_swagger_ui::{SwaggerUi, Url};

use super::handlers;
use crate::config::Config;
use crate::lister::EndpointDescriptor;
use crate::registry::{normalize_route, RouteEndpoint, RouteTable};

/// Path the interactive UI is mounted at in development.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    paths(handlers::index, handlers::greeting, handlers::farewell),
    components(schemas(EndpointDescriptor))
)]
struct HandlerDocs;

/// Named documentation catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DocCatalog {
    /// Index and greeting.
    V1,
    /// Farewell.
    V2,
}

impl DocCatalog {
    /// Every catalog, in display order.
    pub const ALL: [DocCatalog; 2] = [DocCatalog::V1, DocCatalog::V2];

    /// Where the machine-readable document is served.
    pub fn document_path(self) -> &'static str {
        match self {
            DocCatalog::V1 => "/swagger/v1/swagger.json",
            DocCatalog::V2 => "/swagger/v2/swagger.json",
        }
    }

    /// Group name endpoints use to join this catalog.
    pub fn label(self) -> &'static str {
        match self {
            DocCatalog::V1 => "v1",
            DocCatalog::V2 => "v2",
        }
    }

    /// Build the OpenAPI document for the routes assigned to this catalog.
    pub fn openapi(self, app_name: &str, routes: &RouteTable) -> utoipa::openapi::OpenApi {
        let mut doc = HandlerDocs::openapi();
        let mut annotated = std::mem::take(&mut doc.paths.paths);

        let members = routes
            .routes()
            .filter(|route| route.metadata().group_name.as_deref() == Some(self.label()));

        for route in members {
            let Some(method) = route.metadata().http_methods.as_ref().and_then(|m| m.first())
            else {
                continue;
            };
            let path = openapi_path(route.pattern());

            let mut operation = annotated
                .get_mut(&path)
                .and_then(|item| operation_slot(item, method))
                .and_then(Option::take)
                .unwrap_or_else(default_operation);
            apply_metadata(&mut operation, route);

            let item = doc.paths.paths.entry(path).or_default();
            if let Some(slot) = operation_slot(item, method) {
                *slot = Some(operation);
            }
        }

        doc.info.title = format!("{app_name} {}", self.label());
        doc.info.version = self.label().to_string();
        doc
    }
}

/// OpenAPI path for a route pattern (`/orders/:id` becomes `/orders/{id}`).
fn openapi_path(pattern: &str) -> String {
    normalize_route(pattern)
        .split('/')
        .map(|segment| match segment.strip_prefix([':', '*']) {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn operation_slot<'a>(item: &'a mut PathItem, method: &Method) -> Option<&'a mut Option<Operation>> {
    match *method {
        Method::GET => Some(&mut item.get),
        Method::POST => Some(&mut item.post),
        Method::PUT => Some(&mut item.put),
        Method::DELETE => Some(&mut item.delete),
        Method::PATCH => Some(&mut item.patch),
        Method::HEAD => Some(&mut item.head),
        Method::OPTIONS => Some(&mut item.options),
        Method::TRACE => Some(&mut item.trace),
        _ => None,
    }
}

fn default_operation() -> Operation {
    OperationBuilder::new()
        .response("200", Response::new("Success"))
        .build()
}

/// Overlay registration metadata onto the handler's operation.
///
/// The operation annotation wins; name, description and tags fill the gaps.
fn apply_metadata(operation: &mut Operation, route: &RouteEndpoint) {
    let metadata = route.metadata();

    if let Some(name) = &metadata.name {
        operation.operation_id = Some(name.clone());
    }
    if let Some(description) = &metadata.description {
        operation.description = Some(description.clone());
    }
    if let Some(tags) = &metadata.tags {
        operation.tags = Some(tags.tags.clone());
    }

    if let Some(doc) = &metadata.operation {
        if doc.summary.is_some() {
            operation.summary = doc.summary.clone();
        }
        if doc.description.is_some() {
            operation.description = doc.description.clone();
        }
        if doc.operation_id.is_some() {
            operation.operation_id = doc.operation_id.clone();
        }
        if doc.tags.is_some() {
            operation.tags = doc.tags.clone();
        }
    }
}

/// Routes serving the documentation catalogs.
///
/// The JSON documents are always available; the interactive UI only in
/// development.
pub fn docs_router(config: &Config, routes: &RouteTable) -> Router {
    if config.is_development() {
        let ui = DocCatalog::ALL
            .into_iter()
            .fold(SwaggerUi::new(SWAGGER_UI_PATH), |ui, catalog| {
                ui.url(
                    Url::new(catalog.label(), catalog.document_path()),
                    catalog.openapi(&config.app_name, routes),
                )
            });
        return Router::new().merge(ui);
    }

    DocCatalog::ALL
        .into_iter()
        .fold(Router::new(), |router, catalog| {
            let doc = catalog.openapi(&config.app_name, routes);
            router.route(
                catalog.document_path(),
                get(move || async move { Json(doc) }),
            )
        })
}
