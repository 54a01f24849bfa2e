//! Route registration and the immutable route table.

use std::sync::Arc;

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tracing::debug;

use super::metadata::{
    ControllerAction, EndpointMetadata, HttpMethodMetadata, OperationDoc, TagsMetadata,
};

/// A concrete endpoint bound to a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEndpoint {
    pattern: String,
    display_name: Option<String>,
    metadata: EndpointMetadata,
}

impl RouteEndpoint {
    fn new(pattern: &str, method: Method) -> Self {
        let mut metadata = EndpointMetadata::default();
        metadata.set_http_methods(HttpMethodMetadata::single(method.clone()));

        Self {
            pattern: pattern.to_string(),
            display_name: Some(format!("HTTP: {method} {pattern}")),
            metadata,
        }
    }

    /// Raw route pattern as registered.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Metadata attached at registration.
    pub fn metadata(&self) -> &EndpointMetadata {
        &self.metadata
    }

    /// Set the endpoint name.
    pub fn with_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.metadata.set_name(name.into());
        self
    }

    /// Replace the display name.
    pub fn with_display_name(&mut self, display_name: impl Into<String>) -> &mut Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Attach a description.
    pub fn with_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.metadata.set_description(description.into());
        self
    }

    /// Assign the endpoint to a documentation catalog.
    pub fn with_group_name(&mut self, group_name: impl Into<String>) -> &mut Self {
        self.metadata.set_group_name(group_name.into());
        self
    }

    /// Attach grouping tags.
    pub fn with_tags<I, T>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.metadata.set_tags(TagsMetadata::new(tags));
        self
    }

    /// Attach an operation documentation annotation.
    pub fn with_operation(&mut self, operation: OperationDoc) -> &mut Self {
        self.metadata.set_operation(operation);
        self
    }
}

/// Entry in the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Routable endpoint with a concrete pattern.
    Route(RouteEndpoint),
    /// Catch-all handler with no pattern of its own.
    Fallback,
}

impl Endpoint {
    /// The routable endpoint, if this is one.
    pub fn as_route(&self) -> Option<&RouteEndpoint> {
        match self {
            Endpoint::Route(route) => Some(route),
            Endpoint::Fallback => None,
        }
    }
}

/// Immutable snapshot of every endpoint registered on the router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    endpoints: Vec<Endpoint>,
}

impl RouteTable {
    /// All entries, in registration order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Routable endpoints only, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteEndpoint> + '_ {
        self.endpoints.iter().filter_map(Endpoint::as_route)
    }

    /// Number of entries, routable or not.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Registers handlers on an axum [`Router`] while recording their metadata.
pub struct RouteTableBuilder<S = ()> {
    router: Router<S>,
    routes: Vec<RouteEndpoint>,
    /// Number of routes registered before the fallback, if one is installed.
    fallback_at: Option<usize>,
}

impl<S> RouteTableBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Start with an empty router.
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            routes: Vec::new(),
            fallback_at: None,
        }
    }

    /// Register a `GET` handler.
    pub fn map_get<H, T>(&mut self, pattern: &str, handler: H) -> &mut RouteEndpoint
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.map(pattern, Method::GET, get(handler))
    }

    /// Register a `POST` handler.
    pub fn map_post<H, T>(&mut self, pattern: &str, handler: H) -> &mut RouteEndpoint
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.map(pattern, Method::POST, post(handler))
    }

    /// Register a `GET` handler that belongs to a controller.
    pub fn map_controller_get<H, T>(
        &mut self,
        pattern: &str,
        action: ControllerAction,
        handler: H,
    ) -> &mut RouteEndpoint
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let display_name = format!("{}.{}", action.controller_type, action.method_name);
        let endpoint = self.map(pattern, Method::GET, get(handler));
        endpoint.metadata.set_controller(action);
        endpoint.with_display_name(display_name)
    }

    /// Install the catch-all handler for unmatched requests.
    ///
    /// A later call replaces the earlier handler, as it does on the router.
    pub fn map_fallback<H, T>(&mut self, handler: H) -> &mut Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        debug!(after = self.routes.len(), "registering fallback");

        let router = std::mem::take(&mut self.router);
        self.router = router.fallback(handler);
        self.fallback_at = Some(self.routes.len());
        self
    }

    fn map(&mut self, pattern: &str, method: Method, route: MethodRouter<S>) -> &mut RouteEndpoint {
        debug!(%method, pattern, "registering endpoint");

        // The table keeps the raw pattern.
        let router = std::mem::take(&mut self.router);
        self.router = router.route(&normalize_route(pattern), route);

        let index = self.routes.len();
        self.routes.push(RouteEndpoint::new(pattern, method));
        &mut self.routes[index]
    }

    /// Finalize into the router and its shared route table.
    pub fn build(self) -> (Router<S>, Arc<RouteTable>) {
        let mut endpoints: Vec<Endpoint> = self.routes.into_iter().map(Endpoint::Route).collect();
        if let Some(at) = self.fallback_at {
            endpoints.insert(at, Endpoint::Fallback);
        }

        (self.router, Arc::new(RouteTable { endpoints }))
    }
}

/// Route with exactly one leading slash.
pub fn normalize_route(pattern: &str) -> String {
    format!("/{}", pattern.trim_start_matches('/'))
}

impl<S> Default for RouteTableBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
