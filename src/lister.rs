//! Flattens the route table into endpoint descriptors.

use serde::Serialize;
use utoipa::ToSchema;

use crate::registry::{normalize_route, Endpoint, RouteEndpoint};

/// Flat summary of one routable endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// First declared HTTP verb.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Route with exactly one leading slash.
    pub route: String,
    /// `Controller.Action`, for controller-style handlers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// `path::to::Controller:method`, for controller-style handlers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Documentation catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Comma-separated tags; empty when the endpoint has none.
    pub tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger_operation_id: Option<String>,
    /// Comma-separated documentation tags; empty when there are none.
    pub swagger_tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger_type_id: Option<String>,
}

impl From<&RouteEndpoint> for EndpointDescriptor {
    fn from(endpoint: &RouteEndpoint) -> Self {
        let metadata = endpoint.metadata();
        let controller = metadata.controller.as_ref();
        let operation = metadata.operation.as_ref();

        Self {
            method: metadata
                .http_methods
                .as_ref()
                .and_then(|m| m.first())
                .map(ToString::to_string),
            route: normalize_route(endpoint.pattern()),
            action: controller.map(|c| format!("{}.{}", c.controller_name, c.action_name)),
            controller_method: controller
                .map(|c| format!("{}:{}", c.controller_type, c.method_name)),
            name: metadata.name.clone(),
            display_name: endpoint.display_name().map(str::to_string),
            description: metadata.description.clone(),
            group: metadata.group_name.clone(),
            tags: metadata
                .tags
                .as_ref()
                .map(|t| t.tags.join(", "))
                .unwrap_or_default(),
            type_id: metadata.tags.as_ref().map(|t| t.type_id().to_string()),
            swagger_summary: operation.and_then(|o| o.summary.clone()),
            swagger_description: operation.and_then(|o| o.description.clone()),
            swagger_operation_id: operation.and_then(|o| o.operation_id.clone()),
            swagger_tags: operation
                .and_then(|o| o.tags.as_ref())
                .map(|tags| tags.join(", "))
                .unwrap_or_default(),
            swagger_type_id: operation.map(|o| o.type_id().to_string()),
        }
    }
}

/// Describe every routable endpoint, in table order.
pub fn list_endpoints<'a, I>(endpoints: I) -> impl Iterator<Item = EndpointDescriptor> + 'a
where
    I: IntoIterator<Item = &'a Endpoint>,
    I::IntoIter: 'a,
{
    endpoints
        .into_iter()
        .filter_map(Endpoint::as_route)
        .map(EndpointDescriptor::from)
}
