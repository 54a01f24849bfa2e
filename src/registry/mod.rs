//! Route registry.
//!
//! Handlers are registered through [`RouteTableBuilder`], which wires them into
//! an axum router and records a typed metadata record for each one. Building
//! yields the router plus an immutable [`RouteTable`] that can be inspected at
//! request time.

pub mod metadata;
pub mod table;

pub use metadata::{
    ControllerAction, EndpointMetadata, HttpMethodMetadata, OperationDoc, TagsMetadata,
};
pub use table::{normalize_route, Endpoint, RouteEndpoint, RouteTable, RouteTableBuilder};
