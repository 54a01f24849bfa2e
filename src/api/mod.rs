//! HTTP API: the index listing, the constant responders, and API docs.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use docs::{docs_router, DocCatalog};
pub use handlers::AppState;
pub use routes::{create_router, register_endpoints};
