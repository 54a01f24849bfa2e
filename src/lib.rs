//! Self-describing demo web service.
//!
//! The service exposes a greeting, a farewell, and an index route that
//! reports every endpoint registered on its own router together with the
//! metadata attached at registration time.
//!
//! ```text
//! GET /          -> JSON list of endpoint descriptors   (catalog v1)
//! GET /greeting  -> "Hello, world"                      (catalog v1)
//! GET /farewell  -> "Bye, world"                        (catalog v2)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`registry`]: Typed endpoint registration and the route table
//! - [`lister`]: Flattening the route table into descriptors
//! - [`api`]: HTTP handlers, router and documentation catalogs
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod lister;
pub mod registry;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
