//! Entity App - paginated CRUD REST service
//!
//! Exposes the `EntityWithPagination` resource over HTTP, backed by MySQL
//! with an optional Redis cache of loaded rows.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
