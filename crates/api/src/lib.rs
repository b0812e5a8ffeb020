//! # catalogsync API
//!
//! HTTP application layer - routes and main entry point.
//!
//! This crate contains:
//! - axum routes (HTTP → service bridge)
//! - Application context (dependency injection)
//! - Main entry point and the seed binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Maps domain errors to HTTP responses

pub mod context;
pub mod error;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::*;
pub use error::{ApiError, ApiResult};
pub use routes::router;
