//! # catalogsync Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Database implementations (SQLite over an r2d2 pool)
//! - HTTP client with timeout and retry support
//! - External service integrations (Bling ERP, Anthropic)
//! - Configuration loading and the pending-SKU file source
//!
//! ## Architecture
//! - Implements traits defined in `catalogsync-core`
//! - Contains all "impure" code (I/O, network)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod pending_skus;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use http::*;
pub use integrations::*;
pub use pending_skus::PendingSkuFile;
