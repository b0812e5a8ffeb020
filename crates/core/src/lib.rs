//! # catalogsync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for storage, the ERP and the LLM
//! - The OAuth token lifecycle manager
//! - Category synchronization, product normalization and audit services
//!
//! ## Architecture Principles
//! - Only depends on `catalogsync-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod advisor;
pub mod audit;
pub mod auth;
pub mod catalog;
pub mod normalization;
pub mod sync;

// Re-export specific items to avoid ambiguity
pub use advisor::{extract_json_object, model_chain, AdvisorOutcome, AttributeAdvisor, CompletionModel};
pub use audit::AuditService;
pub use auth::ports::{AccessTokenProvider, Clock, CredentialStore, OAuthTokenClient, SystemClock};
pub use auth::TokenManager;
pub use catalog::ports::{
    AttributeRequirementRepository, CategoryRepository, PendingSkuSource, RemoteCatalog,
};
pub use normalization::NormalizationEngine;
pub use sync::CategorySynchronizer;
