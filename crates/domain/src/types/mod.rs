//! Domain types and models

pub mod audit;
pub mod auth;
pub mod catalog;
pub mod normalization;
pub mod sync;

pub use audit::{AuditReport, AuditSummary, PendingSkuMatch, UncategorizedProduct};
pub use auth::{OAuthToken, TokenGrant};
pub use catalog::{
    AttributeRequirement, Category, CategoryId, ProductCharacteristic, ProductSummary,
    ProductUpdate, RemoteCategory, RemoteId, RemoteProduct,
};
pub use normalization::{ExecutionMode, NormalizationResult, NormalizationStatus};
pub use sync::{CategorySyncEntry, SyncStatus};
