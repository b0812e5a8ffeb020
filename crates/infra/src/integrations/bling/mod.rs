//! Bling ERP (API v3) integration
//!
//! - [`BlingClient`] implements the `RemoteCatalog` port over the category,
//!   product and sales-channel endpoints
//! - [`BlingOAuthClient`] implements the `OAuthTokenClient` port over
//!   `oauth/authorize` and `oauth/token`
//!
//! Both make a single attempt per call. Any status outside the endpoint's
//! documented success codes surfaces as `CatalogSyncError::RemoteApi`.

pub mod client;
pub mod oauth;
mod types;

pub use client::BlingClient;
pub use oauth::BlingOAuthClient;
