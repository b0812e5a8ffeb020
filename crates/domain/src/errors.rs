//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for catalogsync
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CatalogSyncError {
    /// Required credentials or settings are missing for the requested
    /// operation. Fatal to that operation only, never to the process.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The authorization-code flow has never completed.
    #[error("No OAuth token stored; complete the authorization flow first")]
    NoToken,

    /// The provider rejected or failed the refresh-token grant.
    #[error("Token refresh failed: {0}")]
    Refresh(String),

    /// Non-success HTTP status from the ERP.
    #[error("Remote API error (HTTP {status}): {body}")]
    RemoteApi { status: u16, body: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogSyncError {
    /// Configuration and token errors abort the whole request; everything
    /// else is captured per item.
    pub fn aborts_request(&self) -> bool {
        matches!(self, Self::Config(_) | Self::NoToken | Self::Refresh(_))
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg)
            | Self::Refresh(msg)
            | Self::Database(msg)
            | Self::Network(msg)
            | Self::NotFound(msg)
            | Self::InvalidInput(msg)
            | Self::Internal(msg) => msg.clone(),
            Self::RemoteApi { status, body } => format!("HTTP {status}: {body}"),
            Self::NoToken => self.to_string(),
        }
    }
}

/// Result type alias for catalogsync operations
pub type Result<T> = std::result::Result<T, CatalogSyncError>;
