//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ADVISOR_MODEL, DEFAULT_BIND_ADDRESS, DEFAULT_DB_PATH, DEFAULT_DB_POOL_SIZE,
    DEFAULT_ERP_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PENDING_SKUS_PATH,
    DEFAULT_REDIRECT_URI,
};
use crate::{CatalogSyncError, Result};

/// Application configuration
///
/// Every field has a default so the process can boot without credentials;
/// OAuth and advisor credentials are checked where they are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub oauth: OAuthConfig,
    pub erp: ErpConfig,
    pub advisor: AdvisorConfig,
    pub http: HttpConfig,
    pub server: ServerConfig,
    pub pending_skus_path: String,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// OAuth client registration with the ERP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub redirect_uri: String,
}

/// ERP REST endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErpConfig {
    pub base_url: String,
}

/// LLM provider used for attribute enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub model: String,
}

/// Outbound transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            oauth: OAuthConfig::default(),
            erp: ErpConfig::default(),
            advisor: AdvisorConfig::default(),
            http: HttpConfig::default(),
            server: ServerConfig::default(),
            pending_skus_path: DEFAULT_PENDING_SKUS_PATH.to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: DEFAULT_DB_PATH.to_string(), pool_size: DEFAULT_DB_POOL_SIZE }
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
        }
    }
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_ERP_BASE_URL.to_string() }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self { api_key: String::new(), model: DEFAULT_ADVISOR_MODEL.to_string() }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: DEFAULT_BIND_ADDRESS.to_string() }
    }
}

impl Config {
    /// OAuth credentials, or a configuration error when either is empty.
    pub fn require_oauth(&self) -> Result<&OAuthConfig> {
        if self.oauth.client_id.trim().is_empty() || self.oauth.client_secret.trim().is_empty() {
            return Err(CatalogSyncError::Config(
                "BLING_CLIENT_ID and BLING_CLIENT_SECRET must be set".into(),
            ));
        }
        Ok(&self.oauth)
    }

    /// Advisor credentials, or a configuration error when the key is empty.
    pub fn require_advisor(&self) -> Result<&AdvisorConfig> {
        if self.advisor.api_key.trim().is_empty() {
            return Err(CatalogSyncError::Config("ANTHROPIC_API_KEY must be set".into()));
        }
        Ok(&self.advisor)
    }

    /// Per-call transport timeout. Zero is rejected: every outbound call must
    /// be bounded.
    pub fn http_timeout(&self) -> Result<Duration> {
        if self.http.timeout_seconds == 0 {
            return Err(CatalogSyncError::Config("HTTP timeout must be greater than zero".into()));
        }
        Ok(Duration::from_secs(self.http.timeout_seconds))
    }
}
