//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// OAuth token lifecycle
pub const TOKEN_SAFETY_MARGIN_SECS: i64 = 60;
pub const SINGLETON_TOKEN_ID: i64 = 1;
pub const OAUTH_STATE_TTL_SECS: u64 = 600;

// Remote catalog
pub const DEFAULT_ERP_BASE_URL: &str = "https://www.bling.com.br/Api/v3";
pub const PRODUCT_PAGE_LIMIT: u32 = 100;

// Attribute advisor
pub const DEFAULT_ADVISOR_MODEL: &str = "claude-3-5-sonnet-latest";
pub const FALLBACK_ADVISOR_MODELS: &[&str] =
    &["claude-3-5-sonnet-20241022", "claude-3-5-haiku-20241022", "claude-3-haiku-20240307"];
pub const NOT_AVAILABLE: &str = "N/A";
pub const ADVISOR_MAX_TOKENS: u32 = 1000;

// Configuration defaults
pub const DEFAULT_DB_PATH: &str = "catalogsync.db";
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/auth/callback";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PENDING_SKUS_PATH: &str = "data/pending_skus.json";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
