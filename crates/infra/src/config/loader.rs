//! Configuration loader
//!
//! Builds the application [`Config`] in layers:
//! 1. Built-in defaults
//! 2. An optional `catalogsync.{toml,json}` / `config.{toml,json}` file
//! 3. Environment variables, which win over the file
//!
//! ## Environment Variables
//! - `BLING_CLIENT_ID` / `BLING_CLIENT_SECRET`: OAuth client registration
//! - `REDIRECT_URI`: OAuth callback URL
//! - `BLING_API_BASE_URL`: ERP REST base URL
//! - `DATABASE_URL`: SQLite file path (`sqlite://` prefix accepted)
//! - `DATABASE_POOL_SIZE`: Connection pool size
//! - `ANTHROPIC_API_KEY` / `ANTHROPIC_MODEL`: attribute advisor
//! - `HTTP_TIMEOUT_SECS`: per-call timeout for every outbound request
//! - `PENDING_SKUS_PATH`: JSON file listing the pending SKU codes
//! - `CATALOGSYNC_BIND`: HTTP listen address
//!
//! Nothing here validates credentials; missing secrets surface as
//! configuration errors when the feature needing them is used.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use catalogsync_domain::{CatalogSyncError, Config, Result};

const SQLITE_URL_PREFIX: &str = "sqlite://";

/// Load configuration: probed file (if any) overlaid with the environment.
///
/// # Errors
/// Returns `CatalogSyncError::Config` if a probed file is malformed or an
/// environment variable holds an unparseable number.
pub fn load() -> Result<Config> {
    let base = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("no config file found, using defaults");
            Config::default()
        }
    };

    let config = apply_env_overrides(base)?;
    tracing::info!(
        database = %config.database.path,
        erp = %config.erp.base_url,
        model = %config.advisor.model,
        "configuration loaded"
    );
    Ok(config)
}

/// Defaults overlaid with environment variables only.
///
/// # Errors
/// Returns `CatalogSyncError::Config` for unparseable numeric values.
pub fn load_from_env() -> Result<Config> {
    apply_env_overrides(Config::default())
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `CatalogSyncError::Config` if the file is missing, unreadable, or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CatalogSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CatalogSyncError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CatalogSyncError::Config(format!("Failed to read config file: {}", e)))?;

    let mut config = parse_config(&contents, &config_path)?;
    config.database.path = normalize_database_path(&config.database.path);
    Ok(config)
}

/// Parse configuration from string content; format follows the extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CatalogSyncError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CatalogSyncError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CatalogSyncError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file in the working directory, its parent, or next
/// to the executable.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] =
        ["catalogsync.toml", "catalogsync.json", "config.toml", "config.json"];

    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter().flat_map(|dir| NAMES.iter().map(move |name| dir.join(name))).find(|p| p.exists())
}

fn apply_env_overrides(mut config: Config) -> Result<Config> {
    if let Some(value) = env_var("BLING_CLIENT_ID") {
        config.oauth.client_id = value;
    }
    if let Some(value) = env_var("BLING_CLIENT_SECRET") {
        config.oauth.client_secret = value;
    }
    if let Some(value) = env_var("REDIRECT_URI") {
        config.oauth.redirect_uri = value;
    }
    if let Some(value) = env_var("BLING_API_BASE_URL") {
        config.erp.base_url = value.trim_end_matches('/').to_string();
    }
    if let Some(value) = env_var("DATABASE_URL") {
        config.database.path = normalize_database_path(&value);
    }
    if let Some(value) = env_parse::<u32>("DATABASE_POOL_SIZE")? {
        config.database.pool_size = value;
    }
    if let Some(value) = env_var("ANTHROPIC_API_KEY") {
        config.advisor.api_key = value;
    }
    if let Some(value) = env_var("ANTHROPIC_MODEL") {
        config.advisor.model = value;
    }
    if let Some(value) = env_parse::<u64>("HTTP_TIMEOUT_SECS")? {
        config.http.timeout_seconds = value;
    }
    if let Some(value) = env_var("PENDING_SKUS_PATH") {
        config.pending_skus_path = value;
    }
    if let Some(value) = env_var("CATALOGSYNC_BIND") {
        config.server.bind_address = value;
    }

    Ok(config)
}

/// Accepts both a bare path and a `sqlite://` URL.
fn normalize_database_path(value: &str) -> String {
    let trimmed = value.trim();
    trimmed.strip_prefix(SQLITE_URL_PREFIX).unwrap_or(trimmed).to_string()
}

/// Non-empty environment variable, trimmed.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| CatalogSyncError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
