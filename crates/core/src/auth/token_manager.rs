//! Token manager with refresh-on-demand
//!
//! Manages the OAuth token lifecycle:
//! - Returns the stored access token while it is outside the safety margin
//! - Refreshes through the provider's token endpoint otherwise
//! - Serializes check-then-refresh so concurrent callers issue one refresh
//! - Persists the authorization-code grant as the sole current token

use std::sync::Arc;

use async_trait::async_trait;
use catalogsync_domain::constants::TOKEN_SAFETY_MARGIN_SECS;
use catalogsync_domain::{CatalogSyncError, OAuthToken, Result, TokenGrant};
use chrono::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::ports::{AccessTokenProvider, Clock, CredentialStore, OAuthTokenClient, SystemClock};

/// Single writer of the persisted OAuth token.
pub struct TokenManager {
    store: Arc<dyn CredentialStore>,
    oauth_client: Arc<dyn OAuthTokenClient>,
    clock: Arc<dyn Clock>,
    safety_margin: Duration,
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    pub fn new(store: Arc<dyn CredentialStore>, oauth_client: Arc<dyn OAuthTokenClient>) -> Self {
        Self {
            store,
            oauth_client,
            clock: Arc::new(SystemClock),
            safety_margin: Duration::seconds(TOKEN_SAFETY_MARGIN_SECS),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_safety_margin(mut self, margin: Duration) -> Self {
        self.safety_margin = margin;
        self
    }

    /// Authorization URL for the operator, carrying the given `state`.
    pub fn authorization_url(&self, state: &str) -> Result<String> {
        self.oauth_client.authorization_url(state)
    }

    /// Return an access token that stays valid past the safety margin.
    ///
    /// # Errors
    /// - `NoToken` if the authorization flow never completed
    /// - `Refresh` if the provider rejected the refresh grant
    /// - `Config` if the OAuth client credentials are missing
    pub async fn get_valid_token(&self) -> Result<String> {
        let token = self.load_current().await?;
        if token.is_fresh_at(self.clock.now(), self.safety_margin) {
            return Ok(token.access_token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited.
        let mut token = self.load_current().await?;
        if token.is_fresh_at(self.clock.now(), self.safety_margin) {
            debug!("token refreshed by concurrent caller");
            return Ok(token.access_token);
        }

        info!(expires_at = %token.expires_at, "access token near expiry, refreshing");
        let grant = self.oauth_client.refresh(&token.refresh_token).await.map_err(|err| {
            error!(error = %err, "token refresh failed");
            into_refresh_error(err)
        })?;

        token.apply_grant(&grant, self.clock.now()).map_err(into_refresh_error)?;
        self.store.save(&token).await?;
        info!(expires_at = %token.expires_at, "access token refreshed");

        Ok(token.access_token)
    }

    /// Exchange an authorization code and store the result as the sole
    /// current token, replacing any prior one.
    pub async fn complete_authorization(&self, code: &str) -> Result<OAuthToken> {
        let grant = self.oauth_client.exchange_code(code).await?;
        self.store_grant(grant).await
    }

    /// Persist a freshly issued grant as the current token.
    pub async fn store_grant(&self, grant: TokenGrant) -> Result<OAuthToken> {
        let _guard = self.refresh_lock.lock().await;
        let token = grant.into_token(self.clock.now())?;
        self.store.save(&token).await?;
        info!(expires_at = %token.expires_at, "authorization completed, token stored");
        Ok(token)
    }

    async fn load_current(&self) -> Result<OAuthToken> {
        self.store.load().await?.ok_or(CatalogSyncError::NoToken)
    }
}

#[async_trait]
impl AccessTokenProvider for TokenManager {
    async fn access_token(&self) -> Result<String> {
        self.get_valid_token().await
    }
}

fn into_refresh_error(err: CatalogSyncError) -> CatalogSyncError {
    match err {
        CatalogSyncError::Config(_) | CatalogSyncError::Refresh(_) => err,
        other => CatalogSyncError::Refresh(other.message()),
    }
}
