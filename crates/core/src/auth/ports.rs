//! Ports for token persistence, the provider's token endpoint and time.

use async_trait::async_trait;
use catalogsync_domain::{OAuthToken, Result, TokenGrant};
use chrono::{DateTime, Utc};

/// Persisted store holding at most one current token.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the current token, if the authorization flow ever completed.
    async fn load(&self) -> Result<Option<OAuthToken>>;

    /// Replace the current token in place. Never appends a second record.
    async fn save(&self, token: &OAuthToken) -> Result<()>;
}

/// Provider token endpoint and authorization redirect.
#[async_trait]
pub trait OAuthTokenClient: Send + Sync {
    /// URL the operator visits to authorize the application.
    fn authorization_url(&self, state: &str) -> Result<String>;

    /// `grant_type=authorization_code`
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant>;

    /// `grant_type=refresh_token`
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant>;
}

/// Supplies a bearer token valid for at least the next call.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// Wall clock, injectable for expiry tests.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock implementation for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
