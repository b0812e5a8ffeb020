//! Token store, OAuth endpoint and clock doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use catalogsync_core::{Clock, CredentialStore, OAuthTokenClient};
use catalogsync_domain::{OAuthToken, Result, TokenGrant};
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_750_000_000, 0).single().unwrap()
}

#[derive(Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(now)) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Single-record store; `save` replaces the record.
#[derive(Default, Clone)]
pub struct MemoryCredentialStore {
    token: Arc<Mutex<Option<OAuthToken>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryCredentialStore {
    pub fn with_token(token: OAuthToken) -> Self {
        let store = Self::default();
        *store.token.lock().unwrap() = Some(token);
        store
    }

    pub fn current(&self) -> Option<OAuthToken> {
        self.token.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<OAuthToken>> {
        Ok(self.current())
    }

    async fn save(&self, token: &OAuthToken) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.token.lock().unwrap() = Some(token.clone());
        Ok(())
    }
}

/// Token endpoint that issues `access-N` tokens and counts refreshes.
#[derive(Default, Clone)]
pub struct CountingOAuthClient {
    refreshes: Arc<AtomicUsize>,
    delay: Option<StdDuration>,
}

impl CountingOAuthClient {
    /// Hold each refresh open for `delay` so concurrent callers overlap.
    pub fn with_delay(delay: StdDuration) -> Self {
        Self { delay: Some(delay), ..Self::default() }
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OAuthTokenClient for CountingOAuthClient {
    fn authorization_url(&self, state: &str) -> Result<String> {
        Ok(format!("https://erp.test/oauth/authorize?response_type=code&state={state}"))
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
        Ok(TokenGrant {
            access_token: format!("access-{code}"),
            refresh_token: format!("refresh-{code}"),
            expires_in: 21_600,
            scope: Some("products".into()),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant> {
        let n = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(TokenGrant {
            access_token: format!("access-{n}"),
            refresh_token: format!("{refresh_token}-{n}"),
            expires_in: 21_600,
            scope: None,
        })
    }
}

/// Token issued at `epoch()` that expires `expires_in_secs` later.
pub fn token_expiring_in(expires_in_secs: i64) -> OAuthToken {
    let mut token = TokenGrant {
        access_token: "access-0".into(),
        refresh_token: "refresh-0".into(),
        expires_in: 3_600,
        scope: Some("products".into()),
    }
    .into_token(epoch() - Duration::hours(1))
    .unwrap();
    token.expires_at = epoch() + Duration::seconds(expires_in_secs);
    token
}
