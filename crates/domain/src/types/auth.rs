//! OAuth token records

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{CatalogSyncError, Result};

/// The single current OAuth token of the deployment.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub scope: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OAuthToken {
    /// True while `now + margin` is strictly before `expires_at`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        now + margin < self.expires_at
    }

    /// Replace the credential fields in place, keeping the record identity
    /// (`created_at`) and bumping `updated_at`. The record is left untouched
    /// when the grant's lifetime is out of range.
    pub fn apply_grant(&mut self, grant: &TokenGrant, now: DateTime<Utc>) -> Result<()> {
        self.expires_at = grant.expires_at(now)?;
        self.access_token = grant.access_token.clone();
        self.refresh_token = grant.refresh_token.clone();
        if grant.scope.is_some() {
            self.scope = grant.scope.clone();
        }
        self.updated_at = now;
        Ok(())
    }
}

impl std::fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthToken")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Token endpoint response for both the authorization-code and the
/// refresh-token grants.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenGrant {
    /// Absolute expiry of the grant issued at `now`.
    ///
    /// # Errors
    /// `InvalidInput` for a negative `expires_in` or one that overflows the
    /// calendar.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let out_of_range = || {
            CatalogSyncError::InvalidInput(format!(
                "token endpoint returned out-of-range expires_in: {}",
                self.expires_in
            ))
        };
        if self.expires_in < 0 {
            return Err(out_of_range());
        }
        Duration::try_seconds(self.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(out_of_range)
    }

    /// Build a brand-new token record issued at `now`.
    pub fn into_token(self, now: DateTime<Utc>) -> Result<OAuthToken> {
        Ok(OAuthToken {
            expires_at: self.expires_at(now)?,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            scope: self.scope,
            created_at: now,
            updated_at: now,
        })
    }
}

impl std::fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGrant")
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
