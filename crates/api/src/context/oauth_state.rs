//! Single-use `state` values for the ERP authorization redirect.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use catalogsync_domain::constants::OAUTH_STATE_TTL_SECS;
use uuid::Uuid;

/// States handed out by `/auth/login-url`, awaiting their callback.
///
/// A state is accepted once and only within its lifetime; expired entries
/// are pruned whenever a new one is issued.
pub struct OAuthStateStore {
    ttl: Duration,
    issued: Mutex<HashMap<String, Instant>>,
}

impl Default for OAuthStateStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(OAUTH_STATE_TTL_SECS))
    }
}

impl OAuthStateStore {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, issued: Mutex::new(HashMap::new()) }
    }

    pub fn issue(&self) -> String {
        let state = Uuid::new_v4().to_string();
        let now = Instant::now();
        let mut issued = self.issued.lock().unwrap_or_else(PoisonError::into_inner);
        issued.retain(|_, at| now.duration_since(*at) < self.ttl);
        issued.insert(state.clone(), now);
        state
    }

    /// Remove `state` and report whether it was issued and still fresh.
    pub fn consume(&self, state: &str) -> bool {
        let mut issued = self.issued.lock().unwrap_or_else(PoisonError::into_inner);
        match issued.remove(state) {
            Some(at) => at.elapsed() < self.ttl,
            None => false,
        }
    }
}
