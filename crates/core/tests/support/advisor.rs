//! Scripted completion models.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use catalogsync_core::CompletionModel;
use catalogsync_domain::{CatalogSyncError, Result};

pub struct ScriptedModel {
    name: String,
    reply: Result<String>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedModel {
    pub fn replying(name: &str, reply: &str) -> Self {
        Self { name: name.to_string(), reply: Ok(reply.to_string()), calls: Arc::default() }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: Err(CatalogSyncError::RemoteApi {
                status: 404,
                body: format!("model {name} not found"),
            }),
            calls: Arc::default(),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}
