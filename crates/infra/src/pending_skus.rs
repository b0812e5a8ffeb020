//! File-backed list of SKUs awaiting normalization.
//!
//! The file is a JSON array of SKU codes. A missing file means "nothing
//! pending"; a malformed one is an input error.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use catalogsync_core::PendingSkuSource;
use catalogsync_domain::{CatalogSyncError, Result};
use tracing::debug;

pub struct PendingSkuFile {
    path: PathBuf,
}

impl PendingSkuFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PendingSkuSource for PendingSkuFile {
    async fn load_pending_skus(&self) -> Result<Vec<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "pending SKU file not found");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(CatalogSyncError::Internal(format!(
                    "cannot read pending SKU file {}: {err}",
                    self.path.display()
                )))
            }
        };

        let skus: Vec<String> = serde_json::from_str(&contents).map_err(|err| {
            CatalogSyncError::InvalidInput(format!(
                "pending SKU file {} must be a JSON array of strings: {err}",
                self.path.display()
            ))
        })?;

        Ok(skus.into_iter().map(|sku| sku.trim().to_string()).filter(|sku| !sku.is_empty()).collect())
    }
}
