//! Category synchronizer - core business logic

use std::collections::HashMap;
use std::sync::Arc;

use catalogsync_domain::{
    Category, CategoryId, CategorySyncEntry, ExecutionMode, RemoteId, Result,
};
use tracing::{error, info, instrument, warn};

use super::ordering::creation_order;
use crate::catalog::ports::{CategoryRepository, RemoteCatalog};

/// Ensures every local category exists remotely, parents before children.
pub struct CategorySynchronizer {
    categories: Arc<dyn CategoryRepository>,
    remote: Arc<dyn RemoteCatalog>,
}

impl CategorySynchronizer {
    pub fn new(categories: Arc<dyn CategoryRepository>, remote: Arc<dyn RemoteCatalog>) -> Self {
        Self { categories, remote }
    }

    /// Walk the tree in creation order and log one entry per category.
    ///
    /// Re-running after a partial failure only acts on categories still
    /// lacking a remote id. A failed node does not stop the run, but its
    /// descendants log their own error instead of being created as orphans.
    ///
    /// # Errors
    /// Configuration, token and persistence errors abort the run.
    #[instrument(skip(self))]
    pub async fn sync(&self, mode: ExecutionMode) -> Result<Vec<CategorySyncEntry>> {
        let ordered = creation_order(self.categories.list_categories().await?)?;

        let names: HashMap<CategoryId, String> =
            ordered.iter().map(|category| (category.id, category.name.clone())).collect();
        let mut resolved: HashMap<CategoryId, RemoteId> = ordered
            .iter()
            .filter_map(|category| category.remote_id.map(|remote_id| (category.id, remote_id)))
            .collect();

        let mut log = Vec::with_capacity(ordered.len());
        for category in ordered {
            let entry = self.sync_one(&category, mode, &names, &mut resolved).await?;
            log.push(entry);
        }

        info!(categories = log.len(), ?mode, "category synchronization finished");
        Ok(log)
    }

    async fn sync_one(
        &self,
        category: &Category,
        mode: ExecutionMode,
        names: &HashMap<CategoryId, String>,
        resolved: &mut HashMap<CategoryId, RemoteId>,
    ) -> Result<CategorySyncEntry> {
        if let Some(remote_id) = category.remote_id {
            return Ok(CategorySyncEntry::already_synced(&category.name, remote_id));
        }

        if !mode.permits_writes() {
            return Ok(CategorySyncEntry::pending_creation(&category.name));
        }

        let parent_remote_id = match category.parent_id {
            None => None,
            Some(parent_id) => match resolved.get(&parent_id) {
                Some(remote_id) => Some(*remote_id),
                None => {
                    let parent = names
                        .get(&parent_id)
                        .map_or_else(|| format!("#{parent_id}"), |name| format!("'{name}'"));
                    warn!(category = %category.name, parent = %parent, "parent has no remote id");
                    return Ok(CategorySyncEntry::failed(
                        &category.name,
                        format!("parent category {parent} has no remote id"),
                    ));
                }
            },
        };

        match self.remote.create_category(&category.name, parent_remote_id).await {
            Ok(created) => {
                match self.categories.set_remote_id(category.id, created.id).await {
                    Ok(()) => {}
                    Err(err) if err.aborts_request() => return Err(err),
                    Err(err) => {
                        error!(
                            category = %category.name,
                            remote_id = created.id,
                            error = %err,
                            "remote category created but its id was not recorded"
                        );
                        return Ok(CategorySyncEntry {
                            remote_id: Some(created.id),
                            ..CategorySyncEntry::failed(
                                &category.name,
                                format!(
                                    "created remotely as {} but not recorded locally: {}",
                                    created.id,
                                    err.message()
                                ),
                            )
                        });
                    }
                }
                resolved.insert(category.id, created.id);
                info!(
                    category = %category.name,
                    remote_id = created.id,
                    parent_remote_id = ?parent_remote_id,
                    "category created remotely"
                );
                Ok(CategorySyncEntry::created(&category.name, created.id, parent_remote_id))
            }
            Err(err) if err.aborts_request() => Err(err),
            Err(err) => {
                error!(category = %category.name, error = %err, "remote category creation failed");
                Ok(CategorySyncEntry::failed(&category.name, err.message()))
            }
        }
    }
}
