//! Category synchronization log types

use serde::{Deserialize, Serialize};

use super::catalog::RemoteId;
use crate::impl_domain_status_conversions;

/// Outcome of one category in a synchronization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    AlreadySynced,
    DryRunPendingCreation,
    Created,
    Error,
}

impl_domain_status_conversions!(SyncStatus {
    AlreadySynced => "already_synced",
    DryRunPendingCreation => "dry_run_pending_creation",
    Created => "created",
    Error => "error",
});

/// One line of the synchronization log, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySyncEntry {
    pub name: String,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<RemoteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_remote_id: Option<RemoteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CategorySyncEntry {
    pub fn already_synced(name: impl Into<String>, remote_id: RemoteId) -> Self {
        Self::new(name, SyncStatus::AlreadySynced, Some(remote_id), None, None)
    }

    pub fn pending_creation(name: impl Into<String>) -> Self {
        Self::new(name, SyncStatus::DryRunPendingCreation, None, None, None)
    }

    pub fn created(
        name: impl Into<String>,
        remote_id: RemoteId,
        parent_remote_id: Option<RemoteId>,
    ) -> Self {
        Self::new(name, SyncStatus::Created, Some(remote_id), parent_remote_id, None)
    }

    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(name, SyncStatus::Error, None, None, Some(error.into()))
    }

    fn new(
        name: impl Into<String>,
        status: SyncStatus,
        remote_id: Option<RemoteId>,
        parent_remote_id: Option<RemoteId>,
        error: Option<String>,
    ) -> Self {
        Self { name: name.into(), status, remote_id, parent_remote_id, error }
    }
}
