//! Normalization outcomes and execution mode

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::RemoteId;
use crate::impl_domain_status_conversions;

/// Whether a run may issue mutating remote calls.
///
/// Every mutating call site checks [`ExecutionMode::permits_writes`]; under
/// [`ExecutionMode::DryRun`] reads are allowed and writes are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    Apply,
    DryRun,
}

impl ExecutionMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else {
            Self::Apply
        }
    }

    pub fn permits_writes(self) -> bool {
        matches!(self, Self::Apply)
    }

    pub fn is_dry_run(self) -> bool {
        !self.permits_writes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationStatus {
    Success,
    DryRunPending,
    Error,
}

impl_domain_status_conversions!(NormalizationStatus {
    Success => "success",
    DryRunPending => "dry_run_pending",
    Error => "error",
});

/// Per-SKU outcome of a normalization run. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub sku: String,
    pub status: NormalizationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_category_id: Option<RemoteId>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub attributes_updated: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NormalizationResult {
    pub fn error(sku: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            status: NormalizationStatus::Error,
            category: None,
            remote_category_id: None,
            attributes: BTreeMap::new(),
            attributes_updated: Vec::new(),
            ai_error: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == NormalizationStatus::Success
    }
}
