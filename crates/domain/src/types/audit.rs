//! Read-only audit report comparing the pending SKU list with the ERP

use serde::{Deserialize, Serialize};

use super::catalog::RemoteId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSkuMatch {
    pub sku: String,
    pub id: RemoteId,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncategorizedProduct {
    pub sku: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_pending_requested: usize,
    pub found_pending: usize,
    pub missing_pending: usize,
    pub total_without_category: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub total_remote_products: usize,
    pub pending_found: Vec<PendingSkuMatch>,
    pub pending_missing: Vec<String>,
    pub products_without_category: Vec<UncategorizedProduct>,
    pub summary: AuditSummary,
}
