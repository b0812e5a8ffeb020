use std::collections::HashMap;
use std::sync::Arc;

use catalogsync_domain::constants::PRODUCT_PAGE_LIMIT;
use catalogsync_domain::{
    AuditReport, AuditSummary, PendingSkuMatch, ProductSummary, Result, UncategorizedProduct,
};
use tracing::info;

use crate::catalog::ports::{PendingSkuSource, RemoteCatalog};

const UNCATEGORIZED: &str = "uncategorized";

/// Compares the pending SKU list with the first page of remote products.
/// Issues reads only.
pub struct AuditService {
    remote: Arc<dyn RemoteCatalog>,
    pending: Arc<dyn PendingSkuSource>,
    page_limit: u32,
}

impl AuditService {
    pub fn new(remote: Arc<dyn RemoteCatalog>, pending: Arc<dyn PendingSkuSource>) -> Self {
        Self { remote, pending, page_limit: PRODUCT_PAGE_LIMIT }
    }

    pub async fn run(&self) -> Result<AuditReport> {
        let pending_skus = self.pending.load_pending_skus().await?;
        let products = self.remote.list_products(self.page_limit).await?;

        let by_code: HashMap<&str, &ProductSummary> = products
            .iter()
            .filter(|product| !product.code.is_empty())
            .map(|product| (product.code.as_str(), product))
            .collect();

        let mut report = AuditReport { total_remote_products: products.len(), ..Default::default() };

        for sku in &pending_skus {
            match by_code.get(sku.as_str()) {
                Some(product) => report.pending_found.push(PendingSkuMatch {
                    sku: sku.clone(),
                    id: product.id,
                    name: product.name.clone(),
                    category: product
                        .category_name
                        .clone()
                        .or_else(|| product.category_id.map(|id| id.to_string()))
                        .unwrap_or_else(|| UNCATEGORIZED.to_string()),
                }),
                None => report.pending_missing.push(sku.clone()),
            }
        }

        report.products_without_category = products
            .iter()
            .filter(|product| product.category_id.is_none())
            .map(|product| UncategorizedProduct {
                sku: product.code.clone(),
                name: product.name.clone(),
            })
            .collect();

        report.summary = AuditSummary {
            total_pending_requested: pending_skus.len(),
            found_pending: report.pending_found.len(),
            missing_pending: report.pending_missing.len(),
            total_without_category: report.products_without_category.len(),
        };

        info!(
            remote_products = report.total_remote_products,
            pending = report.summary.total_pending_requested,
            missing = report.summary.missing_pending,
            "audit complete"
        );
        Ok(report)
    }
}
