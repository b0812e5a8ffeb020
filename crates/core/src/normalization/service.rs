//! Normalization engine - per-SKU category assignment and attribute fill.

use std::collections::BTreeMap;
use std::sync::Arc;

use catalogsync_domain::constants::{NOT_AVAILABLE, PRODUCT_PAGE_LIMIT};
use catalogsync_domain::{
    AttributeRequirement, CatalogSyncError, CategoryId, ExecutionMode, NormalizationResult,
    NormalizationStatus, ProductCharacteristic, ProductUpdate, Result,
};
use tracing::{debug, info, instrument, warn};

use crate::advisor::AttributeAdvisor;
use crate::catalog::ports::{AttributeRequirementRepository, CategoryRepository, RemoteCatalog};

/// Applies the local source of truth to remote products, one SKU at a time.
pub struct NormalizationEngine {
    categories: Arc<dyn CategoryRepository>,
    requirements: Arc<dyn AttributeRequirementRepository>,
    remote: Arc<dyn RemoteCatalog>,
    advisor: Option<Arc<AttributeAdvisor>>,
    product_page_limit: u32,
}

/// Attribute values resolved for one product.
struct Enrichment {
    values: BTreeMap<String, String>,
    characteristics: Vec<ProductCharacteristic>,
    ai_error: Option<String>,
}

impl NormalizationEngine {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        requirements: Arc<dyn AttributeRequirementRepository>,
        remote: Arc<dyn RemoteCatalog>,
    ) -> Self {
        Self {
            categories,
            requirements,
            remote,
            advisor: None,
            product_page_limit: PRODUCT_PAGE_LIMIT,
        }
    }

    pub fn with_advisor(mut self, advisor: Arc<AttributeAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn with_product_page_limit(mut self, limit: u32) -> Self {
        self.product_page_limit = limit.max(1);
        self
    }

    /// Normalize a batch sequentially, one result per SKU in input order.
    ///
    /// # Errors
    /// Only request-fatal errors (configuration, token) abort the batch;
    /// everything else is captured in the SKU's own result.
    #[instrument(skip(self, skus), fields(sku_count = skus.len()))]
    pub async fn batch(
        &self,
        skus: &[String],
        category_id: CategoryId,
        mode: ExecutionMode,
        use_ai: bool,
    ) -> Result<Vec<NormalizationResult>> {
        let mut results = Vec::with_capacity(skus.len());
        for sku in skus {
            results.push(self.apply(sku, category_id, mode, use_ai).await?);
        }

        let succeeded = results.iter().filter(|result| result.is_success()).count();
        info!(total = results.len(), succeeded, ?mode, "normalization batch finished");
        Ok(results)
    }

    /// Normalize a single SKU.
    ///
    /// # Errors
    /// Returns `Err` only for request-fatal errors; see [`Self::batch`].
    pub async fn apply(
        &self,
        sku: &str,
        category_id: CategoryId,
        mode: ExecutionMode,
        use_ai: bool,
    ) -> Result<NormalizationResult> {
        match self.run_pipeline(sku, category_id, mode, use_ai).await {
            Ok(result) => Ok(result),
            Err(err) if err.aborts_request() => Err(err),
            Err(err) => {
                warn!(sku, error = %err, "normalization failed");
                Ok(NormalizationResult::error(sku, err.message()))
            }
        }
    }

    async fn run_pipeline(
        &self,
        sku: &str,
        category_id: CategoryId,
        mode: ExecutionMode,
        use_ai: bool,
    ) -> Result<NormalizationResult> {
        let category = match self.categories.get_category(category_id).await? {
            Some(category) => category,
            None => {
                return Ok(NormalizationResult::error(
                    sku,
                    format!("category {category_id} not synchronized: category does not exist"),
                ))
            }
        };
        let Some(remote_category_id) = category.remote_id else {
            return Ok(NormalizationResult::error(
                sku,
                format!("category '{}' not synchronized with the ERP", category.name),
            ));
        };

        let requirements = self.requirements.list_for_category(category_id).await?;

        let products = self.remote.list_products(self.product_page_limit).await?;
        let Some(summary) = products.into_iter().find(|product| product.code == sku) else {
            return Ok(NormalizationResult::error(
                sku,
                format!("product '{sku}' not found in the ERP product listing"),
            ));
        };

        let product = self.remote.get_product(summary.id).await?;
        debug!(sku, product_id = product.id, "remote product resolved");

        let enrichment = if use_ai && !requirements.is_empty() {
            Some(self.enrich(&product.name, product.advisor_text(), &requirements).await?)
        } else {
            None
        };

        let update = ProductUpdate {
            category_id: remote_category_id,
            characteristics: enrichment
                .as_ref()
                .map(|enrichment| enrichment.characteristics.clone())
                .unwrap_or_default(),
        };
        let (attributes, ai_error) = enrichment
            .map(|enrichment| (enrichment.values, enrichment.ai_error))
            .unwrap_or_default();

        let mut result = NormalizationResult {
            sku: sku.to_string(),
            status: NormalizationStatus::DryRunPending,
            category: Some(category.name.clone()),
            remote_category_id: Some(remote_category_id),
            attributes,
            attributes_updated: Vec::new(),
            ai_error,
            message: None,
        };

        if !mode.permits_writes() {
            info!(sku, category = %category.name, "dry run: product update simulated");
            return Ok(result);
        }

        match self.remote.update_product(product.id, &update).await {
            Ok(()) => {
                result.status = NormalizationStatus::Success;
                result.attributes_updated =
                    update.characteristics.iter().map(|item| item.name.clone()).collect();
                info!(sku, category = %category.name, "product normalized");
                Ok(result)
            }
            Err(err) if err.aborts_request() => Err(err),
            Err(err) => {
                warn!(sku, error = %err, "product update rejected");
                result.status = NormalizationStatus::Error;
                result.message = Some(err.message());
                Ok(result)
            }
        }
    }

    async fn enrich(
        &self,
        title: &str,
        description: &str,
        requirements: &[AttributeRequirement],
    ) -> Result<Enrichment> {
        let advisor = self.advisor.as_ref().ok_or_else(|| {
            CatalogSyncError::Config("attribute advisor is not configured (ANTHROPIC_API_KEY)".into())
        })?;

        let mut names: Vec<String> = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            if !names.contains(&requirement.attribute_name) {
                names.push(requirement.attribute_name.clone());
            }
        }
        let outcome = advisor.enrich(title, description, &names).await;

        let mut values = BTreeMap::new();
        let mut characteristics = Vec::new();
        for requirement in requirements {
            let suggested = outcome
                .values
                .get(&requirement.attribute_name)
                .map_or(NOT_AVAILABLE, String::as_str);
            let value = match (&requirement.default_value, suggested) {
                (Some(default), NOT_AVAILABLE) => default.clone(),
                _ => suggested.to_string(),
            };

            if value != NOT_AVAILABLE
                && !characteristics
                    .iter()
                    .any(|item: &ProductCharacteristic| item.name == requirement.attribute_name)
            {
                characteristics.push(ProductCharacteristic {
                    name: requirement.attribute_name.clone(),
                    value: value.clone(),
                });
            }
            values.insert(requirement.attribute_name.clone(), value);
        }

        Ok(Enrichment { values, characteristics, ai_error: outcome.diagnostic })
    }
}
