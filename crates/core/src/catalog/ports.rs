//! Catalog port interfaces

use async_trait::async_trait;
use catalogsync_domain::{
    AttributeRequirement, Category, CategoryId, ProductSummary, ProductUpdate, RemoteCategory,
    RemoteId, RemoteProduct, Result,
};
use serde_json::Value;

/// Local source-of-truth category tree.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>>;

    /// Record the remote identity of a category. Set-once: fails with
    /// `InvalidInput` if the category already carries a different remote id.
    async fn set_remote_id(&self, id: CategoryId, remote_id: RemoteId) -> Result<()>;

    /// Insert a new unsynchronized category. Used by seeding tooling.
    async fn insert_category(&self, name: &str, parent_id: Option<CategoryId>) -> Result<Category>;
}

/// Read-only attribute requirements per category.
#[async_trait]
pub trait AttributeRequirementRepository: Send + Sync {
    async fn list_for_category(&self, category_id: CategoryId) -> Result<Vec<AttributeRequirement>>;
}

/// Typed access to the ERP's category and product endpoints.
///
/// Any non-success status is a `RemoteApi` error carrying status and body.
/// Implementations never retry.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<RemoteCategory>>;

    /// First page only.
    async fn list_products(&self, limit: u32) -> Result<Vec<ProductSummary>>;

    async fn get_product(&self, id: RemoteId) -> Result<RemoteProduct>;

    async fn update_product(&self, id: RemoteId, update: &ProductUpdate) -> Result<()>;

    async fn create_category(
        &self,
        name: &str,
        parent_remote_id: Option<RemoteId>,
    ) -> Result<RemoteCategory>;

    /// Sales channels configured in the ERP, passed through untouched.
    async fn list_stores(&self) -> Result<Value>;
}

/// Static list of SKUs awaiting normalization.
#[async_trait]
pub trait PendingSkuSource: Send + Sync {
    async fn load_pending_skus(&self) -> Result<Vec<String>>;
}
