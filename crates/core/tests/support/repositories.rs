//! In-memory repositories for the local category tree.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalogsync_core::{AttributeRequirementRepository, CategoryRepository, PendingSkuSource};
use catalogsync_domain::{
    AttributeRequirement, CatalogSyncError, Category, CategoryId, RemoteId, Result,
};

/// Category store keyed by id. Enforces the set-once rule on `remote_id`.
#[derive(Default, Clone)]
pub struct MockCategoryRepository {
    categories: Arc<Mutex<BTreeMap<CategoryId, Category>>>,
    link_failures: Arc<Mutex<HashMap<CategoryId, CatalogSyncError>>>,
}

impl MockCategoryRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        let repo = Self::default();
        for category in categories {
            repo.categories.lock().unwrap().insert(category.id, category);
        }
        repo
    }

    /// `set_remote_id` fails with `err` for this category.
    pub fn failing_link(self, id: CategoryId, err: CatalogSyncError) -> Self {
        self.link_failures.lock().unwrap().insert(id, err);
        self
    }

    pub fn get(&self, id: CategoryId) -> Option<Category> {
        self.categories.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl CategoryRepository for MockCategoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.lock().unwrap().values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.get(id))
    }

    async fn set_remote_id(&self, id: CategoryId, remote_id: RemoteId) -> Result<()> {
        if let Some(err) = self.link_failures.lock().unwrap().get(&id) {
            return Err(err.clone());
        }
        let mut categories = self.categories.lock().unwrap();
        let category = categories
            .get_mut(&id)
            .ok_or_else(|| CatalogSyncError::NotFound(format!("category {id}")))?;
        match category.remote_id {
            Some(existing) if existing != remote_id => Err(CatalogSyncError::InvalidInput(
                format!("category {id} already linked to {existing}"),
            )),
            _ => {
                category.remote_id = Some(remote_id);
                Ok(())
            }
        }
    }

    async fn insert_category(&self, name: &str, parent_id: Option<CategoryId>) -> Result<Category> {
        let mut categories = self.categories.lock().unwrap();
        let id = categories.keys().next_back().copied().unwrap_or(0) + 1;
        let category = Category { id, name: name.to_string(), parent_id, remote_id: None };
        categories.insert(id, category.clone());
        Ok(category)
    }
}

#[derive(Default, Clone)]
pub struct MockRequirementRepository {
    requirements: Arc<Vec<AttributeRequirement>>,
}

impl MockRequirementRepository {
    pub fn new(requirements: Vec<AttributeRequirement>) -> Self {
        Self { requirements: Arc::new(requirements) }
    }
}

#[async_trait]
impl AttributeRequirementRepository for MockRequirementRepository {
    async fn list_for_category(&self, category_id: CategoryId) -> Result<Vec<AttributeRequirement>> {
        Ok(self
            .requirements
            .iter()
            .filter(|requirement| requirement.category_id == category_id)
            .cloned()
            .collect())
    }
}

pub struct StaticPendingSkus(pub Vec<String>);

#[async_trait]
impl PendingSkuSource for StaticPendingSkus {
    async fn load_pending_skus(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

pub fn category(id: CategoryId, name: &str, parent_id: Option<CategoryId>) -> Category {
    Category { id, name: name.to_string(), parent_id, remote_id: None }
}

pub fn requirement(
    category_id: CategoryId,
    name: &str,
    default_value: Option<&str>,
) -> AttributeRequirement {
    AttributeRequirement {
        category_id,
        marketplace_id: "mercado_livre".to_string(),
        attribute_name: name.to_string(),
        is_required: true,
        default_value: default_value.map(str::to_string),
    }
}
