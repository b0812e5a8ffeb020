//! Recording double for the ERP catalog.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalogsync_core::RemoteCatalog;
use catalogsync_domain::{
    CatalogSyncError, ProductSummary, ProductUpdate, RemoteCategory, RemoteId, RemoteProduct,
    Result,
};
use serde_json::{json, Value};

/// Every call the double received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    ListCategories,
    ListProducts(u32),
    GetProduct(RemoteId),
    UpdateProduct(RemoteId, ProductUpdate),
    CreateCategory { name: String, parent_remote_id: Option<RemoteId> },
    ListStores,
}

impl RemoteCall {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::UpdateProduct(..) | Self::CreateCategory { .. })
    }
}

#[derive(Clone)]
pub struct RecordingRemoteCatalog {
    inner: Arc<Mutex<State>>,
}

struct State {
    calls: Vec<RemoteCall>,
    products: Vec<RemoteProduct>,
    next_remote_id: RemoteId,
    failing_categories: HashSet<String>,
    failing_updates: HashMap<RemoteId, CatalogSyncError>,
    create_error: Option<CatalogSyncError>,
}

impl Default for RecordingRemoteCatalog {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(State {
                calls: Vec::new(),
                products: Vec::new(),
                next_remote_id: 1000,
                failing_categories: HashSet::new(),
                failing_updates: HashMap::new(),
                create_error: None,
            })),
        }
    }
}

impl RecordingRemoteCatalog {
    pub fn with_product(self, id: RemoteId, code: &str, name: &str, description: &str) -> Self {
        self.inner.lock().unwrap().products.push(RemoteProduct {
            id,
            code: code.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()).filter(|text| !text.is_empty()),
            category_id: None,
            characteristics: Vec::new(),
        });
        self
    }

    /// `create_category` fails with a 400 for this name.
    pub fn failing_category(self, name: &str) -> Self {
        self.inner.lock().unwrap().failing_categories.insert(name.to_string());
        self
    }

    /// Every `create_category` fails with this error.
    pub fn failing_creates_with(self, err: CatalogSyncError) -> Self {
        self.inner.lock().unwrap().create_error = Some(err);
        self
    }

    pub fn failing_update(self, id: RemoteId, err: CatalogSyncError) -> Self {
        self.inner.lock().unwrap().failing_updates.insert(id, err);
        self
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> Vec<RemoteCall> {
        self.calls().into_iter().filter(RemoteCall::is_mutation).collect()
    }

    fn record(&self, call: RemoteCall) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl RemoteCatalog for RecordingRemoteCatalog {
    async fn list_categories(&self) -> Result<Vec<RemoteCategory>> {
        self.record(RemoteCall::ListCategories);
        Ok(Vec::new())
    }

    async fn list_products(&self, limit: u32) -> Result<Vec<ProductSummary>> {
        self.record(RemoteCall::ListProducts(limit));
        let state = self.inner.lock().unwrap();
        Ok(state
            .products
            .iter()
            .take(limit as usize)
            .map(|product| ProductSummary {
                id: product.id,
                code: product.code.clone(),
                name: product.name.clone(),
                category_id: product.category_id,
                category_name: None,
            })
            .collect())
    }

    async fn get_product(&self, id: RemoteId) -> Result<RemoteProduct> {
        self.record(RemoteCall::GetProduct(id));
        let state = self.inner.lock().unwrap();
        state
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(CatalogSyncError::RemoteApi { status: 404, body: "not found".into() })
    }

    async fn update_product(&self, id: RemoteId, update: &ProductUpdate) -> Result<()> {
        self.record(RemoteCall::UpdateProduct(id, update.clone()));
        match self.inner.lock().unwrap().failing_updates.get(&id) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn create_category(
        &self,
        name: &str,
        parent_remote_id: Option<RemoteId>,
    ) -> Result<RemoteCategory> {
        self.record(RemoteCall::CreateCategory { name: name.to_string(), parent_remote_id });
        let mut state = self.inner.lock().unwrap();
        if let Some(err) = &state.create_error {
            return Err(err.clone());
        }
        if state.failing_categories.contains(name) {
            return Err(CatalogSyncError::RemoteApi {
                status: 400,
                body: format!("{{\"error\":\"cannot create {name}\"}}"),
            });
        }
        state.next_remote_id += 1;
        Ok(RemoteCategory { id: state.next_remote_id, name: name.to_string(), parent_id: parent_remote_id })
    }

    async fn list_stores(&self) -> Result<Value> {
        self.record(RemoteCall::ListStores);
        Ok(json!([{ "id": 1, "descricao": "Loja Virtual" }]))
    }
}
