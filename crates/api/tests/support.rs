#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use catalogsync_api::{router, AppContext, OAuthStateStore};
use catalogsync_core::{
    AttributeRequirementRepository, CategoryRepository, CredentialStore, OAuthTokenClient,
    PendingSkuSource, RemoteCatalog, TokenManager,
};
use catalogsync_domain::{
    AttributeRequirement, CatalogSyncError, Category, CategoryId, Config, OAuthToken,
    ProductSummary, ProductUpdate, RemoteCategory, RemoteId, RemoteProduct, Result, TokenGrant,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Default)]
pub struct MemoryCategories {
    rows: Mutex<Vec<Category>>,
}

impl MemoryCategories {
    pub fn with(categories: Vec<Category>) -> Self {
        Self { rows: Mutex::new(categories) }
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategories {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.rows.lock().unwrap().iter().find(|row| row.id == id).cloned())
    }

    async fn set_remote_id(&self, id: CategoryId, remote_id: RemoteId) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| CatalogSyncError::NotFound(format!("category {id}")))?;
        row.remote_id = Some(remote_id);
        Ok(())
    }

    async fn insert_category(&self, name: &str, parent_id: Option<CategoryId>) -> Result<Category> {
        let mut rows = self.rows.lock().unwrap();
        let category = Category {
            id: rows.len() as CategoryId + 1,
            name: name.to_string(),
            parent_id,
            remote_id: None,
        };
        rows.push(category.clone());
        Ok(category)
    }
}

#[derive(Default)]
pub struct NoRequirements;

#[async_trait]
impl AttributeRequirementRepository for NoRequirements {
    async fn list_for_category(&self, _category_id: CategoryId) -> Result<Vec<AttributeRequirement>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    token: Mutex<Option<OAuthToken>>,
}

impl MemoryStore {
    pub fn current(&self) -> Option<OAuthToken> {
        self.token.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn load(&self) -> Result<Option<OAuthToken>> {
        Ok(self.current())
    }

    async fn save(&self, token: &OAuthToken) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.clone());
        Ok(())
    }
}

/// Token endpoint accepting the code `good-code` only.
pub struct StubOAuth {
    pub configured: bool,
}

#[async_trait]
impl OAuthTokenClient for StubOAuth {
    fn authorization_url(&self, state: &str) -> Result<String> {
        if !self.configured {
            return Err(CatalogSyncError::Config("BLING_CLIENT_ID and BLING_CLIENT_SECRET must be set".into()));
        }
        Ok(format!("https://erp.test/oauth/authorize?response_type=code&client_id=id&state={state}"))
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
        if code != "good-code" {
            return Err(CatalogSyncError::RemoteApi { status: 400, body: "invalid_grant".into() });
        }
        Ok(TokenGrant {
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
            expires_in: 21_600,
            scope: None,
        })
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenGrant> {
        Err(CatalogSyncError::Refresh("refresh not expected".into()))
    }
}

/// ERP double that records mutations and serves a fixed product list.
#[derive(Default)]
pub struct StubRemote {
    pub products: Vec<RemoteProduct>,
    pub created: Mutex<Vec<String>>,
    pub updates: Mutex<Vec<(RemoteId, ProductUpdate)>>,
}

impl StubRemote {
    pub fn with_product(mut self, id: RemoteId, code: &str) -> Self {
        self.products.push(RemoteProduct {
            id,
            code: code.to_string(),
            name: format!("Product {code}"),
            description: None,
            category_id: None,
            characteristics: Vec::new(),
        });
        self
    }

    pub fn mutation_count(&self) -> usize {
        self.created.lock().unwrap().len() + self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteCatalog for StubRemote {
    async fn list_categories(&self) -> Result<Vec<RemoteCategory>> {
        Ok(Vec::new())
    }

    async fn list_products(&self, limit: u32) -> Result<Vec<ProductSummary>> {
        Ok(self
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
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| CatalogSyncError::RemoteApi { status: 404, body: "not found".into() })
    }

    async fn update_product(&self, id: RemoteId, update: &ProductUpdate) -> Result<()> {
        self.updates.lock().unwrap().push((id, update.clone()));
        Ok(())
    }

    async fn create_category(
        &self,
        name: &str,
        parent_remote_id: Option<RemoteId>,
    ) -> Result<RemoteCategory> {
        let mut created = self.created.lock().unwrap();
        created.push(name.to_string());
        Ok(RemoteCategory {
            id: 500 + created.len() as RemoteId,
            name: name.to_string(),
            parent_id: parent_remote_id,
        })
    }

    async fn list_stores(&self) -> Result<Value> {
        Ok(json!([{"id": 1, "descricao": "Mercado Livre"}]))
    }
}

pub struct FixedPending(pub Vec<String>);

#[async_trait]
impl PendingSkuSource for FixedPending {
    async fn load_pending_skus(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

pub fn category(id: CategoryId, name: &str, parent_id: Option<CategoryId>, remote_id: Option<RemoteId>) -> Category {
    Category { id, name: name.to_string(), parent_id, remote_id }
}

/// Router over in-memory doubles plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub categories: Arc<MemoryCategories>,
    pub remote: Arc<StubRemote>,
    pub store: Arc<MemoryStore>,
}

pub struct TestAppBuilder {
    categories: Vec<Category>,
    remote: StubRemote,
    pending: Vec<String>,
    oauth_configured: bool,
    token: Option<OAuthToken>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            remote: StubRemote::default(),
            pending: Vec::new(),
            oauth_configured: true,
            token: None,
        }
    }

    pub fn categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn remote(mut self, remote: StubRemote) -> Self {
        self.remote = remote;
        self
    }

    pub fn pending(mut self, skus: &[&str]) -> Self {
        self.pending = skus.iter().map(|sku| sku.to_string()).collect();
        self
    }

    pub fn without_oauth(mut self) -> Self {
        self.oauth_configured = false;
        self
    }

    pub fn authorized(mut self) -> Self {
        let now = Utc::now();
        self.token = Some(OAuthToken {
            access_token: "access-0".into(),
            refresh_token: "refresh-0".into(),
            expires_at: now + Duration::hours(6),
            scope: None,
            created_at: now,
            updated_at: now,
        });
        self
    }

    pub fn build(self) -> TestApp {
        let categories = Arc::new(MemoryCategories::with(self.categories));
        let remote = Arc::new(self.remote);
        let store = Arc::new(MemoryStore::default());
        *store.token.lock().unwrap() = self.token;

        let tokens = Arc::new(TokenManager::new(
            store.clone(),
            Arc::new(StubOAuth { configured: self.oauth_configured }),
        ));

        let ctx = AppContext {
            config: Config::default(),
            categories: categories.clone(),
            requirements: Arc::new(NoRequirements),
            tokens,
            remote: remote.clone(),
            advisor: None,
            pending_skus: Arc::new(FixedPending(self.pending)),
            oauth_states: OAuthStateStore::default(),
        };

        TestApp { router: router(Arc::new(ctx)), categories, remote, store }
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// State issued by a fresh `/auth/login-url` call.
    pub async fn issued_state(&self) -> String {
        let (_, body) = self.get("/auth/login-url").await;
        body["state"].as_str().unwrap().to_string()
    }

    pub async fn post(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::post(uri).body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response<Body> = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, value)
    }
}
