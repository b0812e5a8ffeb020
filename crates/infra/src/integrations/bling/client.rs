//! Bling API v3 catalog client.

use std::sync::Arc;

use async_trait::async_trait;
use catalogsync_core::{AccessTokenProvider, RemoteCatalog};
use catalogsync_domain::{
    Config, ProductSummary, ProductUpdate, RemoteCategory, RemoteId, RemoteProduct, Result,
};
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::types::{
    BlingCategory, BlingProduct, BlingProductSummary, CategoryCreate, CreatedRecord, ItemEnvelope,
    ListEnvelope, ProductPatch,
};
use crate::http::{ensure_success, read_json, single_attempt_client, HttpClient};

/// Typed client for the ERP's catalog endpoints.
///
/// Every call fetches a bearer token from the injected provider and makes a
/// single attempt; creates and updates are not idempotent, so nothing here
/// retries.
pub struct BlingClient {
    base_url: String,
    http_client: HttpClient,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl BlingClient {
    pub fn new(
        base_url: impl Into<String>,
        http_client: HttpClient,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string(), http_client, tokens }
    }

    /// Build from configuration with a single-attempt transport.
    pub fn from_config(config: &Config, tokens: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let http_client = single_attempt_client(config.http_timeout()?)?;
        Ok(Self::new(config.erp.base_url.clone(), http_client, tokens))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.tokens.access_token().await?;
        Ok(self
            .http_client
            .request(method, self.url(path))
            .bearer_auth(token)
            .header(ACCEPT, "application/json"))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.authorized(Method::GET, path).await?;
        let response = self.http_client.send(request).await?;
        let response = ensure_success(response, &[StatusCode::OK]).await?;
        read_json(response).await
    }
}

#[async_trait]
impl RemoteCatalog for BlingClient {
    async fn list_categories(&self) -> Result<Vec<RemoteCategory>> {
        let envelope: ListEnvelope<BlingCategory> = self.get_json("categorias/produtos").await?;
        debug!(count = envelope.data.len(), "remote categories fetched");
        Ok(envelope.data.into_iter().map(RemoteCategory::from).collect())
    }

    async fn list_products(&self, limit: u32) -> Result<Vec<ProductSummary>> {
        let envelope: ListEnvelope<BlingProductSummary> =
            self.get_json(&format!("produtos?limite={limit}")).await?;
        debug!(count = envelope.data.len(), limit, "remote products fetched");
        Ok(envelope.data.into_iter().map(ProductSummary::from).collect())
    }

    async fn get_product(&self, id: RemoteId) -> Result<RemoteProduct> {
        let envelope: ItemEnvelope<BlingProduct> = self.get_json(&format!("produtos/{id}")).await?;
        Ok(envelope.data.into())
    }

    #[instrument(skip(self, update), fields(category_id = update.category_id))]
    async fn update_product(&self, id: RemoteId, update: &ProductUpdate) -> Result<()> {
        let request = self
            .authorized(Method::PATCH, &format!("produtos/{id}"))
            .await?
            .json(&ProductPatch::from(update));
        let response = self.http_client.send(request).await?;
        ensure_success(response, &[StatusCode::OK, StatusCode::NO_CONTENT]).await?;
        info!(product_id = id, attributes = update.characteristics.len(), "remote product updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_category(
        &self,
        name: &str,
        parent_remote_id: Option<RemoteId>,
    ) -> Result<RemoteCategory> {
        let body = CategoryCreate { descricao: name, id_categoria_pai: parent_remote_id };
        let request = self.authorized(Method::POST, "categorias/produtos").await?.json(&body);
        let response = self.http_client.send(request).await?;
        let response = ensure_success(response, &[StatusCode::CREATED]).await?;
        let created: ItemEnvelope<CreatedRecord> = read_json(response).await?;

        Ok(RemoteCategory {
            id: created.data.id,
            name: name.to_string(),
            parent_id: parent_remote_id,
        })
    }

    async fn list_stores(&self) -> Result<Value> {
        let mut body: Value = self.get_json("canais-venda").await?;
        Ok(match body.get_mut("data") {
            Some(data) => data.take(),
            None => body,
        })
    }
}
