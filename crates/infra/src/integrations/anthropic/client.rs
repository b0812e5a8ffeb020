/// Anthropic Messages API client backing the attribute advisor
use std::sync::Arc;

use async_trait::async_trait;
use catalogsync_core::{model_chain, AttributeAdvisor, CompletionModel};
use catalogsync_domain::constants::ADVISOR_MAX_TOKENS;
use catalogsync_domain::{CatalogSyncError, Config, Result};
use reqwest::Method;
use tracing::debug;

use super::types::{AnthropicError, MessagesRequest, MessagesResponse, RequestMessage};
use crate::http::{single_attempt_client, HttpClient};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One model of the advisor's fallback chain.
#[derive(Clone)]
pub struct AnthropicModel {
    http_client: HttpClient,
    api_key: String,
    model: String,
    api_url: String,
}

impl AnthropicModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            model: model.into(),
            api_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Point the client at another Messages endpoint (tests, proxies).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    async fn call_api(&self, prompt: &str) -> std::result::Result<String, AnthropicError> {
        let payload = MessagesRequest {
            model: &self.model,
            max_tokens: ADVISOR_MAX_TOKENS,
            messages: vec![RequestMessage { role: "user", content: prompt }],
        };

        let request_builder = self
            .http_client
            .request(Method::POST, &self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&payload);

        let response = self.http_client.send(request_builder).await.map_err(|err| match err {
            CatalogSyncError::Network(msg) | CatalogSyncError::Internal(msg) => {
                AnthropicError::Network(msg)
            }
            other => AnthropicError::Network(format!("HTTP error: {}", other)),
        })?;

        let status = response.status();
        debug!(model = %self.model, status = status.as_u16(), "Received Anthropic API response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 | 403 => AnthropicError::Authentication(format!(
                    "Invalid API key ({}): {}",
                    status.as_u16(),
                    message
                )),
                code => AnthropicError::Api { status: code, message },
            });
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AnthropicError::InvalidSchema(format!("Failed to parse response: {}", e)))?;

        Ok(body.text())
    }
}

#[async_trait]
impl CompletionModel for AnthropicModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.call_api(prompt).await.map_err(CatalogSyncError::from)
    }
}

/// Advisor over the configured model followed by the built-in fallbacks,
/// all sharing one transport.
///
/// # Errors
/// `Config` when `ANTHROPIC_API_KEY` is missing or the timeout is invalid.
pub fn build_advisor(config: &Config) -> Result<AttributeAdvisor> {
    build_advisor_at(config, ANTHROPIC_API_URL)
}

/// Each model gets exactly one request; the chain itself is the fallback,
/// so the transport never replays a billed call.
fn build_advisor_at(config: &Config, api_url: &str) -> Result<AttributeAdvisor> {
    let advisor = config.require_advisor()?;
    let http_client = single_attempt_client(config.http_timeout()?)?;

    let models = model_chain(&advisor.model)
        .into_iter()
        .map(|name| {
            Arc::new(
                AnthropicModel::new(advisor.api_key.clone(), name, http_client.clone())
                    .with_api_url(api_url),
            ) as Arc<dyn CompletionModel>
        })
        .collect();

    Ok(AttributeAdvisor::new(models))
}
