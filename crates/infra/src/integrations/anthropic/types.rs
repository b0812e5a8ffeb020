/// Anthropic Messages API types
use catalogsync_domain::CatalogSyncError;
use serde::{Deserialize, Serialize};

/// Anthropic API error types
#[derive(Debug, thiserror::Error)]
pub enum AnthropicError {
    /// Network-level error (connection failed, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// API returned a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Rejected API key
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Response body doesn't match the Messages API schema
    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),
}

impl From<AnthropicError> for CatalogSyncError {
    fn from(value: AnthropicError) -> Self {
        match value {
            AnthropicError::Network(msg) => CatalogSyncError::Network(msg),
            AnthropicError::Api { status, message } => {
                CatalogSyncError::RemoteApi { status, body: message }
            }
            AnthropicError::Authentication(msg) => {
                CatalogSyncError::RemoteApi { status: 401, body: msg }
            }
            AnthropicError::InvalidSchema(msg) => CatalogSyncError::Internal(msg),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl MessagesResponse {
    /// Concatenated text of every `text` block, in order.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
}
