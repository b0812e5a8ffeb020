/// Anthropic integration for attribute enrichment
///
/// [`AnthropicModel`] implements the `CompletionModel` port for a single model
/// name over the Messages API. [`build_advisor`] assembles the advisor's
/// fallback chain from configuration.
///
/// # Error Handling
///
/// - **Network errors / 5xx**: retried by `HttpClient`, then reported
/// - **4xx (unknown model, bad key)**: reported immediately
///
/// Every reported error moves the advisor on to the next model.
pub mod client;
pub mod types;

pub use client::{build_advisor, AnthropicModel};
pub use types::AnthropicError;
