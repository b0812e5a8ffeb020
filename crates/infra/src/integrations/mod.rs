//! External service integrations

pub mod anthropic;
pub mod bling;

pub use anthropic::{build_advisor, AnthropicModel};
pub use bling::{BlingClient, BlingOAuthClient};
