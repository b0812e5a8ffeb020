//! LLM-backed attribute enrichment

pub mod extract;
pub mod ports;
pub mod service;

pub use extract::extract_json_object;
pub use ports::CompletionModel;
pub use service::{build_prompt, model_chain, AdvisorOutcome, AttributeAdvisor};
