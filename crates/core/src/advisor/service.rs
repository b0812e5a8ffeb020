//! Attribute advisor with a ranked model-fallback chain.

use std::collections::BTreeMap;
use std::sync::Arc;

use catalogsync_domain::constants::{FALLBACK_ADVISOR_MODELS, NOT_AVAILABLE};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::extract::extract_json_object;
use super::ports::CompletionModel;

/// Result of one enrichment call. Never an error: on total failure every
/// requested attribute is `"N/A"` and `diagnostic` says why.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisorOutcome {
    pub values: BTreeMap<String, String>,
    pub model_used: Option<String>,
    pub diagnostic: Option<String>,
}

/// Operator-configured model first, then the built-in fallbacks, without
/// duplicates.
pub fn model_chain(configured: &str) -> Vec<String> {
    let mut chain: Vec<String> = Vec::new();
    let configured = configured.trim();
    if !configured.is_empty() {
        chain.push(configured.to_string());
    }
    for fallback in FALLBACK_ADVISOR_MODELS {
        if !chain.iter().any(|name| name == fallback) {
            chain.push((*fallback).to_string());
        }
    }
    chain
}

/// Prompt asking for one JSON object keyed by exactly the requested names.
pub fn build_prompt(title: &str, description: &str, attributes: &[String]) -> String {
    let example = attributes
        .iter()
        .map(|name| format!("  \"{}\": \"<value>\"", name.replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "You are an e-commerce catalog specialist working with ERP product data.\n\
         Analyze the product below and extract a value for each listed attribute.\n\n\
         Product: {title}\n\
         Description: {description}\n\n\
         Required attributes: {names}\n\n\
         Reply with ONLY one raw JSON object (no markdown, no commentary) whose keys are \
         exactly the attribute names above, for example:\n\
         {{\n{example}\n}}\n\
         If a value cannot be determined, use \"{na}\".",
        names = attributes.join(", "),
        na = NOT_AVAILABLE,
    )
}

/// LLM-backed enrichment client.
pub struct AttributeAdvisor {
    models: Vec<Arc<dyn CompletionModel>>,
}

impl AttributeAdvisor {
    /// Candidates are tried in the given order.
    pub fn new(models: Vec<Arc<dyn CompletionModel>>) -> Self {
        Self { models }
    }

    pub fn model_names(&self) -> Vec<String> {
        self.models.iter().map(|model| model.name().to_string()).collect()
    }

    /// Map each requested attribute to a value or `"N/A"`.
    pub async fn enrich(
        &self,
        title: &str,
        description: &str,
        attributes: &[String],
    ) -> AdvisorOutcome {
        if attributes.is_empty() {
            return AdvisorOutcome::default();
        }

        let prompt = build_prompt(title, description, attributes);
        let mut failures = Vec::new();

        for model in &self.models {
            match model.complete(&prompt).await {
                Ok(text) => {
                    let parsed = extract_json_object(&text).unwrap_or_else(|| {
                        warn!(model = model.name(), "advisor reply contained no JSON object");
                        Map::new()
                    });
                    info!(model = model.name(), "advisor enrichment complete");
                    return AdvisorOutcome {
                        values: resolve_values(attributes, &parsed),
                        model_used: Some(model.name().to_string()),
                        diagnostic: None,
                    };
                }
                Err(err) => {
                    debug!(model = model.name(), error = %err, "advisor model failed, trying next");
                    failures.push(format!("{}: {}", model.name(), err));
                }
            }
        }

        let diagnostic = if failures.is_empty() {
            "no advisor models configured".to_string()
        } else {
            format!("all advisor models failed ({})", failures.join("; "))
        };
        warn!(diagnostic = %diagnostic, "attribute enrichment unavailable");

        AdvisorOutcome {
            values: attributes
                .iter()
                .map(|name| (name.clone(), NOT_AVAILABLE.to_string()))
                .collect(),
            model_used: None,
            diagnostic: Some(diagnostic),
        }
    }
}

fn resolve_values(attributes: &[String], parsed: &Map<String, Value>) -> BTreeMap<String, String> {
    attributes
        .iter()
        .map(|name| {
            let value = parsed.get(name).and_then(value_as_text);
            (name.clone(), value.unwrap_or_else(|| NOT_AVAILABLE.to_string()))
        })
        .collect()
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.trim().to_string()),
        other => Some(other.to_string()),
    }
}
