//! Catalog entities: the local category tree and the ERP's remote records.

use serde::{Deserialize, Serialize};

/// Local category identity.
pub type CategoryId = i64;

/// Identity assigned by the ERP.
pub type RemoteId = i64;

/// Node of the internally owned category forest.
///
/// `remote_id` moves from `None` to `Some` exactly once, when the node has
/// been created remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
    pub remote_id: Option<RemoteId>,
}

impl Category {
    pub fn is_synced(&self) -> bool {
        self.remote_id.is_some()
    }
}

/// Marketplace-mandated attribute for products in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRequirement {
    pub category_id: CategoryId,
    pub marketplace_id: String,
    pub attribute_name: String,
    pub is_required: bool,
    pub default_value: Option<String>,
}

/// Category record as returned by the ERP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCategory {
    pub id: RemoteId,
    pub name: String,
    pub parent_id: Option<RemoteId>,
}

/// Row of the ERP's product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: RemoteId,
    pub code: String,
    pub name: String,
    pub category_id: Option<RemoteId>,
    pub category_name: Option<String>,
}

/// Free-form name/value pair attached to a remote product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCharacteristic {
    pub name: String,
    pub value: String,
}

/// Full product record as returned by the ERP. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProduct {
    pub id: RemoteId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<RemoteId>,
    pub characteristics: Vec<ProductCharacteristic>,
}

impl RemoteProduct {
    /// Text handed to the advisor: the description when present, otherwise
    /// the title alone.
    pub fn advisor_text(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => &self.name,
        }
    }
}

/// Partial update applied to a remote product: always the category
/// reference, plus characteristics when attributes were enriched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub category_id: RemoteId,
    pub characteristics: Vec<ProductCharacteristic>,
}
