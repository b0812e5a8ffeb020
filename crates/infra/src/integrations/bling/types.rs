//! Wire types for the Bling API v3 catalog endpoints.

use catalogsync_domain::{
    ProductCharacteristic, ProductSummary, ProductUpdate, RemoteCategory, RemoteId, RemoteProduct,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"data": [...]}` list envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// `{"data": {...}}` single-record envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemEnvelope<T> {
    pub data: T,
}

/// Nested `{"id": ..}` reference. Bling uses `0` for "no reference".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct IdRef {
    #[serde(default)]
    pub id: Option<RemoteId>,
}

impl IdRef {
    fn resolved(&self) -> Option<RemoteId> {
        self.id.filter(|id| *id != 0)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlingCategory {
    pub id: RemoteId,
    #[serde(default)]
    pub descricao: String,
    #[serde(rename = "categoriaPai", default)]
    pub categoria_pai: Option<IdRef>,
}

impl From<BlingCategory> for RemoteCategory {
    fn from(value: BlingCategory) -> Self {
        Self {
            id: value.id,
            name: value.descricao,
            parent_id: value.categoria_pai.and_then(|parent| parent.resolved()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProductCategoryRef {
    #[serde(default)]
    pub id: Option<RemoteId>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
}

impl ProductCategoryRef {
    fn remote_id(&self) -> Option<RemoteId> {
        self.id.filter(|id| *id != 0)
    }

    fn label(&self) -> Option<String> {
        self.nome.clone().or_else(|| self.descricao.clone()).filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlingProductSummary {
    pub id: RemoteId,
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub categoria: Option<ProductCategoryRef>,
}

impl From<BlingProductSummary> for ProductSummary {
    fn from(value: BlingProductSummary) -> Self {
        let category = value.categoria.unwrap_or_default();
        Self {
            id: value.id,
            code: value.codigo,
            name: value.nome,
            category_id: category.remote_id(),
            category_name: category.label(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlingProduct {
    pub id: RemoteId,
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub nome: String,
    #[serde(rename = "descricaoCurta", default)]
    pub descricao_curta: Option<String>,
    #[serde(rename = "descricaoComplementar", default)]
    pub descricao_complementar: Option<String>,
    #[serde(default)]
    pub categoria: Option<ProductCategoryRef>,
    /// Shape varies between accounts; only `[{nome, valor}]` arrays are read.
    #[serde(default)]
    pub caracteristicas: Value,
}

impl From<BlingProduct> for RemoteProduct {
    fn from(value: BlingProduct) -> Self {
        let description = [value.descricao_curta, value.descricao_complementar]
            .into_iter()
            .flatten()
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty());

        Self {
            id: value.id,
            code: value.codigo,
            name: value.nome,
            description,
            category_id: value.categoria.as_ref().and_then(ProductCategoryRef::remote_id),
            characteristics: parse_characteristics(&value.caracteristicas),
        }
    }
}

fn parse_characteristics(value: &Value) -> Vec<ProductCharacteristic> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let name = item.get("nome")?.as_str()?.to_string();
            let value = match item.get("valor")? {
                Value::String(text) => text.clone(),
                Value::Null => return None,
                other => other.to_string(),
            };
            Some(ProductCharacteristic { name, value })
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub(crate) struct CharacteristicPayload<'a> {
    pub nome: &'a str,
    pub valor: &'a str,
}

/// Partial product update body for `PATCH produtos/{id}`.
#[derive(Debug, Serialize)]
pub(crate) struct ProductPatch<'a> {
    pub categoria: IdRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub caracteristicas: Vec<CharacteristicPayload<'a>>,
}

impl<'a> From<&'a ProductUpdate> for ProductPatch<'a> {
    fn from(update: &'a ProductUpdate) -> Self {
        Self {
            categoria: IdRef { id: Some(update.category_id) },
            caracteristicas: update
                .characteristics
                .iter()
                .map(|item| CharacteristicPayload { nome: &item.name, valor: &item.value })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryCreate<'a> {
    pub descricao: &'a str,
    #[serde(rename = "idCategoriaPai", skip_serializing_if = "Option::is_none")]
    pub id_categoria_pai: Option<RemoteId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedRecord {
    pub id: RemoteId,
}
