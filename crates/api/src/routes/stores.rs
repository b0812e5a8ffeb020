use axum::extract::State;
use axum::Json;
use catalogsync_core::RemoteCatalog;
use serde_json::{json, Value};

use super::SharedContext;
use crate::ApiResult;

/// Passthrough of the ERP's sales channel list.
pub async fn list_stores(State(ctx): State<SharedContext>) -> ApiResult<Value> {
    let stores = ctx.remote.list_stores().await?;
    Ok(Json(json!({ "stores": stores })))
}
