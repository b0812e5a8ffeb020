//! Product normalization routes.
//!
//! Both routes run the same batch; they differ only in where the SKU list
//! comes from.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use catalogsync_core::PendingSkuSource;
use catalogsync_domain::{CategoryId, ExecutionMode, NormalizationResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{default_true, SharedContext};
use crate::utils::logging::log_route_execution;
use crate::ApiResult;

#[derive(Debug, Deserialize)]
pub struct NormalizeQuery {
    pub category_id: CategoryId,
    #[serde(default = "default_true")]
    pub dry_run: bool,
    #[serde(default = "default_true")]
    pub use_ai: bool,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub results: Vec<NormalizationResult>,
    pub dry_run: bool,
}

pub async fn normalize_skus(
    State(ctx): State<SharedContext>,
    Query(query): Query<NormalizeQuery>,
    Json(skus): Json<Vec<String>>,
) -> ApiResult<NormalizeResponse> {
    run_batch(&ctx, "normalization::normalize_skus", &skus, &query).await
}

pub async fn normalize_pending_skus(
    State(ctx): State<SharedContext>,
    Query(query): Query<NormalizeQuery>,
) -> ApiResult<NormalizeResponse> {
    let skus = ctx.pending_skus.load_pending_skus().await?;
    info!(count = skus.len(), "pending SKUs loaded");
    run_batch(&ctx, "normalization::normalize_pending_skus", &skus, &query).await
}

async fn run_batch(
    ctx: &SharedContext,
    route: &str,
    skus: &[String],
    query: &NormalizeQuery,
) -> ApiResult<NormalizeResponse> {
    let mode = ExecutionMode::from_dry_run(query.dry_run);

    let start = Instant::now();
    let result =
        ctx.normalization_engine().batch(skus, query.category_id, mode, query.use_ai).await;
    log_route_execution(route, start.elapsed(), result.is_ok());

    Ok(Json(NormalizeResponse { results: result?, dry_run: mode.is_dry_run() }))
}
