use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use catalogsync_domain::{CategorySyncEntry, ExecutionMode};
use serde::Serialize;

use super::{DryRunQuery, SharedContext};
use crate::utils::logging::log_route_execution;
use crate::ApiResult;

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub results: Vec<CategorySyncEntry>,
    pub dry_run: bool,
}

pub async fn sync_categories(
    State(ctx): State<SharedContext>,
    Query(query): Query<DryRunQuery>,
) -> ApiResult<SyncResponse> {
    let mode = ExecutionMode::from_dry_run(query.dry_run);

    let start = Instant::now();
    let result = ctx.synchronizer().sync(mode).await;
    log_route_execution("sync::categories", start.elapsed(), result.is_ok());

    Ok(Json(SyncResponse { results: result?, dry_run: mode.is_dry_run() }))
}
