use std::time::Instant;

use axum::extract::State;
use axum::Json;
use catalogsync_domain::AuditReport;

use super::SharedContext;
use crate::utils::logging::log_route_execution;
use crate::ApiResult;

pub async fn run_audit(State(ctx): State<SharedContext>) -> ApiResult<AuditReport> {
    let start = Instant::now();
    let result = ctx.audit_service().run().await;
    log_route_execution("audit::run", start.elapsed(), result.is_ok());

    Ok(Json(result?))
}
