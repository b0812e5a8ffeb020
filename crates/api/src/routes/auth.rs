//! OAuth authorization-code flow against the ERP.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use catalogsync_domain::CatalogSyncError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::SharedContext;
use crate::utils::logging::log_route_execution;
use crate::ApiResult;

#[derive(Debug, Serialize)]
pub struct LoginUrlResponse {
    pub url: String,
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn login_url(State(ctx): State<SharedContext>) -> ApiResult<LoginUrlResponse> {
    let state = ctx.oauth_states.issue();
    let url = ctx.tokens.authorization_url(&state)?;
    Ok(Json(LoginUrlResponse { url, state }))
}

pub async fn callback(
    State(ctx): State<SharedContext>,
    Query(query): Query<CallbackQuery>,
) -> ApiResult<CallbackResponse> {
    let code = query
        .code
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| CatalogSyncError::InvalidInput("missing authorization code".into()))?;

    let state_ok = query.state.as_deref().is_some_and(|state| ctx.oauth_states.consume(state));
    if !state_ok {
        warn!("authorization callback with unknown or expired state");
        return Err(
            CatalogSyncError::InvalidInput("unknown or expired authorization state".into()).into()
        );
    }

    let start = Instant::now();
    let result = ctx.tokens.complete_authorization(&code).await;
    log_route_execution("auth::callback", start.elapsed(), result.is_ok());

    let token = result?;
    info!(expires_at = %token.expires_at, "ERP authorization completed");

    Ok(Json(CallbackResponse {
        status: "success",
        message: "Authorization completed and token stored",
    }))
}
