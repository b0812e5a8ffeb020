//! HTTP routes
//!
//! Each submodule owns one resource group; [`router`] mounts them all on a
//! shared [`AppContext`].

mod audit;
mod auth;
mod health;
mod normalization;
mod stores;
mod sync;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::AppContext;

pub type SharedContext = Arc<AppContext>;

/// Build the application router.
pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/auth/login-url", get(auth::login_url))
        .route("/auth/callback", get(auth::callback))
        .route("/stores/list", get(stores::list_stores))
        .route("/audit/run", get(audit::run_audit))
        .route("/sync/categories", post(sync::sync_categories))
        .route("/normalization/normalize-skus", post(normalization::normalize_skus))
        .route(
            "/normalization/normalize-pending-skus",
            post(normalization::normalize_pending_skus),
        )
        .with_state(ctx)
}

/// `dry_run` query flag shared by mutating routes. Absent means dry run.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DryRunQuery {
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

pub(crate) fn default_true() -> bool {
    true
}
