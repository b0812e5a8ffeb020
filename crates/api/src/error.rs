//! HTTP mapping of domain errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalogsync_domain::CatalogSyncError;
use serde_json::json;
use tracing::{error, warn};

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Request-level failure rendered as `{"status":"error","message":..}`.
#[derive(Debug)]
pub struct ApiError(pub CatalogSyncError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            CatalogSyncError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            CatalogSyncError::NoToken => StatusCode::UNAUTHORIZED,
            CatalogSyncError::Refresh(_) | CatalogSyncError::RemoteApi { .. } => {
                StatusCode::BAD_GATEWAY
            }
            CatalogSyncError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogSyncError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CatalogSyncError::Database(_)
            | CatalogSyncError::Network(_)
            | CatalogSyncError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogSyncError> for ApiError {
    fn from(value: CatalogSyncError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.0, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self.0, "request rejected");
        }

        (status, Json(json!({ "status": "error", "message": self.0.message() }))).into_response()
    }
}
