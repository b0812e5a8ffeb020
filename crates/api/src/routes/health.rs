use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse { status: "online", message: "catalogsync API is running" })
}
