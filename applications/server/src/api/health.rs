/// Health check API routes
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub ok: bool,
    pub time: String,
}

/// GET /api/ping - Health check endpoint
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
