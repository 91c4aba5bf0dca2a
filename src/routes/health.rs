use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};

use crate::{AppState, error::AppResult, models::HealthResponse};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

pub async fn health(State(state): State<Arc<AppState>>) -> AppResult<Json<HealthResponse>> {
    state.db.ping().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
