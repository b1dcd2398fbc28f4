//! # Health Handler

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Liveness probe with a database round trip.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.db.health_check().await {
        "up"
    } else {
        "down"
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
