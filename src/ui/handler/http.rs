//! HTTP endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::domain::Participant;

use super::super::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint exposing the current participant snapshot (for manual
/// inspection during development)
pub async fn debug_session(State(state): State<Arc<AppState>>) -> Json<Vec<Participant>> {
    Json(state.registry.snapshot().await)
}
