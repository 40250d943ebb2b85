//! Health check and public configuration.

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::config::PublicConfig;
use crate::state::SharedState;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/config: values the browser is allowed to see.
pub async fn api_config(State(state): State<SharedState>) -> Json<PublicConfig> {
    Json(state.public.clone())
}
