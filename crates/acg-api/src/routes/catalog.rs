//! Supported services and intents.

use axum::Json;
use serde_json::{Value, json};

use acg_commands::supported_services;
use acg_protocol::Intent;

/// GET /api/v1/services: services with command templates.
pub async fn list_services() -> Json<Value> {
    Json(json!({ "services": supported_services() }))
}

/// GET /api/v1/intents: the fixed intent label set.
pub async fn list_intents() -> Json<Value> {
    Json(json!({ "intents": Intent::ALL }))
}
