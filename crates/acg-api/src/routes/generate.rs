//! Command generation endpoint.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use acg_protocol::GenerateResponse;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Longest query accepted, in bytes.
pub const MAX_QUERY_BYTES: usize = 2048;

/// Request body for generating a command.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Natural-language request text.
    pub query: String,
}

/// POST /api/v1/generate: turn a query into an AWS CLI command.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    if req.query.len() > MAX_QUERY_BYTES {
        return Err(ApiError::BadRequest(format!(
            "query exceeds {MAX_QUERY_BYTES} bytes"
        )));
    }

    tracing::info!(query = %req.query, "received query");
    let response = state.generator.generate(&req.query).await;
    Ok(Json(response))
}
