//! JSON-RPC endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::rpc::handle_body;
use crate::state::AppState;

/// Handle a JSON-RPC request or batch.
///
/// Always answers 200; failures travel in the JSON-RPC error object. A body
/// made only of notifications gets an empty 200.
pub async fn handle(State(state): State<AppState>, body: Bytes) -> Response {
    match handle_body(state.api.as_ref(), state.config.rpc.max_batch_size, &body).await {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
