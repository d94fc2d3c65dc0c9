//! REST API route handlers.
//!
//! Every handler reads the shared dataset directly; results borrow from it,
//! so responses are serialized before the handler returns.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::web::AppState;

// ---------------------------------------------------------------------------
// Query param types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct SearchParams {
    q: String,
}

// ---------------------------------------------------------------------------
// Airport endpoints
// ---------------------------------------------------------------------------

/// GET /api/airport.search?q= — up to 10 matches, highest tier first.
pub async fn api_airport_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let results = state.dataset.search(&params.q);
    tracing::debug!(query = %params.q, hits = results.len(), "airport.search");
    Json(results).into_response()
}

/// GET /api/airports — the full dataset in load order.
pub async fn api_airports(State(state): State<Arc<AppState>>) -> Response {
    Json(state.dataset.airports()).into_response()
}

/// GET /api/airports/:code — exact IATA or ICAO lookup.
pub async fn api_airport_detail(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Response {
    match state.dataset.find_by_code(&code) {
        Some(airport) => Json(airport).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Airport not found"})),
        )
            .into_response(),
    }
}

/// GET /api/stats — dataset statistics.
pub async fn api_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dataset.stats())
}

/// GET /health — liveness probe, never behind the caller check.
pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
