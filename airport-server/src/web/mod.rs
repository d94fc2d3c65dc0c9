//! Web server — axum JSON API over the airport dataset.
//!
//! Shared state is the immutable dataset plus the optional caller token.
//! No locks: nothing in the state changes after start-up.

use std::sync::Arc;

use axum::response::Response;
use axum::routing::get;
use axum::{middleware, Router};
use http::{header, HeaderValue};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use airport_core::Dataset;

pub mod auth;
pub mod routes;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub dataset: Arc<Dataset>,
    /// Bearer token required on `/api/*`; `None` accepts every caller.
    pub auth_token: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, auth_token: Option<String>) -> Self {
        AppState {
            dataset: Arc::new(dataset),
            auth_token,
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Cache-Control for successful responses only.
fn cache_control(response: &Response) -> Option<HeaderValue> {
    response
        .status()
        .is_success()
        .then(|| HeaderValue::from_static("private, max-age=300"))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/airport.search", get(routes::api_airport_search))
        .route("/api/airports", get(routes::api_airports))
        .route("/api/airports/:code", get(routes::api_airport_detail))
        .route("/api/stats", get(routes::api_stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_caller,
        ));

    Router::new()
        .route("/health", get(routes::health))
        .merge(api)
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            cache_control,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the web server. Runs until Ctrl-C.
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router(state);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("airport search listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
