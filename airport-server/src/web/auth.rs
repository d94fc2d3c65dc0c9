//! Caller check — runs before any `/api/*` procedure.
//!
//! When a token is configured, callers must send `Authorization: Bearer
//! <token>`. Without one every caller is accepted.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::web::AppState;

/// Token from an `Authorization: Bearer <token>` header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Accept the caller when no token is configured or the bearer token matches.
pub fn check_auth(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    match (&state.auth_token, bearer_token(headers)) {
        (None, _) => Ok(()),
        (Some(expected), Some(given)) if given == expected.as_str() => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid or missing bearer token"})),
        )),
    }
}

/// Middleware wrapper around [`check_auth`].
pub async fn require_caller(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(rejection) = check_auth(&state, request.headers()) {
        tracing::warn!(path = %request.uri().path(), "rejected unauthenticated caller");
        return rejection.into_response();
    }
    next.run(request).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use tower::ServiceExt;

    use airport_core::Dataset;

    fn state_with_auth(token: Option<&str>) -> Arc<AppState> {
        Arc::new(AppState::new(
            Dataset::builtin(),
            token.map(str::to_string),
        ))
    }

    fn search_request(auth: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/api/airport.search?q=sfo");
        if let Some(value) = auth {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_check_auth_no_token_configured() {
        let state = state_with_auth(None);
        assert!(check_auth(&state, &HeaderMap::new()).is_ok());
    }

    #[test]
    fn test_check_auth_scheme_required() {
        let state = state_with_auth(Some("secret-token-123"));
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("secret-token-123"));
        let (status, _) = check_auth(&state, &headers).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));
    }

    #[tokio::test]
    async fn test_auth_reject_without_token() {
        let app = crate::web::build_router(state_with_auth(Some("secret-token-123")));

        let response = app.oneshot(search_request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid or missing bearer token");
    }

    #[tokio::test]
    async fn test_auth_reject_wrong_token() {
        let app = crate::web::build_router(state_with_auth(Some("secret-token-123")));

        let response = app
            .oneshot(search_request(Some("Bearer wrong-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get("cache-control").is_none());
    }

    #[tokio::test]
    async fn test_auth_accept_correct_token() {
        let app = crate::web::build_router(state_with_auth(Some("secret-token-123")));

        let response = app
            .oneshot(search_request(Some("Bearer secret-token-123")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_no_auth_accepts_all() {
        let app = crate::web::build_router(state_with_auth(None));

        let response = app.oneshot(search_request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_is_open() {
        let app = crate::web::build_router(state_with_auth(Some("secret-token-123")));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
