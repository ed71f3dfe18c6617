//! Authentication middleware
//!
//! Publishing requires a token. The credential is the full `Authorization`
//! header value compared byte-for-byte against the token table; there is no
//! scheme prefix to strip. Read routes never pass through this middleware.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::{error::ErrorResponse, handlers::AppState};

/// Require a valid token before running the inner handler
///
/// Fails closed: a missing header and an unknown token are both 401. A
/// token-store failure during the lookup is a 500, not a rejection.
pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    debug!("Authenticating publish request");

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let token = header.to_str().map_err(|_| AuthError::InvalidToken)?;

    let accepted = state.services.tokens().verify(token).await.map_err(|e| {
        warn!(error = %e, "Token verification hit a store failure");
        AuthError::Backend
    })?;

    if !accepted {
        return Err(AuthError::InvalidToken);
    }

    Ok(next.run(request).await)
}

/// Authentication errors
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header on the request
    MissingToken,

    /// Header present but no matching token row
    InvalidToken,

    /// Token store failure during verification
    Backend,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Authentication token required"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
            AuthError::Backend => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let error_response = ErrorResponse {
            status: status.as_u16(),
            message: message.to_string(),
            code: None,
            timestamp: chrono::Utc::now(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Authentication token required"),
            AuthError::InvalidToken => write!(f, "Invalid authentication token"),
            AuthError::Backend => write!(f, "Token store failure"),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::post, Router};
    use http_body_util::BodyExt;
    use model_registry_service::ServiceRegistry;
    use model_registry_store::{
        InMemoryModelRepository, InMemoryObjectStore, InMemoryTokenRepository, StoreError,
        StoreResult, TokenRepository,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state_with_token(token: &str) -> AppState {
        AppState::new(ServiceRegistry::new(
            Arc::new(InMemoryModelRepository::new()),
            Arc::new(InMemoryTokenRepository::with_tokens([token])),
            Arc::new(InMemoryObjectStore::new()),
        ))
    }

    fn protected_app(state: AppState) -> Router {
        Router::new()
            .route("/models", post(|| async { "published" }))
            .layer(middleware::from_fn_with_state(state, require_token))
    }

    async fn response_message(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let app = protected_app(state_with_token("sesame"));

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/models")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response_message(response).await,
            "Authentication token required"
        );
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let app = protected_app(state_with_token("sesame"));

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/models")
            .header(AUTHORIZATION, "wrong")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response_message(response).await,
            "Invalid authentication token"
        );
    }

    #[tokio::test]
    async fn test_scheme_prefix_is_not_stripped() {
        let app = protected_app(state_with_token("sesame"));

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/models")
            .header(AUTHORIZATION, "Bearer sesame")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_known_token_passes_through() {
        let app = protected_app(state_with_token("sesame"));

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/models")
            .header(AUTHORIZATION, "sesame")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_store_failure_is_distinct_from_rejection() {
        struct BrokenTokenRepository;

        #[async_trait]
        impl TokenRepository for BrokenTokenRepository {
            async fn token_exists(&self, _token: &str) -> StoreResult<bool> {
                Err(StoreError::Connection("connection refused".to_string()))
            }
        }

        let state = AppState::new(ServiceRegistry::new(
            Arc::new(InMemoryModelRepository::new()),
            Arc::new(BrokenTokenRepository),
            Arc::new(InMemoryObjectStore::new()),
        ));
        let app = protected_app(state);

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/models")
            .header(AUTHORIZATION, "sesame")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
