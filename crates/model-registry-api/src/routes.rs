//! API route definitions
//!
//! This module defines all API routes and builds the router.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    auth::require_token,
    handlers::{
        get_latest_model, get_model_version, health_check, publish_model, version_info, AppState,
    },
};

/// Build the API router with all routes
///
/// Only publishing is authenticated; both read routes and the operational
/// endpoints are anonymous. The static `latest` segment wins over the
/// `:version` capture.
pub fn build_router(state: AppState) -> Router {
    let publish_routes = Router::new()
        .route("/models", post(publish_model))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_token,
        ));

    let read_routes = Router::new()
        .route("/models/:author/:name/latest", get(get_latest_model))
        .route("/models/:author/:name/:version", get(get_model_version));

    Router::new()
        // Health and info endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_info))
        // Model endpoints
        .merge(publish_routes)
        .merge(read_routes)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use model_registry_service::ServiceRegistry;
    use model_registry_store::{
        InMemoryModelRepository, InMemoryObjectStore, InMemoryTokenRepository,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AppState::new(ServiceRegistry::new(
            Arc::new(InMemoryModelRepository::new()),
            Arc::new(InMemoryTokenRepository::new()),
            Arc::new(InMemoryObjectStore::new()),
        ));
        build_router(state)
    }

    #[tokio::test]
    async fn test_health_route_responds_ok() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_version_route_responds_ok() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/version")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_publish_route_is_guarded_for_every_method() {
        // The token middleware wraps the whole /models route service, so
        // even a method the route does not serve is challenged first.
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/models")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
