//! Model Registry API layer
//!
//! This crate provides the REST API layer for the model registry using Axum.
//! It includes request handlers, middleware, error handling, and response types.
//!
//! # Architecture
//!
//! The API layer is organized into:
//!
//! - **Handlers**: Request handlers for all API endpoints
//! - **Routes**: Route definitions and router configuration
//! - **Auth**: Token middleware guarding the publish route
//! - **Middleware**: Tower middleware for logging, CORS, and request IDs
//! - **Error Handling**: Conversion of service errors to HTTP responses
//! - **Responses**: Response body types
//!
//! # Example
//!
//! ```rust,no_run
//! use model_registry_api::{build_router, AppState};
//! use model_registry_service::ServiceRegistry;
//!
//! # fn example(services: ServiceRegistry) {
//! let state = AppState::new(services);
//! let app = build_router(state);
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod routes;

// Re-export main types for convenience
pub use auth::{require_token, AuthError};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::{AppState, VersionInfo};
pub use middleware::UuidRequestIdGenerator;
pub use responses::{
    created, ComponentHealth, HealthResponse, HealthStatus, MessageResponse, YamlDocument,
};
pub use routes::build_router;

use axum::Router;
use model_registry_service::ServiceRegistry;

/// Build a complete API server with middleware
///
/// This is a convenience function that builds a router with all middleware
/// configured using default settings.
///
/// # Arguments
///
/// * `services` - The service registry to use
///
/// # Example
///
/// ```rust,no_run
/// use model_registry_api::build_api_server;
/// use model_registry_service::ServiceRegistry;
///
/// # fn example(services: ServiceRegistry) {
/// let app = build_api_server(services);
/// # }
/// ```
pub fn build_api_server(services: ServiceRegistry) -> Router {
    let state = AppState::new(services);
    let router = build_router(state);

    // Later layers wrap earlier ones, so the request id is assigned
    // outermost and is visible to the trace spans and the propagation
    // layer inside it.
    router
        .layer(middleware::cors_layer())
        .layer(tower_http::compression::CompressionLayer::new())
        .layer(middleware::trace_layer())
        .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
        .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
            middleware::UuidRequestIdGenerator::default(),
        ))
}
