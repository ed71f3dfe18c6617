//! API middleware
//!
//! This module provides middleware layers for request processing including
//! logging, CORS, and request ID generation.

use axum::http::{HeaderValue, Method, Request};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, RequestId},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;
use uuid::Uuid;

/// Request ID generator using UUIDs
#[derive(Clone, Default)]
pub struct UuidRequestIdGenerator;

impl MakeRequestId for UuidRequestIdGenerator {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let request_id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&request_id).ok().map(RequestId::new)
    }
}

/// Build trace layer
pub fn trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
> {
    TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .include_headers(true)
                .level(Level::INFO),
        )
        .on_response(
            DefaultOnResponse::new()
                .include_headers(true)
                .latency_unit(LatencyUnit::Millis)
                .level(Level::INFO),
        )
}

/// Build CORS layer
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        // Allow requests from any origin
        // In production, configure this based on environment
        .allow_origin(Any)
        // Allow the methods the API actually serves
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // Allow common headers
        .allow_headers(Any)
        // Expose request ID header
        .expose_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(false)
}
