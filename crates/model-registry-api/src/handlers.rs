//! API request handlers
//!
//! This module implements HTTP request handlers for all API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use model_registry_core::ModelDescriptor;
use model_registry_service::{ServiceError, ServiceRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    error::{ApiError, ApiResult},
    responses::{created, ComponentHealth, HealthResponse, MessageResponse, YamlDocument},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Service registry
    pub services: Arc<ServiceRegistry>,
}

impl AppState {
    /// Create new application state
    pub fn new(services: ServiceRegistry) -> Self {
        Self {
            services: Arc::new(services),
        }
    }
}

// ============================================================================
// Model Handlers
// ============================================================================

/// Publish a new model version
///
/// The body is taken as a raw JSON value so that a non-object payload
/// fails descriptor validation (400) instead of a framework rejection.
#[instrument(skip(state, payload))]
pub async fn publish_model(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    debug!("Publishing model descriptor");

    let descriptor = ModelDescriptor::from_value(payload).map_err(ServiceError::from)?;

    let record = state
        .services
        .publisher()
        .publish(descriptor)
        .await
        .map_err(ApiError::from)?;

    info!(model = %record.coordinates(), id = record.id, "Model published");

    Ok(created("Model successfully published"))
}

/// Fetch the stored descriptor for an exact model version
#[instrument(skip(state))]
pub async fn get_model_version(
    State(state): State<AppState>,
    Path((author, name, version)): Path<(String, String, String)>,
) -> ApiResult<YamlDocument> {
    debug!("Fetching model version");

    let resolved = state
        .services
        .resolver()
        .resolve_exact(&author, &name, &version)
        .await
        .map_err(ApiError::from)?;

    Ok(YamlDocument(resolved.bytes))
}

/// Fetch the stored descriptor for the latest version of a model
///
/// Latest means the lexicographically greatest version string, as the
/// version ordering documentation spells out.
#[instrument(skip(state))]
pub async fn get_latest_model(
    State(state): State<AppState>,
    Path((author, name)): Path<(String, String)>,
) -> ApiResult<YamlDocument> {
    debug!("Fetching latest model version");

    let resolved = state
        .services
        .resolver()
        .resolve_latest(&author, &name)
        .await
        .map_err(ApiError::from)?;

    Ok(YamlDocument(resolved.bytes))
}

// ============================================================================
// Health & Info Handlers
// ============================================================================

/// Health check endpoint probing both backing stores
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    debug!("Health check requested");

    let backends = state.services.backend_health().await;

    let database = match backends.metadata {
        Ok(()) => ComponentHealth::healthy(),
        Err(e) => ComponentHealth::unhealthy(e),
    };
    let object_store = match backends.object_store {
        Ok(()) => ComponentHealth::healthy(),
        Err(e) => ComponentHealth::unhealthy(e),
    };

    let response = HealthResponse::healthy()
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_check("database", database)
        .with_check("object_store", object_store)
        .compute_status();

    Ok(response)
}

/// Get API version information
#[instrument]
pub async fn version_info() -> ApiResult<Json<VersionInfo>> {
    let info = VersionInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Ok(Json(info))
}

/// Version information
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,
}
