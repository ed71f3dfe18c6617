//! Common test utilities and helpers
//!
//! This module serves the full HTTP stack over in-memory stores on a
//! random local port and exercises it through a real HTTP client, so the
//! middleware, routing, and serialization layers are all in play.

use model_registry_api::build_api_server;
use model_registry_service::ServiceRegistry;
use model_registry_store::{
    InMemoryModelRepository, InMemoryObjectStore, InMemoryTokenRepository, ModelRepository,
    ObjectStore, TokenRepository,
};
use std::sync::Arc;
use tokio::net::TcpListener;

pub mod fixtures;

/// Publish token seeded into every test application
pub const TEST_TOKEN: &str = "integration-test-token";

/// Test application state
pub struct TestApp {
    pub address: String,
    pub models: Arc<InMemoryModelRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub blobs: Arc<InMemoryObjectStore>,
}

impl TestApp {
    /// Create a new test application with one publish token seeded
    pub async fn new() -> Self {
        let models = Arc::new(InMemoryModelRepository::new());
        let tokens = Arc::new(InMemoryTokenRepository::with_tokens([TEST_TOKEN]));
        let blobs = Arc::new(InMemoryObjectStore::new());

        let address = spawn_server(models.clone(), tokens.clone(), blobs.clone()).await;

        Self {
            address,
            models,
            tokens,
            blobs,
        }
    }

    /// Get base URL
    pub fn url(&self) -> &str {
        &self.address
    }

    /// Create HTTP client
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("Failed to build client")
    }

    /// Publish a payload with the seeded token
    pub async fn publish(&self, payload: &serde_json::Value) -> reqwest::Response {
        self.client()
            .post(&format!("{}/models", self.url()))
            .header("Authorization", TEST_TOKEN)
            .json(payload)
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Fetch a model version; reads carry no authentication
    pub async fn get_model(&self, author: &str, name: &str, version: &str) -> reqwest::Response {
        self.client()
            .get(&format!(
                "{}/models/{}/{}/{}",
                self.url(),
                author,
                name,
                version
            ))
            .send()
            .await
            .expect("Failed to send request")
    }
}

/// Serve the API over the given stores on a random port
pub async fn spawn_server(
    models: Arc<dyn ModelRepository>,
    tokens: Arc<dyn TokenRepository>,
    blobs: Arc<dyn ObjectStore>,
) -> String {
    let services = ServiceRegistry::new(models, tokens, blobs);
    let app = build_api_server(services);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Failed to start test server");
    });

    format!("http://{}", address)
}

/// Parse a JSON response body
pub async fn response_json(response: reqwest::Response) -> serde_json::Value {
    response
        .json()
        .await
        .expect("Failed to parse JSON response")
}

/// Parse a YAML response body
pub async fn response_yaml(response: reqwest::Response) -> serde_yaml::Value {
    let body = response.text().await.expect("Failed to read response body");
    serde_yaml::from_str(&body).expect("Failed to parse YAML response")
}

/// Assert response status
pub fn assert_status(response: &reqwest::Response, expected: reqwest::StatusCode) {
    assert_eq!(
        response.status(),
        expected,
        "Expected status {}, got {}",
        expected,
        response.status()
    );
}
