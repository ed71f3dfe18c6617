//! Publish endpoint integration tests
//!
//! Covers authentication, descriptor validation, persistence in both
//! backends, and the shape of success and error bodies.

mod common;

use common::fixtures::{incomplete_payload, model_payload, payload_with_extras};
use common::{assert_status, response_json, TestApp, TEST_TOKEN};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_publish_returns_created() {
    let app = TestApp::new().await;

    let response = app.publish(&model_payload("1.0")).await;

    assert_status(&response, StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Model successfully published");
}

#[tokio::test]
async fn test_publish_writes_both_backends() {
    let app = TestApp::new().await;

    app.publish(&payload_with_extras("1.0")).await;

    let rows = app.models.rows();
    assert_eq!(rows.len(), 1);
    let record = &rows[0];
    assert_eq!(record.author, "alice");
    assert_eq!(record.name, "classifier");
    assert_eq!(record.version, "1.0");
    assert!(record.blob_key.as_str().ends_with(".yaml"));
    assert!(app.blobs.contains(record.blob_key.as_str()));
}

#[tokio::test]
async fn test_publish_without_token() {
    let app = TestApp::new().await;

    let response = app
        .client()
        .post(&format!("{}/models", app.url()))
        .json(&model_payload("1.0"))
        .send()
        .await
        .expect("Failed to send request");

    assert_status(&response, StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Authentication token required");

    // A rejected publish must leave no trace in either backend
    assert_eq!(app.models.count(), 0);
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_publish_with_unknown_token() {
    let app = TestApp::new().await;

    let response = app
        .client()
        .post(&format!("{}/models", app.url()))
        .header("Authorization", "not-a-registered-token")
        .json(&model_payload("1.0"))
        .send()
        .await
        .expect("Failed to send request");

    assert_status(&response, StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid authentication token");
    assert_eq!(app.models.count(), 0);
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_publish_token_scheme_prefix_is_rejected() {
    let app = TestApp::new().await;

    // The header value is compared verbatim, so a scheme prefix in front
    // of an otherwise valid token does not authenticate.
    let response = app
        .client()
        .post(&format!("{}/models", app.url()))
        .header("Authorization", format!("Bearer {}", TEST_TOKEN))
        .json(&model_payload("1.0"))
        .send()
        .await
        .expect("Failed to send request");

    assert_status(&response, StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid authentication token");
    assert_eq!(app.models.count(), 0);
}

#[tokio::test]
async fn test_publish_incomplete_descriptor() {
    let app = TestApp::new().await;

    let response = app.publish(&incomplete_payload()).await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    let message = body["message"].as_str().expect("message should be a string");
    assert!(message.contains("version"));
    assert!(message.contains("description"));

    assert_eq!(app.models.count(), 0);
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_publish_rejects_empty_required_field() {
    let app = TestApp::new().await;

    let mut payload = model_payload("1.0");
    payload["author"] = json!("");
    let response = app.publish(&payload).await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .expect("message should be a string")
        .contains("author"));
    assert_eq!(app.models.count(), 0);
}

#[tokio::test]
async fn test_publish_rejects_non_object_payload() {
    let app = TestApp::new().await;

    let response = app.publish(&json!("just a string")).await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"]
        .as_str()
        .expect("message should be a string")
        .contains("JSON object"));
}

#[tokio::test]
async fn test_publish_duplicate_coordinates_adds_row() {
    let app = TestApp::new().await;

    assert_status(
        &app.publish(&model_payload("1.0")).await,
        StatusCode::CREATED,
    );
    assert_status(
        &app.publish(&model_payload("1.0")).await,
        StatusCode::CREATED,
    );

    // Republishing the same coordinates appends; nothing is overwritten.
    let rows = app.models.rows();
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);
    assert_ne!(rows[0].blob_key, rows[1].blob_key);
    assert_eq!(app.blobs.len(), 2);
}
