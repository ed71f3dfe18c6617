//! S3-compatible object store client
//!
//! Speaks the small subset of the S3 REST API the registry needs — put
//! object, get object, head bucket — against any S3-compatible endpoint
//! such as MinIO. Requests are signed with AWS Signature Version 4 and use
//! path-style addressing (`{endpoint}/{bucket}/{key}`).

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use ring::hmac;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{StoreError, StoreResult};
use crate::object::{ObjectStore, ObjectStoreConfig};

/// Headers included in the signature, in canonical order
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

/// Timestamp format required by the signing protocol
const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Date-only format used in the credential scope
const DATE_STAMP_FORMAT: &str = "%Y%m%d";

/// Maximum length of an error-body excerpt carried into error messages
const ERROR_EXCERPT_LEN: usize = 200;

/// Object store client for S3-compatible endpoints (MinIO, AWS S3, ...)
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    /// Endpoint with any trailing slash removed, e.g. `http://minio:9000`
    base: String,
    /// Host header value the signature covers, `host[:port]`
    host: String,
    bucket: String,
    access_key: String,
    secret_key: String,
    region: String,
}

impl S3ObjectStore {
    /// Build a client from configuration, validating the endpoint
    pub fn new(config: ObjectStoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let endpoint = Url::parse(&config.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(StoreError::Configuration(format!(
                "Object store endpoint must be http or https: {}",
                config.endpoint
            )));
        }
        if !matches!(endpoint.path(), "" | "/") {
            return Err(StoreError::Configuration(format!(
                "Object store endpoint must not carry a path: {}",
                config.endpoint
            )));
        }

        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(StoreError::Configuration(format!(
                    "Object store endpoint has no host: {}",
                    config.endpoint
                )))
            }
        };

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                StoreError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base: endpoint.as_str().trim_end_matches('/').to_string(),
            host,
            bucket: config.bucket,
            access_key: config.access_key,
            secret_key: config.secret_key,
            region: config.region,
        })
    }

    /// The bucket this client writes into
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Canonical (percent-encoded) request path for an object
    fn object_uri(&self, key: &str) -> String {
        format!(
            "/{}/{}",
            uri_encode_path(&self.bucket),
            uri_encode_path(key)
        )
    }

    /// Full request URL for an already-encoded canonical path
    fn request_url(&self, canonical_uri: &str) -> StoreResult<Url> {
        Ok(Url::parse(&format!("{}{}", self.base, canonical_uri))?)
    }

    /// Signature headers for one request, timestamped now
    fn sign_headers(
        &self,
        method: &Method,
        canonical_uri: &str,
        payload_hash: &str,
    ) -> StoreResult<HeaderMap> {
        let now = Utc::now();
        let amz_date = now.format(AMZ_DATE_FORMAT).to_string();
        let date_stamp = now.format(DATE_STAMP_FORMAT).to_string();

        let authorization = build_authorization(
            &self.access_key,
            &self.secret_key,
            &self.region,
            method.as_str(),
            canonical_uri,
            &self.host,
            &amz_date,
            &date_stamp,
            payload_hash,
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-amz-date"),
            header_value(&amz_date)?,
        );
        headers.insert(
            HeaderName::from_static("x-amz-content-sha256"),
            header_value(payload_hash)?,
        );
        headers.insert(header::AUTHORIZATION, header_value(&authorization)?);
        Ok(headers)
    }
}

impl fmt::Debug for S3ObjectStore {
    // Credentials stay out of debug output
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("endpoint", &self.base)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish()
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, bytes), fields(bucket = %self.bucket, key = %key))]
    async fn put(&self, key: &str, bytes: Vec<u8>) -> StoreResult<()> {
        debug!(size = bytes.len(), "Writing object");

        let canonical_uri = self.object_uri(key);
        let url = self.request_url(&canonical_uri)?;
        let payload_hash = hex_sha256(&bytes);
        let headers = self.sign_headers(&Method::PUT, &canonical_uri, &payload_hash)?;

        let response = self
            .client
            .put(url)
            .headers(headers)
            .header(header::CONTENT_TYPE, "application/x-yaml")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Object written");
            Ok(())
        } else {
            Err(StoreError::ObjectStoreUnavailable(format!(
                "Unexpected status {} writing object {}: {}",
                status,
                key,
                error_excerpt(response).await
            )))
        }
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, key = %key))]
    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        debug!("Fetching object");

        let canonical_uri = self.object_uri(key);
        let url = self.request_url(&canonical_uri)?;
        let payload_hash = hex_sha256(b"");
        let headers = self.sign_headers(&Method::GET, &canonical_uri, &payload_hash)?;

        let response = self.client.get(url).headers(headers).send().await?;

        match response.status() {
            status if status.is_success() => {
                let bytes = response.bytes().await?;
                debug!(size = bytes.len(), "Object fetched");
                Ok(bytes.to_vec())
            }
            StatusCode::NOT_FOUND => Err(StoreError::ObjectMissing(key.to_string())),
            status => Err(StoreError::ObjectStoreUnavailable(format!(
                "Unexpected status {} fetching object {}: {}",
                status,
                key,
                error_excerpt(response).await
            ))),
        }
    }

    async fn health_check(&self) -> StoreResult<()> {
        let canonical_uri = format!("/{}", uri_encode_path(&self.bucket));
        let url = self.request_url(&canonical_uri)?;
        let payload_hash = hex_sha256(b"");
        let headers = self.sign_headers(&Method::HEAD, &canonical_uri, &payload_hash)?;

        let response = self.client.head(url).headers(headers).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(StoreError::ObjectStoreUnavailable(format!(
                "Bucket {} probe returned status {}",
                self.bucket, status
            )))
        }
    }
}

/// Build the `Authorization` header value for one request.
///
/// Implements the AWS Signature Version 4 canonical request and signing-key
/// derivation for the `s3` service, covering exactly the host, payload-hash,
/// and date headers.
#[allow(clippy::too_many_arguments)]
fn build_authorization(
    access_key: &str,
    secret_key: &str,
    region: &str,
    method: &str,
    canonical_uri: &str,
    host: &str,
    amz_date: &str,
    date_stamp: &str,
    payload_hash: &str,
) -> String {
    // Canonical headers end with a newline per entry; the empty line after
    // them is part of the canonical request format.
    let canonical_headers = format!(
        "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
        host, payload_hash, amz_date
    );
    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method, canonical_uri, "", canonical_headers, SIGNED_HEADERS, payload_hash
    );

    let scope = format!("{}/{}/s3/aws4_request", date_stamp, region);
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        amz_date,
        scope,
        hex_sha256(canonical_request.as_bytes())
    );

    let date_key = hmac_sha256(format!("AWS4{}", secret_key).as_bytes(), date_stamp.as_bytes());
    let region_key = hmac_sha256(&date_key, region.as_bytes());
    let service_key = hmac_sha256(&region_key, b"s3");
    let signing_key = hmac_sha256(&service_key, b"aws4_request");
    let signature = hex_encode(&hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    format!(
        "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
        access_key, scope, SIGNED_HEADERS, signature
    )
}

/// Percent-encode a path segment or path, leaving `/` and unreserved
/// characters intact
fn uri_encode_path(path: &str) -> String {
    path.bytes()
        .map(|byte| match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                (byte as char).to_string()
            }
            other => format!("%{:02X}", other),
        })
        .collect()
}

fn hex_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    hmac::sign(&key, data).as_ref().to_vec()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn header_value(value: &str) -> StoreResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| StoreError::Internal(format!("Invalid header value: {}", e)))
}

async fn error_excerpt(response: Response) -> String {
    match response.text().await {
        Ok(text) if text.is_empty() => "<empty body>".to_string(),
        Ok(text) => text.chars().take(ERROR_EXCERPT_LEN).collect(),
        Err(_) => "<unreadable body>".to_string(),
    }
}
