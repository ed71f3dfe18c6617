//! Token verification service
//!
//! Credentials are opaque strings compared for exact equality against the
//! token table. The full `Authorization` header value is the credential;
//! there is no scheme parsing and no "Bearer " stripping.

use async_trait::async_trait;
use model_registry_store::TokenRepository;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::ServiceResult;

/// Trait for credential verification
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Check whether the presented credential matches a stored token
    ///
    /// A store failure during the lookup is an error, not a rejection.
    async fn verify(&self, token: &str) -> ServiceResult<bool>;
}

/// Default implementation of TokenService backed by the token table
pub struct DefaultTokenService {
    tokens: Arc<dyn TokenRepository>,
}

impl DefaultTokenService {
    /// Create a new token service
    pub fn new(tokens: Arc<dyn TokenRepository>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl TokenService for DefaultTokenService {
    #[instrument(skip(self, token))]
    async fn verify(&self, token: &str) -> ServiceResult<bool> {
        let accepted = self.tokens.token_exists(token).await?;
        debug!(accepted, "Token verification completed");
        Ok(accepted)
    }
}
