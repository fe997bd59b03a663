//! Token provider
//!
//! Performs the OAuth client-credentials exchange against the fixed token
//! endpoint and caches the resulting token in process memory. There is no
//! refresh: a caller that outlives the token's server-side validity window
//! will start seeing authentication failures from the API.

use crate::config::{ApiConfig, AuthConfig};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A token obtained from the token endpoint, with its fetch time
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the exchange happened
    pub fetched_at: DateTime<Utc>,
}

impl CachedToken {
    /// Wrap a freshly exchanged token
    pub fn new(token: String) -> Self {
        Self {
            token,
            fetched_at: Utc::now(),
        }
    }
}

/// Provides bearer tokens for API requests
pub struct TokenProvider {
    auth: AuthConfig,
    token_url: String,
    cached: Arc<RwLock<Option<CachedToken>>>,
    http: Client,
}

impl TokenProvider {
    /// Create a provider with its own HTTP client
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create a provider reusing an existing HTTP client
    pub fn with_client(config: &ApiConfig, http: Client) -> Self {
        Self {
            auth: config.auth.clone(),
            token_url: config.token_url.clone(),
            cached: Arc::new(RwLock::new(None)),
            http,
        }
    }

    /// Get the bearer token, performing the exchange on first use.
    ///
    /// In `Bearer` mode the configured token is returned without any HTTP
    /// call. In `ClientCredentials` mode the first call exchanges the
    /// credentials and every later call returns the cached token.
    pub async fn bearer_token(&self) -> Result<String> {
        let (client_id, client_secret, audience) = match &self.auth {
            AuthConfig::Bearer { token } => return Ok(token.clone()),
            AuthConfig::ClientCredentials {
                client_id,
                client_secret,
                audience,
            } => (client_id, client_secret, audience),
        };

        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref() {
                return Ok(token.token.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // Another task may have completed the exchange while we waited
        if let Some(token) = cached.as_ref() {
            return Ok(token.token.clone());
        }

        let token = self
            .exchange(client_id, client_secret, audience)
            .await?;
        debug!(fetched_at = %token.fetched_at, "obtained bearer token");
        let value = token.token.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// Drop the cached token so the next call re-exchanges
    pub async fn clear_cache(&self) {
        let mut cached = self.cached.write().await;
        *cached = None;
    }

    async fn exchange(
        &self,
        client_id: &str,
        client_secret: &str,
        audience: &str,
    ) -> Result<CachedToken> {
        let body = serde_json::json!({
            "client_id": client_id,
            "client_secret": client_secret,
            "audience": audience,
        });

        let response = self
            .http
            .post(&self.token_url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let payload: TokenResponse = response.json().await.map_err(Error::Http)?;
        match payload.access_token {
            Some(token) => Ok(CachedToken::new(token)),
            None => Err(Error::auth("token response missing access_token")),
        }
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}
