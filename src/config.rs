//! Configuration context
//!
//! All endpoint operations take an explicit [`ApiConfig`] rather than reading
//! ambient process state. The config is usually built from environment
//! variables once at startup ([`ApiConfig::from_env`]) and passed by reference
//! to every call.

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Default base URL for the customer API
pub const DEFAULT_API_BASE_URL: &str = "https://api.raptormaps.com";

/// Default base URL for the assets/ingestor service
pub const DEFAULT_ASSETS_BASE_URL: &str = "https://app.assets.raptormaps.com";

/// Default base URL for the legacy API (uuid-based inspection listing)
pub const DEFAULT_LEGACY_BASE_URL: &str = "https://app-legacy.raptormaps.com/api/v2";

/// OAuth audience for the customer API
pub const DEFAULT_AUDIENCE: &str = "api://customer-api";

/// Path of the token endpoint, relative to the API base URL
const TOKEN_PATH: &str = "/oauth/token";

/// How the client authenticates against the API
#[derive(Debug, Clone)]
pub enum AuthConfig {
    /// A previously obtained bearer token, used as-is
    Bearer {
        /// The bearer token
        token: String,
    },

    /// OAuth2 client-credentials exchange against the token endpoint
    ClientCredentials {
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
        /// Audience claim sent with the exchange
        audience: String,
    },
}

/// Context object carried through every API call
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the customer API
    pub api_base_url: String,
    /// Base URL of the assets/ingestor service
    pub assets_base_url: String,
    /// Base URL of the legacy API
    pub legacy_base_url: String,
    /// Full URL of the OAuth token endpoint
    pub token_url: String,
    /// Organization id, sent as the `org_id` query parameter on every call
    pub org_id: String,
    /// Authentication mode
    pub auth: AuthConfig,
    /// Total per-request timeout (covers long export downloads)
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl ApiConfig {
    /// Create a config with default endpoints for the given org and auth
    pub fn new(org_id: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            assets_base_url: DEFAULT_ASSETS_BASE_URL.to_string(),
            legacy_base_url: DEFAULT_LEGACY_BASE_URL.to_string(),
            token_url: format!("{DEFAULT_API_BASE_URL}{TOKEN_PATH}"),
            org_id: org_id.into(),
            auth,
            timeout: Duration::from_secs(600),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Build a config from environment variables.
    ///
    /// Reads `ORG_ID` plus either `BEARER_TOKEN` or the
    /// `CLIENT_ID`/`CLIENT_SECRET` pair (with optional `AUDIENCE`).
    /// `API_BASE_URL` and `ASSETS_BASE_URL` override the default endpoints.
    /// A `.env` file in the working directory is honored.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let org_id = lookup("ORG_ID").ok_or_else(|| Error::missing_env("ORG_ID"))?;

        let auth = if let Some(token) = lookup("BEARER_TOKEN") {
            AuthConfig::Bearer { token }
        } else {
            let client_id = lookup("CLIENT_ID").ok_or_else(|| Error::missing_env("CLIENT_ID"))?;
            let client_secret =
                lookup("CLIENT_SECRET").ok_or_else(|| Error::missing_env("CLIENT_SECRET"))?;
            let audience = lookup("AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());
            AuthConfig::ClientCredentials {
                client_id,
                client_secret,
                audience,
            }
        };

        let mut config = Self::new(org_id, auth);
        if let Some(base) = lookup("API_BASE_URL") {
            config = config.with_api_base_url(base);
        }
        if let Some(base) = lookup("ASSETS_BASE_URL") {
            config.assets_base_url = trim_trailing_slash(&base);
        }
        config.validate()?;
        Ok(config)
    }

    /// Override the API base URL (token endpoint follows the new base)
    #[must_use]
    pub fn with_api_base_url(mut self, base: impl Into<String>) -> Self {
        let base = trim_trailing_slash(&base.into());
        self.token_url = format!("{base}{TOKEN_PATH}");
        self.api_base_url = base;
        self
    }

    /// Override the token endpoint URL
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Override the assets base URL
    #[must_use]
    pub fn with_assets_base_url(mut self, base: impl Into<String>) -> Self {
        self.assets_base_url = trim_trailing_slash(&base.into());
        self
    }

    /// Override the legacy base URL
    #[must_use]
    pub fn with_legacy_base_url(mut self, base: impl Into<String>) -> Self {
        self.legacy_base_url = trim_trailing_slash(&base.into());
        self
    }

    /// Override the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that all configured endpoints are well-formed URLs
    pub fn validate(&self) -> Result<()> {
        for url in [
            &self.api_base_url,
            &self.assets_base_url,
            &self.legacy_base_url,
            &self.token_url,
        ] {
            Url::parse(url)?;
        }
        Ok(())
    }
}

fn trim_trailing_slash(s: &str) -> String {
    s.trim_end_matches('/').to_string()
}
