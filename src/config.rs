//! Relay configuration.
//!
//! Every setting is read once at startup into a [`RelayConfig`] that is
//! handed to the server explicitly; handlers never touch the process
//! environment. The recognized variables are listed in [`vars`].

use std::net::SocketAddr;

use secrecy::SecretString;
use url::Url;

use crate::constants::API_BASE_URL;

/// Environment variables understood by [`RelayConfig::from_env`].
pub mod vars {
    /// Public API key. Required for every upstream call.
    pub const API_KEY: &str = "KITE_API_KEY";
    /// API secret. Required for the token exchange only.
    pub const API_SECRET: &str = "KITE_API_SECRET";
    /// Access token seeding the token store. Required for quotes until a
    /// token exchange or `/api/store-token` supplies one.
    pub const ACCESS_TOKEN: &str = "KITE_ACCESS_TOKEN";
    /// Password guarding `/api/store-token`. The endpoint is disabled
    /// without it.
    pub const ADMIN_PASSWORD: &str = "KITE_RELAY_ADMIN_PASSWORD";
    /// Upstream base URL override.
    pub const API_BASE_URL: &str = "KITE_API_BASE_URL";
    /// Listen address.
    pub const BIND: &str = "KITE_RELAY_BIND";
}

/// Listen address used when [`vars::BIND`] is unset.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable is set but unusable.
    #[error("{var} is invalid: {reason}")]
    Invalid {
        /// The offending variable.
        var: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Static relay configuration. Never mutated after startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<SecretString>,
    pub access_token: Option<SecretString>,
    pub admin_password: Option<SecretString>,
    pub base_url: String,
    pub bind: SocketAddr,
}

impl RelayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let base_url = get(vars::API_BASE_URL).unwrap_or_else(|| API_BASE_URL.to_owned());
        Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            var: vars::API_BASE_URL,
            reason: e.to_string(),
        })?;

        let bind = get(vars::BIND)
            .as_deref()
            .unwrap_or(DEFAULT_BIND)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: vars::BIND,
                reason: e.to_string(),
            })?;

        Ok(Self {
            api_key: get(vars::API_KEY),
            api_secret: get(vars::API_SECRET).map(SecretString::from),
            access_token: get(vars::ACCESS_TOKEN).map(SecretString::from),
            admin_password: get(vars::ADMIN_PASSWORD).map(SecretString::from),
            base_url,
            bind,
        })
    }

    /// Check the configuration once at startup.
    ///
    /// A missing API key is fatal since no operation can work without it.
    /// Other gaps disable individual operations, which then answer with a
    /// configuration error; each is logged here so operators see it early.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_none() {
            return Err(ConfigError::Missing(vars::API_KEY));
        }
        if self.api_secret.is_none() {
            tracing::warn!(var = vars::API_SECRET, "not set; token exchange is disabled");
        }
        if self.access_token.is_none() {
            tracing::warn!(
                var = vars::ACCESS_TOKEN,
                "not set; quotes fail until a token is exchanged or stored"
            );
        }
        if self.admin_password.is_none() {
            tracing::info!(var = vars::ADMIN_PASSWORD, "not set; /api/store-token is disabled");
        }
        Ok(())
    }
}
