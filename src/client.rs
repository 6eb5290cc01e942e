//! Core HTTP client for the Kite Connect REST API v3.
//!
//! The [`KiteClient`] struct is the entry point for the two upstream calls
//! this crate makes. It wraps [`reqwest::Client`] with the version header,
//! signs quote requests with the `token <api_key>:<access_token>` scheme and
//! unwraps Kite's `{status, data}` response envelope.
//!
//! Endpoint methods are added to `KiteClient` via `impl` blocks in the
//! [`crate::api`] module.

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::constants::{API_BASE_URL, KITE_VERSION, KITE_VERSION_HEADER};
use crate::error::{ApiErrorBody, KiteError, Result};

/// Response envelope wrapping every Kite payload.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_type: Option<String>,
}

/// Core HTTP client for the Kite Connect REST API.
///
/// Holds the public API key and, for signed calls, an access token. The API
/// secret is never stored here; it is passed only to
/// [`generate_session`](KiteClient::generate_session).
///
/// # Example
///
/// ```no_run
/// use kite_relay::client::KiteClient;
///
/// # #[tokio::main]
/// # async fn main() -> kite_relay::error::Result<()> {
/// let client = KiteClient::new("your-api-key")?.with_access_token("your-access-token");
/// let snapshot = client.index_snapshot().await?;
/// println!("{snapshot:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KiteClient {
    http: reqwest::Client,
    /// Public API key issued with the Kite Connect app.
    api_key: String,
    /// Session access token, valid until the next daily expiry.
    access_token: Option<String>,
    /// Base URL for REST API requests (defaults to [`API_BASE_URL`]).
    base_url: String,
}

impl KiteClient {
    /// Create a new `KiteClient` for the given API key.
    ///
    /// Uses the default API base URL (`https://api.kite.trade`).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Create a new `KiteClient` pointing at a custom base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .build()?;
        Ok(Self::from_parts(http, api_key, base_url))
    }

    /// Build a client around an existing `reqwest::Client`, sharing its
    /// connection pool.
    ///
    /// The version header is attached per request, so `http` needs no
    /// particular defaults.
    pub fn from_parts(
        http: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            access_token: None,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Attach an access token, consuming the client.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.set_access_token(token);
        self
    }

    /// Replace the access token (e.g. after a fresh token exchange).
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    /// Returns a reference to the underlying `reqwest::Client`.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the current access token, if one is set.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for `path` with the given query pairs.
    ///
    /// Pairs are form-urlencoded, so `NSE:NIFTY 50` is sent as
    /// `NSE%3ANIFTY+50`. Repeated keys are kept in order.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        let mut url = Url::parse(&raw)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers
    // -----------------------------------------------------------------------

    /// Perform a signed GET request and unwrap the envelope's `data`.
    ///
    /// Fails with [`KiteError::MissingConfig`] before any I/O when the API
    /// key or access token is absent.
    pub async fn get_signed<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R> {
        let auth = self.authorization()?;
        let url = self.endpoint(path, query)?;
        tracing::debug!(%url, "GET");

        let resp = self
            .http
            .get(url)
            .header(KITE_VERSION_HEADER, KITE_VERSION)
            .header(header::AUTHORIZATION, auth)
            .send()
            .await?;

        self.handle_response(resp).await
    }

    /// Perform an unsigned form-encoded POST and unwrap the envelope's `data`.
    pub async fn post_form<R: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<R> {
        self.require_api_key()?;
        let url = self.endpoint(path, &[])?;
        tracing::debug!(%url, "POST (form)");

        let resp = self
            .http
            .post(url)
            .header(KITE_VERSION_HEADER, KITE_VERSION)
            .form(form)
            .send()
            .await?;

        self.handle_response(resp).await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Default headers for clients built by [`KiteClient::with_base_url`].
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    pub(crate) fn require_api_key(&self) -> Result<&str> {
        if self.api_key.is_empty() {
            return Err(KiteError::MissingConfig("Kite API key"));
        }
        Ok(&self.api_key)
    }

    /// `Authorization: token <api_key>:<access_token>`.
    fn authorization(&self) -> Result<HeaderValue> {
        let api_key = self.require_api_key()?;
        let token = self
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(KiteError::MissingConfig("Access token"))?;

        let mut value = HeaderValue::from_str(&format!("token {api_key}:{token}")).map_err(|_| {
            KiteError::InvalidArgument("credentials contain invalid header characters".into())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Read a response, returning either the envelope's `data` or a
    /// `KiteError`.
    async fn handle_response<R: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            return Err(self.parse_error_body(status, &body));
        }

        let envelope: Envelope<R> = serde_json::from_slice(&bytes)?;
        if envelope.status != "success" {
            return Err(KiteError::Api {
                status,
                body: ApiErrorBody {
                    error_type: envelope.error_type,
                    message: envelope.message,
                },
            });
        }
        envelope
            .data
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field("data").into())
    }

    /// Try to parse Kite's JSON error envelope; fall back to a raw HTTP
    /// status error.
    pub(crate) fn parse_error_body(&self, status: reqwest::StatusCode, body: &str) -> KiteError {
        if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(body) {
            if api_err.error_type.is_some() || api_err.message.is_some() {
                return KiteError::Api {
                    status,
                    body: api_err,
                };
            }
        }
        KiteError::HttpStatus {
            status,
            body: body.to_owned(),
        }
    }
}
