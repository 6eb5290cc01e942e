//! Error types for the `kite-relay` crate.
//!
//! All fallible client operations in this crate return [`Result<T>`], which
//! is an alias for `std::result::Result<T, KiteError>`.
//!
//! [`KiteError`] covers:
//! - **API errors**: Structured rejections from Kite (`status: "error"`)
//! - **HTTP status errors**: Non-success status codes without a Kite envelope
//! - **HTTP transport errors**: Network, TLS, timeout failures
//! - **JSON errors**: Deserialization failures
//! - **URL errors**: Malformed URL construction
//! - **Missing configuration**: Credentials absent, no request was sent
//! - **Invalid arguments**: Client-side validation errors

use std::fmt;

/// Error envelope returned by the Kite Connect API.
///
/// Kite answers failures with `{"status": "error", "message": ..., "error_type": ...}`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiErrorBody {
    /// Exception class (e.g. "TokenException", "InputException").
    #[serde(default)]
    pub error_type: Option<String>,
    /// Human-readable description of the error.
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// The upstream message, or a placeholder when Kite sent none.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("Unknown error")
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.error_type.as_deref().unwrap_or("KiteException"),
            self.message(),
        )
    }
}

/// All possible errors produced by the Kite client.
#[derive(Debug, thiserror::Error)]
pub enum KiteError {
    /// A rejection returned by the Kite REST API.
    #[error("API error ({status}): {body}")]
    Api {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The decoded error envelope.
        body: ApiErrorBody,
    },

    /// The server returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to deserialize a JSON response body.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A required credential is not configured. Nothing was sent upstream.
    #[error("{0} not configured")]
    MissingConfig(&'static str),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl KiteError {
    /// Whether Kite rejected the call because the access token or session
    /// is no longer valid.
    ///
    /// A fresh token can only be obtained by running the login flow and
    /// token exchange again.
    ///
    /// `TokenException` always counts. Otherwise the message must name the
    /// session or access token and say it is expired, invalid or incorrect;
    /// a bare mention of "token" (e.g. `instrument_token`) does not.
    pub fn is_token_expired(&self) -> bool {
        match self {
            Self::Api { body, .. } => {
                if body.error_type.as_deref() == Some("TokenException") {
                    return true;
                }
                let message = body.message().to_ascii_lowercase();
                let names_credential = message.contains("session")
                    || message.contains("access_token")
                    || message.contains("access token");
                let says_dead = ["expired", "invalid", "incorrect"]
                    .iter()
                    .any(|w| message.contains(w));
                names_credential && says_dead
            }
            _ => false,
        }
    }

    /// The upstream message for a rejection, if Kite sent one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body.message()),
            Self::HttpStatus { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KiteError>;
