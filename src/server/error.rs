//! HTTP error responses for the relay.
//!
//! | Kind | Status |
//! |---|---|
//! | Missing credential or token | 500 |
//! | Bad client input | 400 |
//! | Upstream rejection | 400 |
//! | Upstream token/session expiry (quotes) | 401 |
//! | Wrong admin password | 401 |
//! | Transport / parse failure | 500 |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::KiteError;

/// JSON error body: `{"error": ..., "details": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A request failure, ready to be rendered as a response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A credential or token is not configured. Nothing was sent upstream.
    #[error("{0}")]
    Config(String),

    /// The caller's request is unusable.
    #[error("{0}")]
    BadRequest(String),

    /// The caller is not allowed to do this.
    #[error("{0}")]
    Unauthorized(String),

    /// Kite failed the call, or could not be reached.
    #[error("{error}")]
    Upstream {
        status: StatusCode,
        error: String,
        details: Option<String>,
    },
}

impl ApiError {
    /// Map a quote-fetch failure. Token or session expiry becomes 401 so the
    /// caller knows to run the token exchange again.
    pub fn from_quote(err: KiteError) -> Self {
        if err.is_token_expired() {
            return Self::Upstream {
                status: StatusCode::UNAUTHORIZED,
                error: "Access token expired or invalid. Run the token exchange again to get a fresh token.".into(),
                details: err.upstream_message().map(str::to_owned),
            };
        }
        Self::from_kite(err, "Kite API error")
    }

    /// Map a token-exchange failure. Every upstream rejection is a 400.
    pub fn from_exchange(err: KiteError) -> Self {
        Self::from_kite(err, "Failed to get access token")
    }

    fn from_kite(err: KiteError, rejected: &str) -> Self {
        let upstream = err.upstream_message().map(str::to_owned);
        match err {
            KiteError::MissingConfig(what) => Self::Config(format!("{what} not configured on server")),
            KiteError::InvalidArgument(msg) => Self::BadRequest(msg),
            KiteError::Api { .. } | KiteError::HttpStatus { .. } => Self::Upstream {
                status: StatusCode::BAD_REQUEST,
                error: rejected.to_owned(),
                details: upstream,
            },
            KiteError::Http(e) => Self::Upstream {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Failed to reach Kite API".into(),
                details: Some(e.to_string()),
            },
            KiteError::Json(e) => Self::Upstream {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Malformed response from Kite API".into(),
                details: Some(e.to_string()),
            },
            KiteError::Url(e) => Self::Upstream {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Invalid Kite API URL".into(),
                details: Some(e.to_string()),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Upstream { status, .. } => *status,
        }
    }
}

impl From<KiteError> for ApiError {
    fn from(err: KiteError) -> Self {
        Self::from_kite(err, "Kite API error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            Self::Upstream { details, .. } => details.clone(),
            _ => None,
        };
        if status.is_server_error() {
            tracing::error!(%status, error = %self, details = details.as_deref(), "request failed");
        } else {
            tracing::warn!(%status, error = %self, details = details.as_deref(), "request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}
