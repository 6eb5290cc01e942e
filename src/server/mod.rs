//! Inbound HTTP surface.
//!
//! | Route | Methods | Handler |
//! |---|---|---|
//! | `/api/token-exchange` | GET, POST | [`routes::token_exchange_get`], [`routes::token_exchange_post`] |
//! | `/api/quotes` | GET | [`routes::quotes`] |
//! | `/api/store-token` | POST | [`routes::store_token`] |
//! | `/health` | GET | [`routes::health`] |
//!
//! `OPTIONS` on any path answers 200 with an empty body and CORS headers,
//! whatever the configuration state.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use secrecy::ExposeSecret as _;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::client::KiteClient;
use crate::config::RelayConfig;
use crate::error::{KiteError, Result};
use crate::token_store::{MemoryTokenStore, TokenStore};

pub use error::ApiError;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<RelayConfig>,
    http: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
}

impl AppState {
    /// State backed by an in-memory token store seeded from
    /// `config.access_token`.
    pub fn new(config: RelayConfig) -> Result<Self> {
        let seed = config
            .access_token
            .as_ref()
            .map(|t| t.expose_secret().to_owned());
        Self::with_token_store(config, Arc::new(MemoryTokenStore::new(seed)))
    }

    /// State backed by a caller-supplied token store.
    pub fn with_token_store(config: RelayConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
            tokens,
        })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    /// A Kite client sharing this state's connection pool, without a token.
    pub(crate) fn kite(&self) -> std::result::Result<KiteClient, ApiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::from(KiteError::MissingConfig("Kite API key")))?;
        Ok(KiteClient::from_parts(
            self.http.clone(),
            api_key,
            self.config.base_url.as_str(),
        ))
    }
}

/// Build the relay router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route(
            "/api/token-exchange",
            get(routes::token_exchange_get).post(routes::token_exchange_post),
        )
        .route("/api/quotes", get(routes::quotes))
        .route("/api/store-token", post(routes::store_token))
        .route("/health", get(routes::health))
        .fallback(routes::not_found)
        .layer(middleware::from_fn(answer_options))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS headers sent with every `OPTIONS` answer.
fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ),
    ]
}

/// Answer every `OPTIONS` request before routing.
///
/// `CorsLayer` only short-circuits true preflights (those carrying
/// `Access-Control-Request-Method`); this covers the rest.
async fn answer_options(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return (StatusCode::OK, cors_headers(), ()).into_response();
    }
    next.run(req).await
}
