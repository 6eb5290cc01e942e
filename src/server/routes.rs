//! Request handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{FixedOffset, Utc};
use secrecy::ExposeSecret as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use subtle::ConstantTimeEq as _;

use super::{ApiError, AppState};
use crate::api::session::next_token_expiry;
use crate::config::vars;
use crate::constants::IST_OFFSET_SECS;
use crate::error::KiteError;
use crate::types::{IndexName, InstrumentKey, StockQuote};

type HandlerResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Query / body helpers
// ---------------------------------------------------------------------------

/// Decoded query pairs, repeated keys kept in order.
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn parse(raw: Option<&str>) -> Self {
        Self(
            url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// First non-blank value for `key`.
    fn first(&self, key: &str) -> Option<&str> {
        self.all(key).next()
    }

    fn all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim())
    }
}

/// Parse an optional JSON body. An empty body is `None`.
fn json_body<T: DeserializeOwned>(body: &Bytes) -> HandlerResult<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}

/// Token from `Authorization: Bearer <token>`, if the caller sent one.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

// ---------------------------------------------------------------------------
// Token exchange
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct ExchangeBody {
    #[serde(default, alias = "requestToken")]
    request_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExchangeResponse {
    access_token: String,
    user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    token_expires: String,
    instructions: Vec<String>,
}

/// `GET /api/token-exchange[?request_token=...]`
///
/// Without a token, answers with the login URL and what to do next.
pub async fn token_exchange_get(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> HandlerResult<Response> {
    let params = QueryParams::parse(query.as_deref());
    match params.first("request_token") {
        Some(token) => exchange(&state, token).await,
        None => login_instructions(&state),
    }
}

/// `POST /api/token-exchange` with the token in the query string or in a
/// JSON body (`request_token` or `requestToken`).
pub async fn token_exchange_post(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> HandlerResult<Response> {
    let params = QueryParams::parse(query.as_deref());
    let from_body = json_body::<ExchangeBody>(&body)?
        .unwrap_or_default()
        .request_token
        .filter(|t| !t.trim().is_empty());

    match params.first("request_token").map(str::to_owned).or(from_body) {
        Some(token) => exchange(&state, &token).await,
        None => Err(ApiError::BadRequest("Request token required".into())),
    }
}

fn login_instructions(state: &AppState) -> HandlerResult<Response> {
    let login_url = state.kite()?.login_url()?;
    let body = json!({
        "message": "Log in to Kite to get a request token.",
        "loginUrl": login_url.as_str(),
        "steps": [
            "Open loginUrl and log in to Zerodha.",
            "Kite redirects to your app's redirect URL with a request_token parameter.",
            "Call this endpoint again with ?request_token=<token> within two minutes.",
        ],
    });
    Ok(Json(body).into_response())
}

async fn exchange(state: &AppState, request_token: &str) -> HandlerResult<Response> {
    let client = state.kite()?;
    let secret = state
        .config()
        .api_secret
        .as_ref()
        .ok_or_else(|| ApiError::from(KiteError::MissingConfig("Kite API secret")))?;

    let session = client
        .generate_session(request_token, secret.expose_secret())
        .await
        .map_err(ApiError::from_exchange)?;

    state.tokens().set(session.access_token.clone()).await;
    tracing::info!(user_id = %session.user_id, "access token exchanged and stored in memory");

    let expiry = next_token_expiry(Utc::now());
    let token_expires = match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(ist) => expiry.with_timezone(&ist).to_rfc3339(),
        None => expiry.to_rfc3339(),
    };

    let body = ExchangeResponse {
        access_token: session.access_token,
        user_id: session.user_id,
        user_name: session.user_name,
        token_expires,
        instructions: vec![
            "This relay now serves quotes with the new token until it restarts.".to_owned(),
            format!(
                "To keep it across restarts, set {} to the access_token value.",
                vars::ACCESS_TOKEN
            ),
            "The token expires daily at 06:00 IST; repeat the login flow each day.".to_owned(),
        ],
    };
    Ok(Json(body).into_response())
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct StocksResponse {
    stocks: Vec<StockQuote>,
}

/// `GET /api/quotes`
///
/// - no parameters: the four-index snapshot
/// - `?index=<name>`: constituent rows for one index
/// - `?i=EX:SYM&i=...`: normalized quotes for arbitrary instruments
///
/// The access token comes from `Authorization: Bearer` when present,
/// otherwise from the token store.
pub async fn quotes(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> HandlerResult<Response> {
    let params = QueryParams::parse(query.as_deref());
    let index = params
        .first("index")
        .map(str::parse::<IndexName>)
        .transpose()?;
    let instruments = params
        .all("i")
        .map(str::parse::<InstrumentKey>)
        .collect::<Result<Vec<_>, _>>()?;

    let token = match bearer_token(&headers) {
        Some(token) => token,
        None => state
            .tokens()
            .get()
            .await
            .ok_or_else(|| ApiError::from(KiteError::MissingConfig("Access token")))?,
    };
    let client = state.kite()?.with_access_token(token);

    if let Some(index) = index {
        let stocks = client
            .index_constituents(index)
            .await
            .map_err(ApiError::from_quote)?;
        return Ok(Json(StocksResponse { stocks }).into_response());
    }

    if !instruments.is_empty() {
        let quotes = client
            .quotes(&instruments)
            .await
            .map_err(ApiError::from_quote)?;
        return Ok(Json(quotes).into_response());
    }

    let snapshot = client.index_snapshot().await.map_err(ApiError::from_quote)?;
    Ok(Json(snapshot).into_response())
}

// ---------------------------------------------------------------------------
// Token store
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreTokenBody {
    #[serde(default)]
    password: Option<String>,
    #[serde(default, alias = "access_token")]
    access_token: Option<String>,
}

/// `POST /api/store-token` with `{"password": ..., "accessToken": ...}`.
///
/// Hands a token obtained elsewhere to the running relay.
pub async fn store_token(State(state): State<AppState>, body: Bytes) -> HandlerResult<Response> {
    let admin = state.config().admin_password.as_ref().ok_or_else(|| {
        ApiError::Config(format!(
            "Admin password not configured on server (set {})",
            vars::ADMIN_PASSWORD
        ))
    })?;

    let body = json_body::<StoreTokenBody>(&body)?.unwrap_or_default();
    let supplied = body.password.as_deref().unwrap_or_default();
    if !password_matches(admin.expose_secret(), supplied) {
        return Err(ApiError::Unauthorized("Unauthorized".into()));
    }
    let token = body
        .access_token
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("accessToken required".into()))?;

    state.tokens().set(token).await;
    tracing::info!("access token stored in memory via admin endpoint");

    let body = json!({
        "success": true,
        "message": format!(
            "Token stored for this process. Set {} to keep it across restarts.",
            vars::ACCESS_TOKEN
        ),
    });
    Ok(Json(body).into_response())
}

/// Constant-time password check. Length still leaks; content does not.
fn password_matches(expected: &str, candidate: &str) -> bool {
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
