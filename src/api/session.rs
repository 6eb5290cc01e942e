//! Session exchange: trade a one-time request token for an access token.
//!
//! The login flow is interactive and happens outside this crate:
//!
//! 1. Send the user to [`KiteClient::login_url`].
//! 2. Kite redirects back with a `request_token` (single use, ~2 minutes).
//! 3. [`KiteClient::generate_session`] exchanges it for an access token that
//!    stays valid until the next 06:00 IST.
//!
//! Nothing is persisted here; storing the returned token is the caller's job.

use chrono::{DateTime, TimeDelta, Utc};
use sha2::{Digest, Sha256};
use url::Url;

use crate::client::KiteClient;
use crate::constants::{
    IST_OFFSET_SECS, KITE_VERSION, LOGIN_URL, SESSION_TOKEN_PATH, TOKEN_EXPIRY_HOUR_IST,
};
use crate::error::{KiteError, Result};
use crate::types::session::SessionToken;

/// Checksum authenticating a token exchange:
/// `hex(sha256(api_key + request_token + api_secret))`, lowercase.
pub fn checksum(api_key: &str, request_token: &str, api_secret: &str) -> String {
    let digest = Sha256::new()
        .chain_update(api_key)
        .chain_update(request_token)
        .chain_update(api_secret)
        .finalize();
    format!("{digest:x}")
}

/// The first daily token expiry (06:00 IST) strictly after `now`.
pub fn next_token_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    const DAY: i64 = 86_400;
    let offset = i64::from(IST_OFFSET_SECS);
    let local = now.timestamp() + offset;
    let mut expiry = local.div_euclid(DAY) * DAY + i64::from(TOKEN_EXPIRY_HOUR_IST) * 3600;
    if expiry <= local {
        expiry += DAY;
    }
    let whole = now - TimeDelta::nanoseconds(i64::from(now.timestamp_subsec_nanos()));
    whole + TimeDelta::seconds(expiry - local)
}

impl KiteClient {
    /// Build the interactive login URL for this API key.
    ///
    /// ```
    /// # use kite_relay::KiteClient;
    /// let client = KiteClient::new("abc123").unwrap();
    /// assert_eq!(
    ///     client.login_url().unwrap().as_str(),
    ///     "https://kite.zerodha.com/connect/login?api_key=abc123&v=3"
    /// );
    /// ```
    pub fn login_url(&self) -> Result<Url> {
        let api_key = self.require_api_key()?;
        Ok(Url::parse_with_params(
            LOGIN_URL,
            &[("api_key", api_key), ("v", KITE_VERSION)],
        )?)
    }

    /// Exchange a request token for a session.
    ///
    /// Fails with [`KiteError::MissingConfig`] before any I/O when the API
    /// key or secret is empty.
    ///
    /// **Endpoint:** `POST /session/token` (form: `api_key`, `request_token`,
    /// `checksum`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kite_relay::KiteClient;
    /// # #[tokio::main]
    /// # async fn main() -> kite_relay::error::Result<()> {
    /// let client = KiteClient::new("your-api-key")?;
    /// let session = client.generate_session("request-token", "your-api-secret").await?;
    /// println!("Access token for {}: {}", session.user_id, session.access_token);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate_session(
        &self,
        request_token: &str,
        api_secret: &str,
    ) -> Result<SessionToken> {
        let api_key = self.require_api_key()?;
        if api_secret.is_empty() {
            return Err(KiteError::MissingConfig("Kite API secret"));
        }
        let request_token = request_token.trim();
        if request_token.is_empty() {
            return Err(KiteError::InvalidArgument("request token is empty".into()));
        }

        let checksum = checksum(api_key, request_token, api_secret);
        let session: SessionToken = self
            .post_form(
                SESSION_TOKEN_PATH,
                &[
                    ("api_key", api_key),
                    ("request_token", request_token),
                    ("checksum", checksum.as_str()),
                ],
            )
            .await?;

        tracing::info!(user_id = %session.user_id, "session token issued");
        Ok(session)
    }
}
