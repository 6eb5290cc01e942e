//! Token exchange types.

use serde::{Deserialize, Serialize};

/// Session returned by `POST /session/token`.
///
/// Kite sends a full user profile alongside the token; only the fields the
/// relay forwards are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub access_token: String,
    #[serde(default)]
    pub public_token: Option<String>,
    #[serde(default)]
    pub login_time: Option<String>,
}
