//! Constants for the Kite Connect v3 API.
//!
//! Contains base URLs, the API version header, the default index
//! instruments and request limits. These are used internally by
//! [`KiteClient`](crate::client::KiteClient) and the relay server, but are
//! also exported for advanced usage.

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the Kite Connect REST API.
pub const API_BASE_URL: &str = "https://api.kite.trade";

/// Interactive login page that issues a request token on redirect.
pub const LOGIN_URL: &str = "https://kite.zerodha.com/connect/login";

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// Header carrying the Kite Connect API version.
pub const KITE_VERSION_HEADER: &str = "x-kite-version";

/// Kite Connect API version sent with every request.
pub const KITE_VERSION: &str = "3";

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Token exchange endpoint (form-encoded POST).
pub const SESSION_TOKEN_PATH: &str = "/session/token";

/// Full market quote endpoint (GET with repeated `i` parameters).
pub const QUOTE_PATH: &str = "/quote";

// ---------------------------------------------------------------------------
// Instruments
// ---------------------------------------------------------------------------

/// Instruments fetched by the default index snapshot, in response order.
pub const DEFAULT_INDEX_INSTRUMENTS: [&str; 4] = [
    "NSE:NIFTY 50",
    "NSE:NIFTY BANK",
    "NSE:NIFTY MIDCAP 50",
    "BSE:SENSEX",
];

/// Maximum instruments accepted by a single quote request.
pub const MAX_QUOTE_INSTRUMENTS: usize = 500;

// ---------------------------------------------------------------------------
// Session lifetime
// ---------------------------------------------------------------------------

/// Access tokens expire every day at this hour, Indian Standard Time.
pub const TOKEN_EXPIRY_HOUR_IST: u32 = 6;

/// IST offset from UTC, in seconds (UTC+05:30).
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;
