//! Market quote types: raw Kite quotes and the relay's normalized views.
//!
//! Derived figures (`change`, `percentChange`) are always recomputed from
//! `last_price` and the previous close; Kite's own `net_change` is kept on
//! [`Quote`] for reference but never forwarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Upstream representation
// ---------------------------------------------------------------------------

/// Day OHLC values. `close` is the previous session's close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Full quote for a single instrument as returned by `GET /quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub instrument_token: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub last_trade_time: Option<String>,
    pub last_price: f64,
    /// Absent for indices.
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub net_change: Option<f64>,
    pub ohlc: Ohlc,
}

impl Quote {
    /// Absolute and percent change against the previous close.
    ///
    /// Returns `None` when the previous close is zero or any input is not
    /// finite, so no `Infinity`/`NaN` ever reaches a client.
    pub fn change(&self) -> Option<(f64, f64)> {
        let last = self.last_price;
        let prev_close = self.ohlc.close;
        if !last.is_finite() || !prev_close.is_finite() || prev_close == 0.0 {
            return None;
        }
        let change = last - prev_close;
        let percent = change / prev_close * 100.0;
        percent.is_finite().then_some((change, percent))
    }

    /// Normalize this quote, stamping it with the fetch time `at`.
    ///
    /// `None` means the quote carries no usable data (see [`Quote::change`]).
    pub fn normalize(&self, at: DateTime<Utc>) -> Option<NormalizedQuote> {
        let (change, percent_change) = self.change()?;
        Some(NormalizedQuote {
            value: self.last_price,
            change,
            percent_change,
            open: self.ohlc.open,
            high: self.ohlc.high,
            low: self.ohlc.low,
            prev_close: self.ohlc.close,
            timestamp: at,
        })
    }
}

// ---------------------------------------------------------------------------
// Relay representation
// ---------------------------------------------------------------------------

/// Locally recomputed price view served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuote {
    pub value: f64,
    pub change: f64,
    pub percent_change: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub prev_close: f64,
    /// When the relay fetched the quote, not Kite's exchange timestamp.
    pub timestamp: DateTime<Utc>,
}

/// The default four-index snapshot. Missing indices serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub nifty50: Option<NormalizedQuote>,
    pub banknifty: Option<NormalizedQuote>,
    pub niftymidcap: Option<NormalizedQuote>,
    pub sensex: Option<NormalizedQuote>,
}

/// One index constituent, shaped for a ticker table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: Option<u64>,
}

impl StockQuote {
    /// Build a row from a raw quote. `None` when the quote has no usable
    /// previous close.
    pub fn from_quote(symbol: &str, name: &str, quote: &Quote) -> Option<Self> {
        let (change, percent_change) = quote.change()?;
        Some(Self {
            symbol: symbol.to_owned(),
            name: name.to_owned(),
            price: quote.last_price,
            change,
            percent_change,
            open: quote.ohlc.open,
            high: quote.ohlc.high,
            low: quote.ohlc.low,
            volume: quote.volume,
        })
    }
}
