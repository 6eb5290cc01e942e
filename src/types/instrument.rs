//! Instrument keys of the form `EXCHANGE:SYMBOL`.
//!
//! Kite identifies every tradable security and index by its exchange and
//! trading symbol joined with a colon, e.g. `NSE:INFY` or `NSE:NIFTY 50`.
//! Symbols may contain spaces, so keys must be percent-encoded on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KiteError;

// ---------------------------------------------------------------------------
// Exchange
// ---------------------------------------------------------------------------

/// Exchanges the relay quotes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// National Stock Exchange.
    #[serde(rename = "NSE")]
    Nse,
    /// Bombay Stock Exchange.
    #[serde(rename = "BSE")]
    Bse,
}

impl Exchange {
    /// Wire code used as the instrument key prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nse => "NSE",
            Self::Bse => "BSE",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = KiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NSE" => Ok(Self::Nse),
            "BSE" => Ok(Self::Bse),
            other => Err(KiteError::InvalidArgument(format!(
                "unsupported exchange `{other}` (expected NSE or BSE)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// InstrumentKey
// ---------------------------------------------------------------------------

/// An `EXCHANGE:SYMBOL` instrument identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstrumentKey {
    exchange: Exchange,
    symbol: String,
}

impl InstrumentKey {
    /// Build a key from its parts.
    pub fn new(exchange: Exchange, symbol: impl Into<String>) -> Self {
        Self {
            exchange,
            symbol: symbol.into(),
        }
    }

    /// Shorthand for an NSE instrument.
    pub fn nse(symbol: impl Into<String>) -> Self {
        Self::new(Exchange::Nse, symbol)
    }

    /// Shorthand for a BSE instrument.
    pub fn bse(symbol: impl Into<String>) -> Self {
        Self::new(Exchange::Bse, symbol)
    }

    pub fn exchange(&self) -> Exchange {
        self.exchange
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl fmt::Display for InstrumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.exchange, self.symbol)
    }
}

impl FromStr for InstrumentKey {
    type Err = KiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (exchange, symbol) = s.split_once(':').ok_or_else(|| {
            KiteError::InvalidArgument(format!("instrument `{s}` is not of the form EXCHANGE:SYMBOL"))
        })?;
        if symbol.trim().is_empty() {
            return Err(KiteError::InvalidArgument(format!(
                "instrument `{s}` has an empty symbol"
            )));
        }
        Ok(Self::new(exchange.parse()?, symbol))
    }
}

impl TryFrom<String> for InstrumentKey {
    type Error = KiteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InstrumentKey> for String {
    fn from(key: InstrumentKey) -> Self {
        key.to_string()
    }
}
