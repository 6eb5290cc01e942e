//! Market Quote endpoints: full quotes and the relay's normalized views.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;

use crate::client::KiteClient;
use crate::constants::{MAX_QUOTE_INSTRUMENTS, QUOTE_PATH};
use crate::error::{KiteError, Result};
use crate::types::index::IndexName;
use crate::types::instrument::InstrumentKey;
use crate::types::quote::{IndexSnapshot, NormalizedQuote, Quote, StockQuote};

impl KiteClient {
    /// Retrieve full quotes for a set of instruments.
    ///
    /// The returned map is keyed by `EXCHANGE:SYMBOL`. Instruments Kite does
    /// not recognize are simply absent from it. Up to 500 instruments per
    /// request.
    ///
    /// **Endpoint:** `GET /quote?i=<instrument>&i=<instrument>...`
    pub async fn get_quote(&self, instruments: &[InstrumentKey]) -> Result<HashMap<String, Quote>> {
        if instruments.is_empty() {
            return Err(KiteError::InvalidArgument(
                "at least one instrument is required".into(),
            ));
        }
        if instruments.len() > MAX_QUOTE_INSTRUMENTS {
            return Err(KiteError::InvalidArgument(format!(
                "{} instruments requested, at most {MAX_QUOTE_INSTRUMENTS} allowed",
                instruments.len()
            )));
        }

        let keys: Vec<String> = instruments.iter().map(ToString::to_string).collect();
        let query: Vec<(&str, &str)> = keys.iter().map(|k| ("i", k.as_str())).collect();
        self.get_signed(QUOTE_PATH, &query).await
    }

    /// Normalized quotes for arbitrary instruments.
    ///
    /// Every requested key is present in the result; it maps to `None` when
    /// Kite omitted the instrument or its previous close is zero.
    pub async fn quotes(
        &self,
        instruments: &[InstrumentKey],
    ) -> Result<BTreeMap<String, Option<NormalizedQuote>>> {
        let raw = self.get_quote(instruments).await?;
        let now = Utc::now();
        Ok(instruments
            .iter()
            .map(|key| {
                let key = key.to_string();
                let quote = raw.get(&key).and_then(|q| q.normalize(now));
                (key, quote)
            })
            .collect())
    }

    /// Snapshot of NIFTY 50, NIFTY BANK, NIFTY MIDCAP 50 and SENSEX.
    pub async fn index_snapshot(&self) -> Result<IndexSnapshot> {
        let instruments = IndexName::ALL.map(IndexName::instrument);
        let raw = self.get_quote(&instruments).await?;
        let now = Utc::now();
        let pick = |index: IndexName| {
            raw.get(&index.instrument().to_string())
                .and_then(|q| q.normalize(now))
        };

        Ok(IndexSnapshot {
            nifty50: pick(IndexName::Nifty50),
            banknifty: pick(IndexName::BankNifty),
            niftymidcap: pick(IndexName::NiftyMidcap),
            sensex: pick(IndexName::Sensex),
        })
    }

    /// Quote rows for every constituent of `index`, in list order.
    ///
    /// Constituents without a usable quote are left out rather than
    /// returned as `null`.
    pub async fn index_constituents(&self, index: IndexName) -> Result<Vec<StockQuote>> {
        let instruments = index.constituent_keys();
        let raw = self.get_quote(&instruments).await?;

        let stocks: Vec<StockQuote> = index
            .constituents()
            .iter()
            .zip(&instruments)
            .filter_map(|(member, key)| {
                let quote = raw.get(&key.to_string())?;
                StockQuote::from_quote(member.symbol, member.name, quote)
            })
            .collect();

        if stocks.len() < instruments.len() {
            tracing::debug!(
                %index,
                requested = instruments.len(),
                returned = stocks.len(),
                "some constituents had no usable quote"
            );
        }
        Ok(stocks)
    }
}
