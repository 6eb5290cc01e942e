//! The four tracked indices and their constituent lists.
//!
//! Each [`IndexName`] knows the instrument key of the index itself (used by
//! the default snapshot) and the stocks that make it up (used by the
//! per-index ticker view). Lists follow the exchange's published
//! composition and need a manual refresh after each index rebalance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KiteError;
use crate::types::instrument::{Exchange, InstrumentKey};

/// A single index member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constituent {
    /// Exchange trading symbol.
    pub symbol: &'static str,
    /// Company display name.
    pub name: &'static str,
}

impl Constituent {
    const fn new(symbol: &'static str, name: &'static str) -> Self {
        Self { symbol, name }
    }
}

/// Index aliases accepted by the relay's `index` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexName {
    Nifty50,
    BankNifty,
    NiftyMidcap,
    Sensex,
}

impl IndexName {
    /// All indices, in snapshot order.
    pub const ALL: [IndexName; 4] = [
        Self::Nifty50,
        Self::BankNifty,
        Self::NiftyMidcap,
        Self::Sensex,
    ];

    /// Alias used in query strings and response keys.
    pub fn alias(self) -> &'static str {
        match self {
            Self::Nifty50 => "nifty50",
            Self::BankNifty => "banknifty",
            Self::NiftyMidcap => "niftymidcap",
            Self::Sensex => "sensex",
        }
    }

    /// Exchange the index and its constituents are quoted on.
    pub fn exchange(self) -> Exchange {
        match self {
            Self::Sensex => Exchange::Bse,
            _ => Exchange::Nse,
        }
    }

    /// Instrument key of the index value itself.
    pub fn instrument(self) -> InstrumentKey {
        let symbol = match self {
            Self::Nifty50 => "NIFTY 50",
            Self::BankNifty => "NIFTY BANK",
            Self::NiftyMidcap => "NIFTY MIDCAP 50",
            Self::Sensex => "SENSEX",
        };
        InstrumentKey::new(self.exchange(), symbol)
    }

    pub fn constituents(self) -> &'static [Constituent] {
        match self {
            Self::Nifty50 => NIFTY_50,
            Self::BankNifty => NIFTY_BANK,
            Self::NiftyMidcap => NIFTY_MIDCAP_50,
            Self::Sensex => SENSEX,
        }
    }

    /// Instrument keys for every constituent, in list order.
    pub fn constituent_keys(self) -> Vec<InstrumentKey> {
        self.constituents()
            .iter()
            .map(|c| InstrumentKey::new(self.exchange(), c.symbol))
            .collect()
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

impl FromStr for IndexName {
    type Err = KiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|index| index.alias().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                KiteError::InvalidArgument(format!(
                    "unknown index `{s}` (expected one of nifty50, banknifty, niftymidcap, sensex)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Constituent tables
// ---------------------------------------------------------------------------

/// NIFTY 50 constituents.
const NIFTY_50: &[Constituent] = &[
    Constituent::new("ADANIENT", "Adani Enterprises"),
    Constituent::new("ADANIPORTS", "Adani Ports and SEZ"),
    Constituent::new("APOLLOHOSP", "Apollo Hospitals"),
    Constituent::new("ASIANPAINT", "Asian Paints"),
    Constituent::new("AXISBANK", "Axis Bank"),
    Constituent::new("BAJAJ-AUTO", "Bajaj Auto"),
    Constituent::new("BAJFINANCE", "Bajaj Finance"),
    Constituent::new("BAJAJFINSV", "Bajaj Finserv"),
    Constituent::new("BEL", "Bharat Electronics"),
    Constituent::new("BHARTIARTL", "Bharti Airtel"),
    Constituent::new("BPCL", "Bharat Petroleum"),
    Constituent::new("BRITANNIA", "Britannia Industries"),
    Constituent::new("CIPLA", "Cipla"),
    Constituent::new("COALINDIA", "Coal India"),
    Constituent::new("DRREDDY", "Dr. Reddy's Laboratories"),
    Constituent::new("EICHERMOT", "Eicher Motors"),
    Constituent::new("GRASIM", "Grasim Industries"),
    Constituent::new("HCLTECH", "HCL Technologies"),
    Constituent::new("HDFCBANK", "HDFC Bank"),
    Constituent::new("HDFCLIFE", "HDFC Life Insurance"),
    Constituent::new("HEROMOTOCO", "Hero MotoCorp"),
    Constituent::new("HINDALCO", "Hindalco Industries"),
    Constituent::new("HINDUNILVR", "Hindustan Unilever"),
    Constituent::new("ICICIBANK", "ICICI Bank"),
    Constituent::new("INDUSINDBK", "IndusInd Bank"),
    Constituent::new("INFY", "Infosys"),
    Constituent::new("ITC", "ITC"),
    Constituent::new("JSWSTEEL", "JSW Steel"),
    Constituent::new("KOTAKBANK", "Kotak Mahindra Bank"),
    Constituent::new("LT", "Larsen & Toubro"),
    Constituent::new("M&M", "Mahindra & Mahindra"),
    Constituent::new("MARUTI", "Maruti Suzuki India"),
    Constituent::new("NESTLEIND", "Nestle India"),
    Constituent::new("NTPC", "NTPC"),
    Constituent::new("ONGC", "Oil & Natural Gas Corporation"),
    Constituent::new("POWERGRID", "Power Grid Corporation of India"),
    Constituent::new("RELIANCE", "Reliance Industries"),
    Constituent::new("SBILIFE", "SBI Life Insurance"),
    Constituent::new("SBIN", "State Bank of India"),
    Constituent::new("SHRIRAMFIN", "Shriram Finance"),
    Constituent::new("SUNPHARMA", "Sun Pharmaceutical Industries"),
    Constituent::new("TATACONSUM", "Tata Consumer Products"),
    Constituent::new("TATAMOTORS", "Tata Motors"),
    Constituent::new("TATASTEEL", "Tata Steel"),
    Constituent::new("TCS", "Tata Consultancy Services"),
    Constituent::new("TECHM", "Tech Mahindra"),
    Constituent::new("TITAN", "Titan Company"),
    Constituent::new("TRENT", "Trent"),
    Constituent::new("ULTRACEMCO", "UltraTech Cement"),
    Constituent::new("WIPRO", "Wipro"),
];

/// NIFTY BANK constituents.
const NIFTY_BANK: &[Constituent] = &[
    Constituent::new("AUBANK", "AU Small Finance Bank"),
    Constituent::new("AXISBANK", "Axis Bank"),
    Constituent::new("BANDHANBNK", "Bandhan Bank"),
    Constituent::new("BANKBARODA", "Bank of Baroda"),
    Constituent::new("FEDERALBNK", "Federal Bank"),
    Constituent::new("HDFCBANK", "HDFC Bank"),
    Constituent::new("ICICIBANK", "ICICI Bank"),
    Constituent::new("IDFCFIRSTB", "IDFC First Bank"),
    Constituent::new("INDUSINDBK", "IndusInd Bank"),
    Constituent::new("KOTAKBANK", "Kotak Mahindra Bank"),
    Constituent::new("PNB", "Punjab National Bank"),
    Constituent::new("SBIN", "State Bank of India"),
];

/// NIFTY MIDCAP 50 constituents.
const NIFTY_MIDCAP_50: &[Constituent] = &[
    Constituent::new("ABCAPITAL", "Aditya Birla Capital"),
    Constituent::new("ALKEM", "Alkem Laboratories"),
    Constituent::new("APLAPOLLO", "APL Apollo Tubes"),
    Constituent::new("ASHOKLEY", "Ashok Leyland"),
    Constituent::new("ASTRAL", "Astral"),
    Constituent::new("AUBANK", "AU Small Finance Bank"),
    Constituent::new("AUROPHARMA", "Aurobindo Pharma"),
    Constituent::new("BALKRISIND", "Balkrishna Industries"),
    Constituent::new("BANKINDIA", "Bank of India"),
    Constituent::new("BHARATFORG", "Bharat Forge"),
    Constituent::new("BHEL", "Bharat Heavy Electricals"),
    Constituent::new("COFORGE", "Coforge"),
    Constituent::new("COLPAL", "Colgate-Palmolive (India)"),
    Constituent::new("CONCOR", "Container Corporation of India"),
    Constituent::new("CUMMINSIND", "Cummins India"),
    Constituent::new("DELHIVERY", "Delhivery"),
    Constituent::new("DIXON", "Dixon Technologies (India)"),
    Constituent::new("FEDERALBNK", "Federal Bank"),
    Constituent::new("GMRAIRPORT", "GMR Airports"),
    Constituent::new("GODREJPROP", "Godrej Properties"),
    Constituent::new("HDFCAMC", "HDFC Asset Management Company"),
    Constituent::new("HINDPETRO", "Hindustan Petroleum"),
    Constituent::new("IDEA", "Vodafone Idea"),
    Constituent::new("IDFCFIRSTB", "IDFC First Bank"),
    Constituent::new("INDHOTEL", "Indian Hotels Company"),
    Constituent::new("INDUSTOWER", "Indus Towers"),
    Constituent::new("IRCTC", "Indian Railway Catering and Tourism Corporation"),
    Constituent::new("JUBLFOOD", "Jubilant FoodWorks"),
    Constituent::new("LICHSGFIN", "LIC Housing Finance"),
    Constituent::new("LUPIN", "Lupin"),
    Constituent::new("MARICO", "Marico"),
    Constituent::new("MAXHEALTH", "Max Healthcare Institute"),
    Constituent::new("MPHASIS", "Mphasis"),
    Constituent::new("MRF", "MRF"),
    Constituent::new("MUTHOOTFIN", "Muthoot Finance"),
    Constituent::new("OBEROIRLTY", "Oberoi Realty"),
    Constituent::new("PAGEIND", "Page Industries"),
    Constituent::new("PERSISTENT", "Persistent Systems"),
    Constituent::new("PETRONET", "Petronet LNG"),
    Constituent::new("PHOENIXLTD", "The Phoenix Mills"),
    Constituent::new("PIIND", "PI Industries"),
    Constituent::new("POLYCAB", "Polycab India"),
    Constituent::new("SAIL", "Steel Authority of India"),
    Constituent::new("SRF", "SRF"),
    Constituent::new("SUPREMEIND", "Supreme Industries"),
    Constituent::new("TATACOMM", "Tata Communications"),
    Constituent::new("TORNTPOWER", "Torrent Power"),
    Constituent::new("TVSMOTOR", "TVS Motor Company"),
    Constituent::new("UPL", "UPL"),
    Constituent::new("VOLTAS", "Voltas"),
];

/// S&P BSE SENSEX constituents, quoted on BSE.
const SENSEX: &[Constituent] = &[
    Constituent::new("ADANIPORTS", "Adani Ports and SEZ"),
    Constituent::new("ASIANPAINT", "Asian Paints"),
    Constituent::new("AXISBANK", "Axis Bank"),
    Constituent::new("BAJAJFINSV", "Bajaj Finserv"),
    Constituent::new("BAJFINANCE", "Bajaj Finance"),
    Constituent::new("BHARTIARTL", "Bharti Airtel"),
    Constituent::new("HCLTECH", "HCL Technologies"),
    Constituent::new("HDFCBANK", "HDFC Bank"),
    Constituent::new("HINDUNILVR", "Hindustan Unilever"),
    Constituent::new("ICICIBANK", "ICICI Bank"),
    Constituent::new("INDUSINDBK", "IndusInd Bank"),
    Constituent::new("INFY", "Infosys"),
    Constituent::new("ITC", "ITC"),
    Constituent::new("JSWSTEEL", "JSW Steel"),
    Constituent::new("KOTAKBANK", "Kotak Mahindra Bank"),
    Constituent::new("LT", "Larsen & Toubro"),
    Constituent::new("M&M", "Mahindra & Mahindra"),
    Constituent::new("MARUTI", "Maruti Suzuki India"),
    Constituent::new("NESTLEIND", "Nestle India"),
    Constituent::new("NTPC", "NTPC"),
    Constituent::new("POWERGRID", "Power Grid Corporation of India"),
    Constituent::new("RELIANCE", "Reliance Industries"),
    Constituent::new("SBIN", "State Bank of India"),
    Constituent::new("SUNPHARMA", "Sun Pharmaceutical Industries"),
    Constituent::new("TATAMOTORS", "Tata Motors"),
    Constituent::new("TATASTEEL", "Tata Steel"),
    Constituent::new("TCS", "Tata Consultancy Services"),
    Constituent::new("TECHM", "Tech Mahindra"),
    Constituent::new("TITAN", "Titan Company"),
    Constituent::new("ULTRACEMCO", "UltraTech Cement"),
];
