//! Offline tests for checksums, normalization, instrument keys, indices,
//! configuration and the token store.

use chrono::{DateTime, TimeZone, Utc};

use kite_relay::api::session::{checksum, next_token_expiry};
use kite_relay::config::{ConfigError, RelayConfig, vars};
use kite_relay::error::KiteError;
use kite_relay::token_store::{MemoryTokenStore, TokenStore};
use kite_relay::types::{Exchange, IndexName, InstrumentKey, Ohlc, Quote};

fn quote(last_price: f64, close: f64) -> Quote {
    Quote {
        instrument_token: Some(256265),
        timestamp: None,
        last_trade_time: None,
        last_price,
        volume: None,
        net_change: Some(-999.0),
        ohlc: Ohlc {
            open: 95.0,
            high: 101.0,
            low: 94.0,
            close,
        },
    }
}

fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

// ===================================================================
// Checksum
// ===================================================================

#[test]
fn checksum_matches_known_vectors() {
    // sha256("abc")
    assert_eq!(
        checksum("a", "b", "c"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        checksum("kitefront_key", "req_tok_123", "s3cr3t"),
        "a34af586d68b075d1c5093ff49715b0fe954c5a81cb2581095ae7b3ed6b76391"
    );
    assert_eq!(
        checksum("my_api_key", "my_request_token", "my_api_secret"),
        "9d183880c6b1b8cbef59720852c4b880eefc4de66027736a55bc5c51fcdc7464"
    );
}

#[test]
fn checksum_depends_on_concatenation_only() {
    assert_eq!(checksum("xyz", "abc", "secret"), checksum("xyza", "bc", "secret"));
    assert_eq!(
        checksum("xyz", "abc", "secret"),
        "44a55c3a1cc680979580c5644176eb5f27e2d6e0aa7be11b29ac1735dcaeae8b"
    );
}

// ===================================================================
// Normalization
// ===================================================================

#[test]
fn normalize_computes_change_locally() {
    let now = Utc.with_ymd_and_hms(2024, 6, 7, 10, 0, 0).unwrap();
    let n = quote(100.0, 90.0).normalize(now).expect("quote has data");

    assert_eq!(n.value, 100.0);
    assert_eq!(n.change, 10.0);
    assert!((n.percent_change - 11.111_111).abs() < 1e-3);
    assert_eq!(n.prev_close, 90.0);
    assert_eq!((n.open, n.high, n.low), (95.0, 101.0, 94.0));
    assert_eq!(n.timestamp, now);
}

#[test]
fn normalize_handles_falling_price() {
    let n = quote(45.0, 50.0).normalize(Utc::now()).unwrap();
    assert_eq!(n.change, -5.0);
    assert!((n.percent_change + 10.0).abs() < 1e-9);
}

#[test]
fn zero_prev_close_is_absent_data() {
    assert!(quote(100.0, 0.0).normalize(Utc::now()).is_none());
    assert!(quote(100.0, 0.0).change().is_none());
}

#[test]
fn non_finite_inputs_are_absent_data() {
    assert!(quote(f64::NAN, 90.0).normalize(Utc::now()).is_none());
    assert!(quote(100.0, f64::INFINITY).normalize(Utc::now()).is_none());
}

#[test]
fn normalized_quote_serializes_camel_case() {
    let now = Utc.with_ymd_and_hms(2024, 6, 7, 10, 0, 0).unwrap();
    let json = serde_json::to_value(quote(100.0, 90.0).normalize(now).unwrap()).unwrap();
    assert_eq!(json["percentChange"].as_f64().map(|p| (p * 1000.0).round()), Some(11111.0));
    assert_eq!(json["prevClose"], 90.0);
    assert_eq!(json["timestamp"], "2024-06-07T10:00:00Z");
    assert!(json.get("net_change").is_none());
}

#[test]
fn quote_deserializes_index_payload_without_volume() {
    let q: Quote = serde_json::from_value(serde_json::json!({
        "instrument_token": 256265,
        "timestamp": "2024-06-07 15:30:00",
        "last_price": 23290.15,
        "net_change": 0,
        "ohlc": { "open": 22821.85, "high": 23320.2, "low": 22789.05, "close": 22821.4 }
    }))
    .unwrap();
    assert_eq!(q.volume, None);
    assert_eq!(q.ohlc.close, 22821.4);
}

// ===================================================================
// Instrument keys
// ===================================================================

#[test]
fn instrument_key_parses_and_displays() {
    let key: InstrumentKey = "NSE:NIFTY 50".parse().unwrap();
    assert_eq!(key.exchange(), Exchange::Nse);
    assert_eq!(key.symbol(), "NIFTY 50");
    assert_eq!(key.to_string(), "NSE:NIFTY 50");

    let bse: InstrumentKey = "BSE:SENSEX".parse().unwrap();
    assert_eq!(bse, InstrumentKey::bse("SENSEX"));
}

#[test]
fn instrument_key_rejects_malformed_input() {
    for bad in ["INFY", "MCX:GOLD", "NSE:", "NSE:  ", ":INFY"] {
        let err = bad.parse::<InstrumentKey>().unwrap_err();
        assert!(matches!(err, KiteError::InvalidArgument(_)), "{bad}: {err:?}");
    }
}

#[test]
fn instrument_key_serde_uses_wire_string() {
    let key = InstrumentKey::nse("M&M");
    assert_eq!(serde_json::to_value(&key).unwrap(), "NSE:M&M");
    let back: InstrumentKey = serde_json::from_str("\"NSE:M&M\"").unwrap();
    assert_eq!(back, key);
}

// ===================================================================
// Indices
// ===================================================================

#[test]
fn index_aliases_round_trip() {
    for index in IndexName::ALL {
        assert_eq!(index.alias().parse::<IndexName>().unwrap(), index);
    }
    assert_eq!("BankNifty".parse::<IndexName>().unwrap(), IndexName::BankNifty);
    assert!("nifty100".parse::<IndexName>().is_err());
}

#[test]
fn index_instruments_match_default_set() {
    let keys: Vec<String> = IndexName::ALL
        .iter()
        .map(|i| i.instrument().to_string())
        .collect();
    assert_eq!(keys, kite_relay::constants::DEFAULT_INDEX_INSTRUMENTS);
}

#[test]
fn constituent_lists_are_sized_and_unique() {
    let expected = [
        (IndexName::Nifty50, 50),
        (IndexName::BankNifty, 12),
        (IndexName::NiftyMidcap, 50),
        (IndexName::Sensex, 30),
    ];
    for (index, len) in expected {
        let members = index.constituents();
        assert_eq!(members.len(), len, "{index}");
        let mut symbols: Vec<&str> = members.iter().map(|c| c.symbol).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), len, "{index} has duplicates");
    }
}

#[test]
fn sensex_constituents_are_quoted_on_bse() {
    assert!(IndexName::Sensex
        .constituent_keys()
        .iter()
        .all(|k| k.exchange() == Exchange::Bse));
    assert!(IndexName::BankNifty
        .constituent_keys()
        .iter()
        .all(|k| k.exchange() == Exchange::Nse));
}

// ===================================================================
// Token expiry
// ===================================================================

#[test]
fn expiry_is_next_six_am_ist() {
    // 05:30 IST -> 06:00 IST the same day.
    assert_eq!(
        next_token_expiry(at("2024-06-07T00:00:00Z")),
        at("2024-06-07T00:30:00Z")
    );
    // 01:30 IST, still before expiry.
    assert_eq!(
        next_token_expiry(at("2024-06-06T20:00:00Z")),
        at("2024-06-07T00:30:00Z")
    );
    // Exactly at expiry rolls to the next day.
    assert_eq!(
        next_token_expiry(at("2024-06-07T00:30:00Z")),
        at("2024-06-08T00:30:00Z")
    );
    // Mid-session.
    assert_eq!(
        next_token_expiry(at("2024-06-07T09:15:42.5Z")),
        at("2024-06-08T00:30:00Z")
    );
}

// ===================================================================
// Configuration
// ===================================================================

fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |name: &str| {
        pairs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| (*v).to_owned())
    }
}

#[test]
fn config_defaults() {
    let config = RelayConfig::from_lookup(lookup(&[(vars::API_KEY, "key")])).unwrap();
    assert_eq!(config.api_key.as_deref(), Some("key"));
    assert!(config.api_secret.is_none());
    assert!(config.access_token.is_none());
    assert_eq!(config.base_url, "https://api.kite.trade");
    assert_eq!(config.bind.to_string(), "0.0.0.0:8080");
    assert!(config.validate().is_ok());
}

#[test]
fn config_blank_values_count_as_unset() {
    let config = RelayConfig::from_lookup(lookup(&[
        (vars::API_KEY, "   "),
        (vars::ACCESS_TOKEN, ""),
    ]))
    .unwrap();
    assert!(config.api_key.is_none());
    assert!(config.access_token.is_none());
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Missing(var)) if var == vars::API_KEY
    ));
}

#[test]
fn config_rejects_bad_bind_and_url() {
    let err = RelayConfig::from_lookup(lookup(&[(vars::BIND, "not-an-address")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var, .. } if var == vars::BIND));

    let err = RelayConfig::from_lookup(lookup(&[(vars::API_BASE_URL, "::nope")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var, .. } if var == vars::API_BASE_URL));
}

// ===================================================================
// Token store
// ===================================================================

#[tokio::test]
async fn memory_token_store_get_set() {
    let store = MemoryTokenStore::new(None);
    assert_eq!(store.get().await, None);

    store.set("tok-1".into()).await;
    assert_eq!(store.get().await.as_deref(), Some("tok-1"));

    let seeded = MemoryTokenStore::new(Some(String::new()));
    assert_eq!(seeded.get().await, None, "empty seed is no token");
}
