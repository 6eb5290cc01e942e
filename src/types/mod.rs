//! Request and response types for the Kite Connect API and the relay.
//!
//! ## Organization
//!
//! - [`instrument`]: `EXCHANGE:SYMBOL` instrument keys
//! - [`index`]: The four tracked indices and their constituents
//! - [`quote`]: Raw upstream quotes and their normalized views
//! - [`session`]: Token exchange response
//!
//! The most used types are re-exported at the module root.

pub mod index;
pub mod instrument;
pub mod quote;
pub mod session;

pub use index::IndexName;
pub use instrument::{Exchange, InstrumentKey};
pub use quote::{IndexSnapshot, NormalizedQuote, Ohlc, Quote, StockQuote};
pub use session::SessionToken;
