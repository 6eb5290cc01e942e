//! # kite-relay
//!
//! A small relay in front of the [Kite Connect](https://kite.trade/docs/connect/v3/)
//! API. It does two things:
//!
//! - **Session exchange**: trades the one-time request token from Kite's
//!   login redirect for the day's access token.
//! - **Quote fetch**: pulls index quotes with the access token and serves
//!   a normalized view with locally computed change figures.
//!
//! The [`client`] and [`api`] modules are usable on their own; [`server`]
//! wraps them in an `axum` router.
//!
//! ## Quick Start
//!
//! ```no_run
//! use kite_relay::client::KiteClient;
//!
//! #[tokio::main]
//! async fn main() -> kite_relay::error::Result<()> {
//!     let client = KiteClient::new("your-api-key")?.with_access_token("your-access-token");
//!     let snapshot = client.index_snapshot().await?;
//!     println!("{:?}", snapshot.nifty50);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod server;
pub mod token_store;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::KiteClient;
/// Re-export the error type and Result alias.
pub use error::{KiteError, Result};
