//! REST API endpoint implementations.
//!
//! Each sub-module adds high-level `async` methods to
//! [`KiteClient`](crate::client::KiteClient) via `impl` blocks. All methods
//! handle request signing, HTTP transport, envelope unwrapping and error
//! mapping automatically.
//!
//! ## Usage
//!
//! ```no_run
//! use kite_relay::KiteClient;
//! use kite_relay::types::IndexName;
//!
//! # #[tokio::main]
//! # async fn main() -> kite_relay::Result<()> {
//! let client = KiteClient::new("api-key")?.with_access_token("token");
//! let snapshot = client.index_snapshot().await?;
//! let banks = client.index_constituents(IndexName::BankNifty).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Endpoint | Description |
//! |---|---|---|
//! | [`session`] | `POST /session/token` | Request token → access token exchange |
//! | [`quote`] | `GET /quote` | Full quotes, index snapshot, constituents |

pub mod quote;
pub mod session;
