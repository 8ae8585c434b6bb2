//! Upbit exchange SDK for Rust.
//!
//! An async client for the Upbit REST API covering authenticated exchange
//! endpoints (accounts, order chance, order lookup, order placement) and public
//! quotation endpoints (markets, ticker snapshots).
//!
//! # What This SDK Provides
//!
//! - Typed endpoint client: [`UpbitClient`]
//! - Low-level signed/unsigned request execution: [`api::UpbitApi`]
//! - JWT request signing with SHA-512 query hashing: [`auth`]
//! - Classified upstream errors: [`ApiError`] / [`ApiErrorKind`]
//! - A pluggable HTTP layer: [`Transport`], with [`ReqwestTransport`] as default
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use upbit_sdk::{Credentials, UpbitClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), upbit_sdk::UpbitError> {
//!     let client = UpbitClient::new(Credentials::from_env()?)?;
//!
//!     for account in client.get_accounts().await? {
//!         println!("{}: {}", account.currency, account.balance);
//!     }
//!
//!     let tickers = client.get_ticker_snapshots(&["KRW-BTC"]).await?;
//!     println!("KRW-BTC last price: {}", tickers[0].trade_price);
//!     Ok(())
//! }
//! ```
//!
//! # Placing Orders
//!
//! ```rust,no_run
//! use upbit_sdk::{ApiErrorKind, Credentials, OrderSide, PlaceOrderRequest, UpbitClient, UpbitError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), UpbitError> {
//!     let client = UpbitClient::new(Credentials::from_env()?)?;
//!     let request = PlaceOrderRequest::limit("KRW-BTC", OrderSide::Bid, "0.0001", "50000000")
//!         .with_identifier("bot-42");
//!
//!     match client.place_order(&request).await {
//!         Ok(order) => println!("placed {}", order.uuid),
//!         Err(UpbitError::Api(err)) if err.kind == ApiErrorKind::UnderMinTotal => {
//!             println!("order too small or not enough funds: {}", err.message);
//!         }
//!         Err(err) => return Err(err),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! This crate emits debug-level logs through the [`log`](https://docs.rs/log/) facade
//! for API and transport calls. Tokens and secret keys are never logged.
//!
//! # Errors
//!
//! All fallible operations return [`UpbitError`]. Upstream failures arrive as
//! [`UpbitError::Api`] carrying status code, upstream error name and message:
//!
//! - `CreateOrder`: `create_ask_error` / `create_bid_error`
//! - `UnderMinTotal`: `under_min_total_*` and `insufficient_funds_*`
//! - `Generic`: any other upstream name
//! - `HttpStatus`: non-2xx response without an error envelope
pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod params;
pub mod response;
pub mod transport;

// Re-export primary types for convenience.
pub use auth::{Credentials, TokenClaims};
pub use client::{GetOrdersRequest, PlaceOrderRequest, UpbitClient};
pub use config::{UpbitConfig, UPBIT_API_URL};
pub use errors::{ApiError, ApiErrorKind, UpbitError};
pub use models::*;
pub use params::{ParamValue, Params};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
