//! betfair-rpc: client for the Betfair Exchange JSON-RPC betting API.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod error;
pub mod types;
pub mod params;
pub mod rpc;
pub mod transport;
pub mod session;
pub mod client;

pub use client::BetfairClient;
pub use config::{AppConfig, Credentials};
pub use error::{BetfairError, Result};
pub use params::{betting_type_string, BettingTypeValue, CancelInstruction, MarketBookQuery, MarketFilter};
pub use session::Session;
