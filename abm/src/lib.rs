//! Agent-Based Model (ABM) for crypto market stress
//!
//! Simulates a panic spreading through a crypto market. Agent cohorts react
//! to a decaying shock and a correlated price process turns their pressure
//! into BTC/ETH/DOGE prices. Withdrawals drain a pool of exchanges, which
//! freeze when their reserves run low.
//!
//! The model is exposed to the engine as `crypto_panic` through
//! [`CryptoPanicModel`].

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export key types at crate root
pub use application::simulation::{
    CryptoPanicConfig, CryptoPanicSummary, MarketStressRunner, PanicSeries,
};
pub use domain::{
    Asset, ExchangeState, ExchangeStatus, ExchangeThresholds, QuickEstimate, quick_estimate,
};
pub use infrastructure::{CryptoPanicModel, CryptoPanicRun};
