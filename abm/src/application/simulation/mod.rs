//! Simulation Framework
//!
//! Configuration, the time-stepped driver and the summary reducer for the
//! crypto panic scenario.
//!
//! # Architecture
//!
//! The [`MarketStressRunner`] coordinates, once per period:
//! - Shock intensity from the decay profile
//! - Cohort updates (retail, whales, influencers)
//! - Correlated price step
//! - Exchange pool update
//! - Metrics collection
//!
//! [`CryptoPanicSummary`] reduces the finished series.

mod config;
mod runner;
mod sentiment;
mod summary;

pub use config::{CryptoPanicConfig, default_parameters, panic_decay, panic_shock};
pub use runner::{MarketStressRunner, PanicSeries};
pub use sentiment::{NEUTRAL_SENTIMENT, next_sentiment};
pub use summary::CryptoPanicSummary;
