//! Infrastructure Layer
//!
//! Implementation of the scenario model port for the crypto panic simulator.

mod crypto_panic_model;

pub use crypto_panic_model::{CryptoPanicModel, CryptoPanicRun};
