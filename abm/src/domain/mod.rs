//! Domain layer: Pure business logic and value objects

mod asset;
mod exchange;
mod quick_estimate;

pub use asset::{Asset, AssetProfile, PressureSensitivity};
pub use exchange::{ExchangeState, ExchangeStatus, ExchangeThresholds, Transition};
pub use quick_estimate::{QuickEstimate, quick_estimate};
