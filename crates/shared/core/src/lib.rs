//! Jinn Core Domain
//!
//! Pure domain types shared by every scenario model.
//! This crate contains no I/O and is 100% unit testable.

pub mod decay;
pub mod error;
pub mod params;
pub mod rng;
pub mod series;
pub mod shock;
pub mod stats;

// Re-export commonly used types at crate root
pub use decay::{DecayCurve, DecayProfile, RAMP_RESIDUAL_FLOOR, decay};
pub use error::{ParamError, ParamResult};
pub use params::{ParamMap, ScenarioConfig};
pub use rng::{DEFAULT_SEED, SimRng, seeded_rng};
pub use series::{PeriodIndex, TimeSeries};
pub use shock::{ShockDescriptor, ShockKind};
pub use stats::SeverityTier;
