//! Jinn Runner - Scenario Engine
//!
//! Dispatches scenarios to registered models and packages the results:
//!
//! - **Registry**: model names mapped to compile-time factories
//! - **Scenario**: the JSON scenario document and its loader
//! - **Engine**: single runs, scenario files and seeded batches
//!
//! ## Architecture
//!
//! ```text
//!   scenario.json ──► Scenario ──► SimulationEngine ──► SimulationReport
//!                                        │
//!                                        ▼
//!                                  ModelRegistry
//!                         ┌──────────────┴──────────────┐
//!                         ▼                             ▼
//!                   crypto_panic                   bank_panic
//!                   (jinn-abm)                 (jinn-bank-panic)
//! ```
//!
//! Every run owns its generator, seeded from the model's `random_seed`
//! parameter or from the batch seed list.

pub mod engine;
pub mod error;
pub mod registry;
pub mod scenario;

pub use engine::{RunMetadata, SimulationEngine, SimulationReport};
pub use error::{EngineError, EngineResult};
pub use registry::{BuiltinModel, ModelRegistry};
pub use scenario::Scenario;
