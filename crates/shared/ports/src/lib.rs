//! Jinn Ports
//!
//! The contract every scenario model satisfies, and the result record it
//! hands back. These define the boundary between model internals and the
//! engine that dispatches to them.

mod error;
mod model;
mod output;

pub use error::{ModelError, ModelResult};
pub use model::{ModelFactory, ScenarioModel};
pub use output::ModelOutput;
