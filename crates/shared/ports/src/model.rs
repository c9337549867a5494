use jinn_core::{DEFAULT_SEED, ParamMap, ScenarioConfig, SimRng};

use crate::error::ModelResult;
use crate::output::ModelOutput;

/// Port for scenario models
///
/// A model is constructed once from its parameter overrides (resolved against
/// its own defaults) and can then be simulated any number of times. All
/// per-run state lives inside `simulate`; the generator is owned by the
/// caller so that independent runs never share one.
pub trait ScenarioModel: Send + Sync {
    /// Registry name of the model
    fn name(&self) -> &'static str;

    /// Resolved, immutable parameters
    fn parameters(&self) -> &ScenarioConfig;

    /// Seed for the run generator (`random_seed` parameter)
    fn seed(&self) -> ModelResult<u64> {
        Ok(self.parameters().u64_or("random_seed", DEFAULT_SEED)?)
    }

    /// Run one scenario to completion
    fn simulate(&self, simulation: &ScenarioConfig, rng: &mut SimRng) -> ModelResult<ModelOutput>;
}

/// Compile-time constructor registered under a model name
pub type ModelFactory = fn(&ParamMap) -> ModelResult<Box<dyn ScenarioModel>>;
