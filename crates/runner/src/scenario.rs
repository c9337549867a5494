//! Scenario documents
//!
//! A scenario is a UTF-8 JSON object:
//!
//! ```json
//! {
//!   "model": "crypto_panic",
//!   "parameters": { "num_exchanges": 10 },
//!   "simulation": { "panic": { "trigger_type": "exchange_halt" } }
//! }
//! ```
//!
//! Any other top-level key is kept and echoed back in the report.

use crate::error::{EngineError, EngineResult};
use jinn_core::ParamMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Registered model name
    pub model: String,

    /// Constructor overrides
    #[serde(default)]
    pub parameters: ParamMap,

    /// Per-run simulation section
    #[serde(default)]
    pub simulation: ParamMap,

    /// Unrecognised top-level keys, such as `description`
    #[serde(flatten)]
    pub extra: ParamMap,
}

impl Scenario {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            parameters: ParamMap::new(),
            simulation: ParamMap::new(),
            extra: ParamMap::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: ParamMap) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_simulation(mut self, simulation: ParamMap) -> Self {
        self.simulation = simulation;
        self
    }

    /// Load a scenario from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| EngineError::Load {
            path: display.clone(),
            cause: e.to_string(),
        })?;
        let scenario = Self::parse(&content, &display)?;

        info!("Loaded {} scenario from {}", scenario.model, display);
        Ok(scenario)
    }

    /// Parse a scenario from a JSON string
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Self::parse(json, "<inline>")
    }

    fn parse(json: &str, origin: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::Load {
            path: origin.to_string(),
            cause: e.to_string(),
        })
    }
}
