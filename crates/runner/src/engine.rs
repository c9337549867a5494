//! Simulation Engine
//!
//! Resolves a scenario's model through the registry, runs it with a fresh
//! generator and wraps the output with timing metadata. Configuration errors
//! surface before any simulation state exists.

use crate::error::EngineResult;
use crate::registry::ModelRegistry;
use crate::scenario::Scenario;
use chrono::{DateTime, Utc};
use jinn_core::seeded_rng;
use jinn_ports::{ModelFactory, ModelOutput, ScenarioModel};
use log::info;
use serde::Serialize;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetadata {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub execution_time_seconds: f64,
    /// Seed the run generator was built from
    pub seed: u64,
}

/// Result of one scenario run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub model: String,
    /// The scenario as given
    pub scenario: Scenario,
    pub results: ModelOutput,
    pub metadata: RunMetadata,
}

impl SimulationReport {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "scenario": self.scenario,
            "results": self.results.to_json(),
            "metadata": {
                "start_time": self.metadata.start_time.to_rfc3339(),
                "end_time": self.metadata.end_time.to_rfc3339(),
                "execution_time_seconds": self.metadata.execution_time_seconds,
                "seed": self.metadata.seed,
            },
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    registry: ModelRegistry,
}

impl SimulationEngine {
    /// Engine with every built-in model registered
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Register an extra model; a repeated name replaces the earlier one
    pub fn register(&mut self, name: impl Into<String>, factory: ModelFactory) {
        self.registry.register(name, factory);
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.registry.model_names()
    }

    /// Run a scenario seeded from the model's `random_seed` parameter
    pub fn run(&self, scenario: &Scenario) -> EngineResult<SimulationReport> {
        let model = self.registry.create(&scenario.model, &scenario.parameters)?;
        let seed = model.seed()?;
        run_model(model.as_ref(), scenario, seed)
    }

    /// Run a scenario with an explicit seed
    pub fn run_with_seed(&self, scenario: &Scenario, seed: u64) -> EngineResult<SimulationReport> {
        let model = self.registry.create(&scenario.model, &scenario.parameters)?;
        run_model(model.as_ref(), scenario, seed)
    }

    /// Load and run a scenario file
    pub fn run_file(&self, path: impl AsRef<Path>) -> EngineResult<SimulationReport> {
        let scenario = Scenario::from_file(path)?;
        self.run(&scenario)
    }

    /// One independent run per seed, reported in seed order
    ///
    /// The model is built once; each run gets its own generator. With the
    /// `parallel` feature the runs are spread over the rayon pool.
    pub fn run_batch(&self, scenario: &Scenario, seeds: &[u64]) -> EngineResult<Vec<SimulationReport>> {
        let model = self.registry.create(&scenario.model, &scenario.parameters)?;
        let model = model.as_ref();

        info!("Running batch of {} {} simulations", seeds.len(), scenario.model);

        #[cfg(feature = "parallel")]
        let reports: Vec<EngineResult<SimulationReport>> = seeds
            .par_iter()
            .map(|&seed| run_model(model, scenario, seed))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let reports: Vec<EngineResult<SimulationReport>> = seeds
            .iter()
            .map(|&seed| run_model(model, scenario, seed))
            .collect();

        reports.into_iter().collect()
    }
}

fn run_model(model: &dyn ScenarioModel, scenario: &Scenario, seed: u64) -> EngineResult<SimulationReport> {
    let simulation = jinn_core::ScenarioConfig::from_map(&scenario.simulation);
    let mut rng = seeded_rng(Some(seed));

    info!("Running simulation with {} model (seed {})", model.name(), seed);
    let start_time = Utc::now();
    let results = model.simulate(&simulation, &mut rng)?;
    let end_time = Utc::now();

    let execution_time_seconds = (end_time - start_time)
        .to_std()
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    info!("Simulation completed in {:.3} seconds", execution_time_seconds);

    Ok(SimulationReport {
        model: model.name().to_string(),
        scenario: scenario.clone(),
        results,
        metadata: RunMetadata {
            start_time,
            end_time,
            execution_time_seconds,
            seed,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_run_default_scenarios() {
        let engine = SimulationEngine::new();
        for name in ["crypto_panic", "bank_panic"] {
            let report = engine.run(&Scenario::new(name)).unwrap();
            assert_eq!(report.model, name);
            assert_eq!(report.results.period_count(), 30);
            assert_eq!(report.metadata.seed, 42);
            assert!(report.metadata.execution_time_seconds >= 0.0);
            assert!(report.metadata.end_time >= report.metadata.start_time);
        }
    }

    #[test]
    fn test_unknown_model() {
        let engine = SimulationEngine::new();
        assert_eq!(
            engine.run(&Scenario::new("plastic_spread")).err(),
            Some(EngineError::UnknownModel {
                name: "plastic_spread".to_string()
            })
        );
    }

    #[test]
    fn test_report_wire_shape() {
        let engine = SimulationEngine::new();
        let report = engine.run(&Scenario::new("bank_panic")).unwrap();
        let json = report.to_json();

        assert_eq!(json["model"], "bank_panic");
        assert_eq!(json["scenario"]["model"], "bank_panic");
        assert!(json["results"]["periods"].is_array());
        assert!(json["results"]["summary"].is_object());
        assert!(json["metadata"]["start_time"].is_string());
        assert!(json["metadata"]["execution_time_seconds"].is_number());
    }
}
