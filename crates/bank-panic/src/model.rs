//! Bank panic scenario model
//!
//! Adapts [`BankRunSimulation`] to the [`ScenarioModel`] port.

use crate::parameters::{BankPanicConfig, BankRunShock, default_parameters, panic_shock};
use crate::simulation::{BankPanicSeries, BankRunSimulation};
use crate::summary::BankPanicSummary;
use jinn_core::{ParamMap, ScenarioConfig, SimRng};
use jinn_ports::{ModelError, ModelOutput, ModelResult, ScenarioModel};
use log::info;

/// Typed result of one run
#[derive(Debug, Clone)]
pub struct BankPanicRun {
    pub shock: BankRunShock,
    pub series: BankPanicSeries,
    pub summary: BankPanicSummary,
}

impl BankPanicRun {
    pub fn into_output(self) -> ModelResult<ModelOutput> {
        let mut output = ModelOutput::new(self.series.periods());
        for (name, series) in self.series.named() {
            output.push_series(name, series.clone());
        }
        output.set_summary(&self.summary)?;
        Ok(output)
    }
}

#[derive(Debug, Clone)]
pub struct BankPanicModel {
    parameters: ScenarioConfig,
    config: BankPanicConfig,
}

impl BankPanicModel {
    pub const NAME: &'static str = "bank_panic";

    pub fn new(overrides: &ParamMap) -> ModelResult<Self> {
        let parameters = ScenarioConfig::resolve(&default_parameters(), overrides);
        let config = BankPanicConfig::from_params(&parameters)?;
        config.validate().map_err(ModelError::Domain)?;

        info!(
            "Bank panic model: {} banks, ${:.0}B deposits, {} periods",
            config.num_banks,
            config.total_deposits / 1e9,
            config.periods
        );

        Ok(Self { parameters, config })
    }

    pub fn factory(overrides: &ParamMap) -> ModelResult<Box<dyn ScenarioModel>> {
        Ok(Box::new(Self::new(overrides)?))
    }

    pub fn config(&self) -> &BankPanicConfig {
        &self.config
    }

    pub fn run(&self, shock: BankRunShock, rng: &mut SimRng) -> BankPanicRun {
        let series = BankRunSimulation::new(&self.config, shock.clone()).run(rng);
        let summary = BankPanicSummary::from_series(&self.config, &shock, &series);

        BankPanicRun {
            shock,
            series,
            summary,
        }
    }
}

impl ScenarioModel for BankPanicModel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> &ScenarioConfig {
        &self.parameters
    }

    fn simulate(&self, simulation: &ScenarioConfig, rng: &mut SimRng) -> ModelResult<ModelOutput> {
        let shock = panic_shock(simulation)?;
        self.run(shock, rng).into_output()
    }
}
