//! Crypto panic scenario model
//!
//! Adapts the market stress runner to the [`ScenarioModel`] port: resolves
//! parameters at construction, reads the `panic` section per run, and turns
//! the finished series into a [`ModelOutput`].

use crate::application::simulation::{
    CryptoPanicConfig, CryptoPanicSummary, MarketStressRunner, PanicSeries, default_parameters,
    panic_shock,
};
use jinn_core::{ParamMap, ScenarioConfig, ShockDescriptor, SimRng};
use jinn_ports::{ModelError, ModelOutput, ModelResult, ScenarioModel};
use log::info;

/// Typed result of one run, before it crosses the serialization boundary
#[derive(Debug, Clone)]
pub struct CryptoPanicRun {
    pub shock: ShockDescriptor,
    pub series: PanicSeries,
    pub summary: CryptoPanicSummary,
}

impl CryptoPanicRun {
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
pub struct CryptoPanicModel {
    parameters: ScenarioConfig,
    config: CryptoPanicConfig,
}

impl CryptoPanicModel {
    pub const NAME: &'static str = "crypto_panic";

    /// Resolve `overrides` against the built-in defaults
    pub fn new(overrides: &ParamMap) -> ModelResult<Self> {
        let parameters = ScenarioConfig::resolve(&default_parameters(), overrides);
        let config = CryptoPanicConfig::from_params(&parameters)?;
        config.validate().map_err(ModelError::Domain)?;

        info!(
            "Crypto panic model: {} periods, {} exchanges, {} assets",
            config.periods,
            config.exchange_count,
            config.assets.len()
        );

        Ok(Self { parameters, config })
    }

    /// Factory registered with the engine
    pub fn factory(overrides: &ParamMap) -> ModelResult<Box<dyn ScenarioModel>> {
        Ok(Box::new(Self::new(overrides)?))
    }

    pub fn config(&self) -> &CryptoPanicConfig {
        &self.config
    }

    /// Run one panic and keep the typed result
    pub fn run(&self, shock: ShockDescriptor, rng: &mut SimRng) -> CryptoPanicRun {
        let series = MarketStressRunner::new(&self.config, shock.clone()).run(rng);
        let summary = CryptoPanicSummary::from_series(&shock, &series, self.config.exchange_count);

        CryptoPanicRun {
            shock,
            series,
            summary,
        }
    }
}

impl ScenarioModel for CryptoPanicModel {
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

#[cfg(test)]
mod tests {
    use super::*;
    use jinn_core::seeded_rng;
    use serde_json::json;

    fn map(value: serde_json::Value) -> ParamMap {
        match value {
            serde_json::Value::Object(m) => m,
            _ => ParamMap::new(),
        }
    }

    #[test]
    fn test_output_carries_every_series() {
        let model = CryptoPanicModel::new(&ParamMap::new()).unwrap();
        let output = model
            .simulate(&ScenarioConfig::default(), &mut seeded_rng(Some(42)))
            .unwrap();

        assert_eq!(output.period_count(), 30);
        for name in ["btc_price", "eth_volume", "exchanges_frozen", "doge_social_media_index"] {
            assert_eq!(output.series(name).map(|s| s.len()), Some(30), "{}", name);
        }
        assert_eq!(output.summary_value("trigger_type"), Some(&json!("whale_dump")));
    }

    #[test]
    fn test_inverted_exchange_thresholds_rejected() {
        let overrides = map(json!({
            "exchange_freeze_threshold": 0.9,
            "exchange_recovery_threshold": 0.5
        }));
        assert!(matches!(
            CryptoPanicModel::new(&overrides),
            Err(ModelError::Domain(_))
        ));
    }

    #[test]
    fn test_bad_panic_section_is_param_error() {
        let model = CryptoPanicModel::new(&ParamMap::new()).unwrap();
        let simulation = ScenarioConfig::from_map(&map(json!({"panic": {"trigger_intensity": "high"}})));

        assert!(matches!(
            model.simulate(&simulation, &mut seeded_rng(Some(1))),
            Err(ModelError::Param(_))
        ));
    }

    #[test]
    fn test_seed_parameter() {
        let model = CryptoPanicModel::new(&map(json!({"random_seed": 7}))).unwrap();
        assert_eq!(model.seed().unwrap(), 7);
        assert_eq!(CryptoPanicModel::new(&ParamMap::new()).unwrap().seed().unwrap(), 42);
    }
}
