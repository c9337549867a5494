//! Crypto panic configuration
//!
//! Built-in defaults for every tunable, and the conversion from a resolved
//! [`ScenarioConfig`] into typed per-component configs.

use crate::application::agents::{InfluencerConfig, RetailConfig, WhaleConfig};
use crate::domain::{Asset, AssetProfile, ExchangeThresholds, PressureSensitivity};
use jinn_core::{
    DecayProfile, ParamMap, ParamResult, RAMP_RESIDUAL_FLOOR, ScenarioConfig, ShockDescriptor,
    ShockKind,
};
use serde_json::json;

/// Built-in parameter defaults
pub fn default_parameters() -> ParamMap {
    let defaults = json!({
        "btc_initial_price": 45000.0,
        "eth_initial_price": 3000.0,
        "doge_initial_price": 0.15,
        "btc_supply": 19_500_000.0,
        "eth_supply": 120_000_000.0,
        "doge_supply": 140_000_000_000.0,

        "num_retail_investors": 1_000_000,
        "num_whales": 100,
        "num_exchanges": 20,
        "num_influencers": 50,

        "retail_panic_threshold": 0.05,
        "retail_sell_probability": 0.3,
        "retail_herd_multiplier": 2.0,
        "retail_doge_fomo": 0.8,

        "whale_coordination_prob": 0.2,
        "whale_doge_pump_power": 2.0,

        "exchange_freeze_threshold": 0.4,
        "exchange_recovery_threshold": 0.8,
        "exchange_recovery_rate": 0.1,
        "exchange_depletion_rate": 0.1,
        "exchange_calm_pressure": 0.1,
        "exchange_exposure_spread": 0.3,

        "doge_celebrity_effect": 0.3,
        "doge_pump_probability": 0.1,
        "doge_volatility_multiplier": 3.0,

        "price_volatility_base": 0.02,
        "retail_price_impact": 0.1,
        "whale_price_impact": 0.05,
        "liquidity_shortfall_impact": 0.2,

        "btc_to_eth_correlation": 0.7,
        "btc_to_doge_correlation": 0.4,
        "eth_to_doge_correlation": 0.3,

        "periods": 30,
        "random_seed": 42,
    });

    match defaults {
        serde_json::Value::Object(map) => map,
        _ => ParamMap::new(),
    }
}

/// Typed configuration for one crypto panic model instance
#[derive(Debug, Clone)]
pub struct CryptoPanicConfig {
    pub periods: usize,
    /// Profiles in pricing order (anchor first)
    pub assets: Vec<AssetProfile>,
    /// Full correlation matrix in pricing order
    pub correlation: Vec<Vec<f64>>,
    pub base_volatility: f64,
    /// Return lost per unit of retail sell pressure
    pub retail_price_impact: f64,
    /// Return moved per unit of whale intent
    pub whale_price_impact: f64,
    /// Return lost per unit of missing exchange liquidity
    pub liquidity_shortfall_impact: f64,
    pub retail: RetailConfig,
    pub whale: WhaleConfig,
    pub influencer: InfluencerConfig,
    pub exchange_count: usize,
    pub exchange: ExchangeThresholds,
    /// Half-width of the per-exchange exposure band around 1
    pub exchange_exposure_spread: f64,
}

impl CryptoPanicConfig {
    /// Config built from the built-in defaults alone
    pub fn builtin() -> ParamResult<Self> {
        Self::from_params(&ScenarioConfig::resolve(
            &default_parameters(),
            &ParamMap::new(),
        ))
    }

    pub fn from_params(params: &ScenarioConfig) -> ParamResult<Self> {
        let fomo = params.f64("retail_doge_fomo")?;
        let pump_power = params.f64("whale_doge_pump_power")?;

        let assets = vec![
            AssetProfile {
                asset: Asset::Btc,
                initial_price: params.f64("btc_initial_price")?,
                supply: params.f64("btc_supply")?,
                daily_turnover: 0.02,
                volatility_multiplier: 1.0,
                panic_volatility: 2.0,
                floor_fraction: 0.01,
                sensitivity: PressureSensitivity::neutral(),
            },
            AssetProfile {
                asset: Asset::Eth,
                initial_price: params.f64("eth_initial_price")?,
                supply: params.f64("eth_supply")?,
                daily_turnover: 0.03,
                volatility_multiplier: 1.0,
                panic_volatility: 2.5,
                floor_fraction: 0.01,
                sensitivity: PressureSensitivity {
                    retail: 1.2,
                    whale: 0.8,
                    ..PressureSensitivity::neutral()
                },
            },
            AssetProfile {
                asset: Asset::Doge,
                initial_price: params.f64("doge_initial_price")?,
                supply: params.f64("doge_supply")?,
                daily_turnover: 0.05,
                volatility_multiplier: params.f64("doge_volatility_multiplier")?,
                panic_volatility: 3.0,
                floor_fraction: 0.001,
                sensitivity: PressureSensitivity {
                    retail: fomo,
                    whale: pump_power,
                    liquidity: 1.5,
                    social: true,
                },
            },
        ];

        let btc_eth = params.f64("btc_to_eth_correlation")?;
        let btc_doge = params.f64("btc_to_doge_correlation")?;
        let eth_doge = params.f64("eth_to_doge_correlation")?;
        let correlation = vec![
            vec![1.0, btc_eth, btc_doge],
            vec![btc_eth, 1.0, eth_doge],
            vec![btc_doge, eth_doge, 1.0],
        ];

        let retail = RetailConfig {
            population: params.u64("num_retail_investors")?,
            ..Default::default()
        }
        .with_panic_threshold(params.f64("retail_panic_threshold")?)
        .with_sell_probability(params.f64("retail_sell_probability")?)
        .with_herd_multiplier(params.f64("retail_herd_multiplier")?);

        let whale = WhaleConfig {
            population: params.u64("num_whales")?,
            ..Default::default()
        }
        .with_coordination_rate(params.f64("whale_coordination_prob")?);

        let influencer = InfluencerConfig {
            population: params.u64("num_influencers")?,
            ..Default::default()
        }
        .with_celebrity_probability(params.f64("doge_celebrity_effect")?)
        .with_pump_probability(params.f64("doge_pump_probability")?);

        let exchange = ExchangeThresholds {
            freeze_below: params.f64("exchange_freeze_threshold")?,
            reopen_above: params.f64("exchange_recovery_threshold")?,
            depletion_rate: params.f64("exchange_depletion_rate")?,
            recovery_rate: params.f64("exchange_recovery_rate")?,
            calm_pressure: params.f64("exchange_calm_pressure")?,
        };

        Ok(Self {
            periods: params.u64("periods")? as usize,
            assets,
            correlation,
            base_volatility: params.f64("price_volatility_base")?,
            retail_price_impact: params.f64("retail_price_impact")?,
            whale_price_impact: params.f64("whale_price_impact")?,
            liquidity_shortfall_impact: params.f64("liquidity_shortfall_impact")?,
            retail,
            whale,
            influencer,
            exchange_count: params.u64("num_exchanges")? as usize,
            exchange,
            exchange_exposure_spread: params.f64("exchange_exposure_spread")?,
        })
    }

    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    pub fn with_exchange_exposure_spread(mut self, spread: f64) -> Self {
        self.exchange_exposure_spread = spread;
        self
    }

    pub fn with_exchange_thresholds(mut self, thresholds: ExchangeThresholds) -> Self {
        self.exchange = thresholds;
        self
    }

    pub fn initial_prices(&self) -> Vec<f64> {
        self.assets.iter().map(|a| a.initial_price).collect()
    }

    /// Domain checks that must hold before a run starts
    pub fn validate(&self) -> Result<(), String> {
        self.exchange.validate()?;

        if let Some(bad) = self
            .assets
            .iter()
            .find(|a| !(a.initial_price.is_finite() && a.initial_price > 0.0))
        {
            return Err(format!(
                "{} initial price must be positive, got {}",
                bad.asset, bad.initial_price
            ));
        }

        Ok(())
    }
}

/// Panic description read from the `panic` simulation section
pub fn panic_shock(simulation: &ScenarioConfig) -> ParamResult<ShockDescriptor> {
    let panic = simulation.section("panic")?;

    Ok(ShockDescriptor::new(
        ShockKind::parse(panic.str_or("trigger_type", "whale_dump")?),
        panic.f64_or("trigger_intensity", 0.6)?,
        panic.u64_or("panic_duration", 7)? as usize,
        panic.u64_or("start_period", 0)? as usize,
        panic.f64_or("contagion_factor", 0.15)?,
    ))
}

/// Ramp to mid-window, then a 10% residual fading at e^-0.2 per period
pub fn panic_decay() -> DecayProfile {
    DecayProfile::ramp((-0.2f64).exp(), RAMP_RESIDUAL_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jinn_core::ParamError;

    fn map(value: serde_json::Value) -> ParamMap {
        match value {
            serde_json::Value::Object(m) => m,
            _ => ParamMap::new(),
        }
    }

    #[test]
    fn test_defaults_convert() {
        let config = CryptoPanicConfig::builtin().unwrap();
        assert_eq!(config.periods, 30);
        assert_eq!(config.exchange_count, 20);
        assert_eq!(config.exchange_exposure_spread, 0.3);
        assert_eq!(config.initial_prices(), vec![45000.0, 3000.0, 0.15]);
        assert_eq!(config.correlation[2][1], 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_reach_typed_config() {
        let params = ScenarioConfig::resolve(
            &default_parameters(),
            &map(json!({"periods": 10, "btc_initial_price": 60000.0, "num_exchanges": 5})),
        );
        let config = CryptoPanicConfig::from_params(&params).unwrap();

        assert_eq!(config.periods, 10);
        assert_eq!(config.assets[0].initial_price, 60000.0);
        assert_eq!(config.exchange_count, 5);
    }

    #[test]
    fn test_wrong_type_surfaces_on_conversion() {
        let params = ScenarioConfig::resolve(
            &default_parameters(),
            &map(json!({"num_exchanges": "twenty"})),
        );
        assert!(matches!(
            CryptoPanicConfig::from_params(&params),
            Err(ParamError::WrongType { .. })
        ));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let params = ScenarioConfig::resolve(
            &default_parameters(),
            &map(json!({"doge_initial_price": 0.0})),
        );
        let config = CryptoPanicConfig::from_params(&params).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_panic_section_defaults() {
        let shock = panic_shock(&ScenarioConfig::default()).unwrap();
        assert_eq!(shock.kind, ShockKind::WhaleDump);
        assert_eq!(shock.intensity, 0.6);
        assert_eq!(shock.duration, 7);
        assert_eq!(shock.start_period, 0);
        assert_eq!(shock.contagion_factor, 0.15);
    }

    #[test]
    fn test_panic_section_overrides() {
        let simulation = ScenarioConfig::from_map(&map(json!({
            "panic": {"trigger_type": "doge_pump", "trigger_intensity": 0.9, "start_period": 3}
        })));
        let shock = panic_shock(&simulation).unwrap();
        assert_eq!(shock.kind, ShockKind::DogePump);
        assert_eq!(shock.intensity, 0.9);
        assert_eq!(shock.start_period, 3);
    }
}
