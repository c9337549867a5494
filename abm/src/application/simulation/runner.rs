//! Market Stress Runner
//!
//! The time-stepped driver. Every period runs the same phases in order:
//!
//! ```text
//!   shock intensity → agents → prices → exchanges → metrics
//! ```
//!
//! A phase only reads config, values committed for period `t - 1`, or values
//! an earlier phase produced for period `t`. Cohorts, exchanges and series
//! are created per run and dropped with it.

use super::config::{CryptoPanicConfig, panic_decay};
use super::sentiment::{NEUTRAL_SENTIMENT, next_sentiment};
use crate::application::agents::{
    Cohort, ExchangePool, InfluencerOutput, InfluencerPool, RetailCohort, RetailOutput,
    WhaleCohort, WhaleOutput,
};
use crate::application::pricing::CorrelatedPriceProcess;
use crate::domain::{Asset, AssetProfile};
use jinn_core::{DecayProfile, ShockDescriptor, SimRng, TimeSeries};
use log::{debug, info};

/// Share of total volume liquidated per unit of panic intensity
const LIQUIDATION_RATE: f64 = 0.1;

/// Per-period series of one run
#[derive(Debug, Clone, PartialEq)]
pub struct PanicSeries {
    /// One price series per asset, in pricing order
    pub prices: Vec<TimeSeries>,
    pub volumes: Vec<TimeSeries>,
    pub liquidation_volume: TimeSeries,
    pub panic_intensity: TimeSeries,
    pub retail_sell_rate: TimeSeries,
    pub whale_activity: TimeSeries,
    /// Mean exchange reserve
    pub exchange_liquidity: TimeSeries,
    pub exchanges_frozen: TimeSeries,
    pub social_sentiment: TimeSeries,
}

impl PanicSeries {
    fn new(periods: usize, assets: usize) -> Self {
        Self {
            prices: vec![TimeSeries::new(periods); assets],
            volumes: vec![TimeSeries::new(periods); assets],
            liquidation_volume: TimeSeries::new(periods),
            panic_intensity: TimeSeries::new(periods),
            retail_sell_rate: TimeSeries::new(periods),
            whale_activity: TimeSeries::new(periods),
            exchange_liquidity: TimeSeries::filled(periods, 1.0),
            exchanges_frozen: TimeSeries::new(periods),
            social_sentiment: TimeSeries::filled(periods, NEUTRAL_SENTIMENT),
        }
    }

    pub fn periods(&self) -> usize {
        self.panic_intensity.len()
    }

    pub fn price(&self, asset: Asset) -> Option<&TimeSeries> {
        self.prices.get(asset.index())
    }

    pub fn volume(&self, asset: Asset) -> Option<&TimeSeries> {
        self.volumes.get(asset.index())
    }

    /// Every series under its wire name, in output order
    pub fn named(&self) -> Vec<(String, &TimeSeries)> {
        let mut named = Vec::new();
        for (asset, series) in Asset::ALL.iter().zip(&self.prices) {
            named.push((format!("{}_price", asset.symbol()), series));
        }
        for (asset, series) in Asset::ALL.iter().zip(&self.volumes) {
            named.push((format!("{}_volume", asset.symbol()), series));
        }
        named.push(("liquidation_volume".to_string(), &self.liquidation_volume));
        named.push(("panic_intensity".to_string(), &self.panic_intensity));
        named.push(("retail_sell_rate".to_string(), &self.retail_sell_rate));
        named.push(("whale_activity".to_string(), &self.whale_activity));
        named.push(("exchange_liquidity".to_string(), &self.exchange_liquidity));
        named.push(("exchanges_frozen".to_string(), &self.exchanges_frozen));
        named.push(("doge_social_media_index".to_string(), &self.social_sentiment));
        named
    }
}

/// Runs one panic scenario over a config
pub struct MarketStressRunner<'a> {
    config: &'a CryptoPanicConfig,
    shock: ShockDescriptor,
    decay: DecayProfile,
}

impl<'a> MarketStressRunner<'a> {
    pub fn new(config: &'a CryptoPanicConfig, shock: ShockDescriptor) -> Self {
        Self {
            config,
            shock,
            decay: panic_decay(),
        }
    }

    pub fn with_decay(mut self, decay: DecayProfile) -> Self {
        self.decay = decay;
        self
    }

    pub fn shock(&self) -> &ShockDescriptor {
        &self.shock
    }

    /// Run every period to completion
    pub fn run(&self, rng: &mut SimRng) -> PanicSeries {
        let config = self.config;
        let periods = config.periods;
        let mut series = PanicSeries::new(periods, config.assets.len());

        let mut retail = RetailCohort::new(config.retail.clone());
        let mut whale = WhaleCohort::new(config.whale.clone());
        let mut influencers = InfluencerPool::new(config.influencer.clone());
        let mut exchanges = ExchangePool::new(config.exchange_count, config.exchange)
            .with_exposure_spread(config.exchange_exposure_spread, rng);
        let process = CorrelatedPriceProcess::new(
            config.correlation.clone(),
            config.assets.iter().map(|a| a.floor_fraction).collect(),
        );

        let social_asset = config
            .assets
            .iter()
            .position(|a| a.sensitivity.social)
            .unwrap_or(0);
        let mut prices = config.initial_prices();
        let mut frozen_fraction = 0.0;

        info!(
            "Simulating crypto panic: {} with intensity {:.2} for {} periods starting at period {}",
            self.shock.kind, self.shock.intensity, self.shock.duration, self.shock.start_period
        );

        for t in 0..periods {
            let intensity = self.shock.intensity_at(t, &self.decay);

            let retail_out = retail.update(intensity, rng);
            let whale_out = whale.update(intensity, rng);
            let social = influencers.update(intensity, rng);
            let contagion = 1.0 + self.shock.contagion_factor * frozen_fraction;
            let withdrawal_pressure = intensity * (1.0 + retail_out.sell_pressure) * contagion;

            // Period 0 is the baseline
            let anchor_return = match series.exchange_liquidity.previous(t) {
                None => 0.0,
                Some(liquidity) => {
                    let volatility: Vec<f64> = config
                        .assets
                        .iter()
                        .map(|a| a.volatility(config.base_volatility, intensity))
                        .collect();
                    let pressure: Vec<f64> = config
                        .assets
                        .iter()
                        .map(|a| self.pressure_term(a, &retail_out, &whale_out, &social, liquidity))
                        .collect();

                    let step = process.step(&prices, &volatility, &pressure, rng);
                    prices = step.prices;
                    step.returns.first().copied().unwrap_or(0.0)
                }
            };

            let volume_multiplier = 1.0 + 3.0 * intensity + 10.0 * anchor_return.abs();
            let mut total_volume = 0.0;
            for (i, profile) in config.assets.iter().enumerate() {
                let volume = profile.market_cap(prices[i]) * profile.daily_turnover * volume_multiplier;
                series.prices[i].set(t, prices[i]);
                series.volumes[i].set(t, volume);
                total_volume += volume;
            }
            series
                .liquidation_volume
                .set(t, total_volume * LIQUIDATION_RATE * intensity);

            let snapshot = exchanges.step(withdrawal_pressure, t);
            frozen_fraction = snapshot.frozen_fraction;

            series.panic_intensity.set(t, intensity);
            series.retail_sell_rate.set(t, retail_out.sell_pressure);
            series.whale_activity.set(t, whale_out.activity());
            series.exchange_liquidity.set(t, snapshot.mean_liquidity);
            series.exchanges_frozen.set(t, snapshot.frozen_count as f64);

            let sentiment = match (
                series.social_sentiment.previous(t),
                series.prices[social_asset].previous(t),
            ) {
                (Some(previous), Some(previous_price)) => {
                    let change = (prices[social_asset] - previous_price) / previous_price;
                    next_sentiment(previous, change, intensity, snapshot.mean_liquidity)
                }
                _ => NEUTRAL_SENTIMENT,
            };
            series.social_sentiment.set(t, sentiment);

            debug!(
                "Period {:2}: {} | frozen {:2} | liquidity {:.3} | sentiment {:4.1} | panic {:.3}",
                t,
                price_line(&config.assets, &prices),
                snapshot.frozen_count,
                snapshot.mean_liquidity,
                sentiment,
                intensity
            );
        }

        info!(
            "Crypto panic finished: {} periods, max {} exchanges frozen",
            periods,
            series.exchanges_frozen.max().unwrap_or(0.0)
        );

        series
    }

    /// Additive return from agent behaviour and liquidity shortfall
    fn pressure_term(
        &self,
        profile: &AssetProfile,
        retail: &RetailOutput,
        whale: &WhaleOutput,
        social: &InfluencerOutput,
        liquidity: f64,
    ) -> f64 {
        let config = self.config;
        let sensitivity = &profile.sensitivity;

        let mut pressure = -retail.sell_pressure * config.retail_price_impact * sensitivity.retail
            + whale.manipulation_intent * config.whale_price_impact * sensitivity.whale
            - (1.0 - liquidity) * config.liquidity_shortfall_impact * sensitivity.liquidity;

        if sensitivity.social {
            pressure += social.impulse();
        }
        pressure
    }
}

fn price_line(assets: &[AssetProfile], prices: &[f64]) -> String {
    assets
        .iter()
        .zip(prices)
        .map(|(a, p)| format!("{}=${:.4}", a.asset, p))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jinn_core::{ShockKind, seeded_rng};

    fn config() -> CryptoPanicConfig {
        CryptoPanicConfig::builtin().unwrap()
    }

    fn whale_dump(intensity: f64) -> ShockDescriptor {
        ShockDescriptor::new(ShockKind::WhaleDump, intensity, 7, 0, 0.15)
    }

    #[test]
    fn test_simulation_runs() {
        let config = config();
        let runner = MarketStressRunner::new(&config, whale_dump(0.6));
        let series = runner.run(&mut seeded_rng(Some(42)));

        assert_eq!(series.periods(), 30);
        for price in &series.prices {
            assert_eq!(price.committed(), 30);
            assert!(price.iter().all(|p| p > 0.0));
        }
        assert_eq!(series.named().len(), 13);
    }

    #[test]
    fn test_deterministic() {
        let config = config();
        let runner = MarketStressRunner::new(&config, whale_dump(0.8));

        let first = runner.run(&mut seeded_rng(Some(123)));
        let second = runner.run(&mut seeded_rng(Some(123)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_baseline_period_keeps_initial_prices() {
        let config = config();
        let runner = MarketStressRunner::new(&config, whale_dump(0.6));
        let series = runner.run(&mut seeded_rng(Some(1)));

        assert_eq!(series.price(Asset::Btc).map(|s| s.get(0)), Some(45000.0));
        assert_eq!(series.price(Asset::Doge).map(|s| s.get(0)), Some(0.15));
        assert_eq!(series.social_sentiment.get(0), NEUTRAL_SENTIMENT);
    }

    #[test]
    fn test_intensity_follows_ramp() {
        let config = config();
        let runner = MarketStressRunner::new(&config, whale_dump(0.6));
        let series = runner.run(&mut seeded_rng(Some(1)));

        assert_eq!(series.panic_intensity.get(0), 0.0);
        assert_eq!(series.panic_intensity.get(3), 0.6);
        assert!(series.panic_intensity.get(10) < 0.06);
    }

    #[test]
    fn test_heavy_panic_freezes_exchanges() {
        let config = config();
        let shock = ShockDescriptor::new(ShockKind::ExchangeHalt, 1.0, 12, 0, 0.5);
        let series = MarketStressRunner::new(&config, shock).run(&mut seeded_rng(Some(5)));

        assert!(series.exchanges_frozen.max().unwrap_or(0.0) > 0.0);
        assert!(series.exchange_liquidity.min().unwrap_or(1.0) < 0.4);
    }

    #[test]
    fn test_exposure_spread_breaks_lockstep() {
        let shock = ShockDescriptor::new(ShockKind::ExchangeHalt, 0.9, 12, 0, 0.0);
        let count = 20.0;

        let uniform = config().with_exchange_exposure_spread(0.0);
        let series = MarketStressRunner::new(&uniform, shock.clone()).run(&mut seeded_rng(Some(42)));
        assert!(series.exchanges_frozen.iter().all(|f| f == 0.0 || f == count));

        let spread = config();
        let series = MarketStressRunner::new(&spread, shock).run(&mut seeded_rng(Some(42)));
        assert!(series.exchanges_frozen.iter().any(|f| f > 0.0 && f < count));
    }

    #[test]
    fn test_zero_periods() {
        let config = config().with_periods(0);
        let series = MarketStressRunner::new(&config, whale_dump(0.6)).run(&mut seeded_rng(None));
        assert_eq!(series.periods(), 0);
    }
}
