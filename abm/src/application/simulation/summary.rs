//! Crypto panic summary reducer
//!
//! Pure reduction of a completed [`PanicSeries`]. Reducing the same run twice
//! gives the same summary.

use super::runner::PanicSeries;
use crate::domain::Asset;
use jinn_core::stats::{self, SeverityTier};
use jinn_core::{ShockDescriptor, TimeSeries};
use serde::Serialize;
use std::collections::BTreeMap;

/// BTC must keep this share of its opening price for the market to survive
const SURVIVAL_FRACTION: f64 = 0.5;
/// BTC back at this share of its opening price counts as recovered
const RECOVERY_FRACTION: f64 = 0.95;
const PANIC_PERIOD_THRESHOLD: f64 = 0.1;
const STRESSED_LIQUIDITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoPanicSummary {
    pub trigger_type: String,
    pub max_panic_intensity: f64,
    pub panic_periods: usize,

    pub btc_total_return_pct: f64,
    pub btc_max_drawdown_pct: f64,
    pub eth_total_return_pct: f64,
    pub eth_max_drawdown_pct: f64,
    pub doge_total_return_pct: f64,
    pub doge_max_drawdown_pct: f64,
    pub doge_max_pump_pct: f64,

    pub doge_max_social_media_index: f64,
    pub min_doge_social_media_index: f64,
    pub doge_social_media_periods: usize,
    pub doge_social_media_ratio: f64,

    pub max_frozen_exchanges: usize,
    pub min_exchange_liquidity: f64,
    pub exchange_stress_periods: usize,

    /// First period BTC regains 95% of its opening price after its trough
    pub recovery_period: usize,
    pub total_liquidation_volume: f64,

    pub market_survived: bool,
    pub system_stability: bool,
    pub severity: SeverityTier,

    /// `peak_<series>` and `trough_<series>` for every reported series
    #[serde(flatten)]
    pub extremes: BTreeMap<String, f64>,
}

impl CryptoPanicSummary {
    pub fn from_series(shock: &ShockDescriptor, series: &PanicSeries, exchange_count: usize) -> Self {
        let periods = series.periods();
        let btc = prices(series, Asset::Btc);
        let eth = prices(series, Asset::Eth);
        let doge = prices(series, Asset::Doge);

        let sentiment = &series.social_sentiment;
        let social_periods = sentiment.count_where(|v| v > 50.0);
        let max_frozen = series.exchanges_frozen.max().unwrap_or(0.0) as usize;
        let min_liquidity = series.exchange_liquidity.min().unwrap_or(1.0);
        let max_sentiment = sentiment.max().unwrap_or(50.0);

        let btc_drawdown_pct = stats::max_drawdown(btc) * 100.0;
        let frozen_share = if exchange_count == 0 {
            0.0
        } else {
            max_frozen as f64 / exchange_count as f64
        };
        let severity = SeverityTier::classify(btc_drawdown_pct, 15.0, 40.0).max(
            SeverityTier::classify(frozen_share, 0.0, 0.5),
        );

        let market_survived = match (btc.first(), btc.last()) {
            (Some(first), Some(last)) => *last > *first * SURVIVAL_FRACTION,
            _ => true,
        };

        Self {
            trigger_type: shock.kind.to_string(),
            max_panic_intensity: series.panic_intensity.max().unwrap_or(0.0),
            panic_periods: series
                .panic_intensity
                .count_where(|v| v > PANIC_PERIOD_THRESHOLD),

            btc_total_return_pct: stats::total_return_pct(btc),
            btc_max_drawdown_pct: btc_drawdown_pct,
            eth_total_return_pct: stats::total_return_pct(eth),
            eth_max_drawdown_pct: stats::max_drawdown(eth) * 100.0,
            doge_total_return_pct: stats::total_return_pct(doge),
            doge_max_drawdown_pct: stats::max_drawdown(doge) * 100.0,
            doge_max_pump_pct: stats::max_gain_pct(doge),

            doge_max_social_media_index: max_sentiment,
            min_doge_social_media_index: sentiment.min().unwrap_or(50.0),
            doge_social_media_periods: social_periods,
            doge_social_media_ratio: if periods == 0 {
                0.0
            } else {
                social_periods as f64 / periods as f64
            },

            max_frozen_exchanges: max_frozen,
            min_exchange_liquidity: min_liquidity,
            exchange_stress_periods: series
                .exchange_liquidity
                .count_where(|v| v < STRESSED_LIQUIDITY),

            recovery_period: stats::recovery_period(btc, RECOVERY_FRACTION).unwrap_or(periods),
            total_liquidation_volume: series.liquidation_volume.sum(),

            market_survived,
            system_stability: min_liquidity > 0.2 && max_sentiment < 90.0,
            severity,

            extremes: extremes(series),
        }
    }
}

fn prices(series: &PanicSeries, asset: Asset) -> &[f64] {
    series.price(asset).map(TimeSeries::as_slice).unwrap_or(&[])
}

fn extremes(series: &PanicSeries) -> BTreeMap<String, f64> {
    let mut out = BTreeMap::new();
    for (name, values) in series.named() {
        if let (Some(max), Some(min)) = (values.max(), values.min()) {
            out.insert(format!("peak_{}", name), max);
            out.insert(format!("trough_{}", name), min);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::simulation::{CryptoPanicConfig, MarketStressRunner};
    use approx::assert_relative_eq;
    use jinn_core::{ShockKind, seeded_rng};

    fn run(intensity: f64, seed: u64) -> (ShockDescriptor, PanicSeries) {
        let config = CryptoPanicConfig::builtin().unwrap();
        let shock = ShockDescriptor::new(ShockKind::Regulatory, intensity, 7, 0, 0.15);
        let series = MarketStressRunner::new(&config, shock.clone()).run(&mut seeded_rng(Some(seed)));
        (shock, series)
    }

    #[test]
    fn test_summary_idempotent() {
        let (shock, series) = run(0.7, 3);
        let first = CryptoPanicSummary::from_series(&shock, &series, 20);
        let second = CryptoPanicSummary::from_series(&shock, &series, 20);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extremes_match_series() {
        let (shock, series) = run(0.7, 3);
        let summary = CryptoPanicSummary::from_series(&shock, &series, 20);

        for (name, values) in series.named() {
            let peak = summary.extremes[&format!("peak_{}", name)];
            let trough = summary.extremes[&format!("trough_{}", name)];
            assert_eq!(Some(peak), values.max());
            assert_eq!(Some(trough), values.min());
            assert!(values.iter().all(|v| v <= peak && v >= trough));
        }
    }

    #[test]
    fn test_fields_agree_with_series() {
        let (shock, series) = run(0.9, 8);
        let summary = CryptoPanicSummary::from_series(&shock, &series, 20);

        assert_eq!(summary.trigger_type, "regulatory");
        assert_relative_eq!(summary.max_panic_intensity, 0.9, epsilon = 1e-12);
        assert_eq!(summary.max_frozen_exchanges as f64, summary.extremes["peak_exchanges_frozen"]);
        assert_eq!(summary.min_exchange_liquidity, summary.extremes["trough_exchange_liquidity"]);
        assert!(summary.btc_max_drawdown_pct >= 0.0);
        assert!(summary.recovery_period <= 30);
    }

    #[test]
    fn test_flattened_wire_shape() {
        let (shock, series) = run(0.5, 1);
        let summary = CryptoPanicSummary::from_series(&shock, &series, 20);
        let json = serde_json::to_value(&summary).unwrap();

        assert!(json.get("peak_btc_price").is_some());
        assert!(json.get("trough_doge_social_media_index").is_some());
        assert!(json["severity"].is_string());
        assert!(json["market_survived"].is_boolean());
    }
}
