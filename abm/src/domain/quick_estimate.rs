//! Closed-form panic estimate
//!
//! A back-of-envelope answer without running the agent simulation: per-asset
//! price change scaled linearly by intensity, plus freeze risk and
//! liquidation volume.

use jinn_core::ShockKind;
use serde::{Deserialize, Serialize};

const BTC_SUPPLY: f64 = 19_500_000.0;
const ETH_SUPPLY: f64 = 120_000_000.0;
const DOGE_SUPPLY: f64 = 140_000_000_000.0;

/// Share of total market cap liquidated at full intensity
const LIQUIDATION_SHARE: f64 = 0.1;
const MAX_FREEZE_RISK: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickEstimate {
    pub btc_price_change: f64,
    pub eth_price_change: f64,
    pub doge_price_change: f64,
    /// Probability-like risk of exchange freezes in [0, 0.8]
    pub exchange_freeze_risk: f64,
    pub liquidation_volume: f64,
}

/// Full-intensity price impact per asset as a fraction
///
/// Unrecognised triggers are treated like a whale dump.
fn base_impact(kind: &ShockKind) -> [f64; 3] {
    match kind {
        ShockKind::DogePump => [0.05, 0.03, 0.80],
        ShockKind::ExchangeHalt => [-0.25, -0.30, -0.35],
        ShockKind::Regulatory => [-0.20, -0.18, -0.40],
        _ => [-0.12, -0.08, -0.25],
    }
}

/// Estimate the impact of a panic from spot prices alone
///
/// Price changes are in percent.
pub fn quick_estimate(
    btc_price: f64,
    eth_price: f64,
    doge_price: f64,
    kind: &ShockKind,
    intensity: f64,
) -> QuickEstimate {
    let [btc, eth, doge] = base_impact(kind);
    let total_market_cap =
        btc_price * BTC_SUPPLY + eth_price * ETH_SUPPLY + doge_price * DOGE_SUPPLY;

    QuickEstimate {
        btc_price_change: btc * intensity * 100.0,
        eth_price_change: eth * intensity * 100.0,
        doge_price_change: doge * intensity * 100.0,
        exchange_freeze_risk: (intensity * 0.6).min(MAX_FREEZE_RISK),
        liquidation_volume: total_market_cap * intensity * LIQUIDATION_SHARE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exchange_halt_estimate() {
        let estimate = quick_estimate(45000.0, 3000.0, 0.15, &ShockKind::ExchangeHalt, 0.5);

        assert_relative_eq!(estimate.btc_price_change, -12.5, epsilon = 1e-9);
        assert_relative_eq!(estimate.eth_price_change, -15.0, epsilon = 1e-9);
        assert_relative_eq!(estimate.doge_price_change, -17.5, epsilon = 1e-9);
        assert_relative_eq!(estimate.exchange_freeze_risk, 0.3, epsilon = 1e-12);

        // (877.5e9 + 360e9 + 21e9) * 0.5 * 0.1
        assert_relative_eq!(estimate.liquidation_volume, 62.925e9, max_relative = 1e-9);
    }

    #[test]
    fn test_freeze_risk_capped() {
        let estimate = quick_estimate(1.0, 1.0, 1.0, &ShockKind::Regulatory, 1.0);
        assert_relative_eq!(estimate.exchange_freeze_risk, 0.6, epsilon = 1e-12);

        let extreme = quick_estimate(1.0, 1.0, 1.0, &ShockKind::Regulatory, 5.0);
        assert_relative_eq!(extreme.exchange_freeze_risk, 0.8);
    }

    #[test]
    fn test_unknown_trigger_falls_back_to_whale_dump() {
        let custom = ShockKind::Custom("rug_pull".to_string());
        assert_eq!(
            quick_estimate(100.0, 10.0, 0.1, &custom, 0.4),
            quick_estimate(100.0, 10.0, 0.1, &ShockKind::WhaleDump, 0.4)
        );
    }

    #[test]
    fn test_doge_pump_is_bullish() {
        let estimate = quick_estimate(45000.0, 3000.0, 0.15, &ShockKind::DogePump, 1.0);
        assert!(estimate.doge_price_change > 0.0);
        assert!(estimate.btc_price_change > 0.0);
    }
}
