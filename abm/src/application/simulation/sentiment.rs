//! Social-media sentiment index for the meme asset
//!
//! 0 is extreme fear, 100 extreme greed, 50 neutral. Blends price momentum,
//! panic, exchange health and the previous reading.

pub const NEUTRAL_SENTIMENT: f64 = 50.0;

const MOMENTUM_WEIGHT: f64 = 0.4;
const PANIC_WEIGHT: f64 = 0.3;
const HEALTH_WEIGHT: f64 = 0.2;
const INERTIA_WEIGHT: f64 = 0.1;

/// Next index reading
///
/// `price_change` is the period return of the meme asset and `liquidity` the
/// mean exchange reserve after this period's update.
pub fn next_sentiment(previous: f64, price_change: f64, intensity: f64, liquidity: f64) -> f64 {
    let momentum = NEUTRAL_SENTIMENT + price_change * 1000.0;
    let panic = NEUTRAL_SENTIMENT - intensity * 40.0;
    let health = liquidity * 50.0;
    let inertia = previous + intensity * 0.05;

    let index = MOMENTUM_WEIGHT * momentum
        + PANIC_WEIGHT * panic
        + HEALTH_WEIGHT * health
        + INERTIA_WEIGHT * inertia;

    if index.is_nan() {
        NEUTRAL_SENTIMENT
    } else {
        index.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_calm_market_is_neutral() {
        assert_relative_eq!(next_sentiment(50.0, 0.0, 0.0, 1.0), 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_crash_drives_fear() {
        let index = next_sentiment(50.0, -0.2, 0.8, 0.3);
        // 0.4*(-150) + 0.3*18 + 0.2*15 + 0.1*50.04
        assert_eq!(index, 0.0);
    }

    #[test]
    fn test_pump_drives_greed_within_bounds() {
        let index = next_sentiment(80.0, 0.4, 0.2, 1.0);
        assert_eq!(index, 100.0);

        let mild = next_sentiment(50.0, 0.01, 0.0, 1.0);
        assert_relative_eq!(mild, 54.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nan_input_stays_neutral() {
        assert_eq!(next_sentiment(50.0, f64::NAN, 0.0, 1.0), NEUTRAL_SENTIMENT);
    }
}
