//! Exchange Pool
//!
//! The population of exchanges under one market-wide withdrawal pressure.
//! Each exchange carries an exposure that scales its share of that pressure,
//! so heavily exposed venues freeze first and the frozen share feeds back
//! into the pressure on the ones still open. Aggregates are recomputed from
//! every exchange each period rather than maintained as running counters.

use crate::domain::{ExchangeState, ExchangeThresholds, Transition};
use jinn_core::{PeriodIndex, SimRng};
use log::{debug, info};
use rand::Rng;

/// Population-wide view after a period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolSnapshot {
    pub mean_liquidity: f64,
    pub frozen_count: usize,
    /// Frozen share of the population, in [0, 1]
    pub frozen_fraction: f64,
    pub froze: usize,
    pub reopened: usize,
}

#[derive(Debug, Clone)]
pub struct ExchangePool {
    exchanges: Vec<ExchangeState>,
    /// Per-exchange multiplier on the market-wide pressure
    exposure: Vec<f64>,
    thresholds: ExchangeThresholds,
}

impl ExchangePool {
    /// `count` fully liquid exchanges with unit exposure
    pub fn new(count: usize, thresholds: ExchangeThresholds) -> Self {
        Self::from_states(vec![ExchangeState::new(); count], thresholds)
    }

    pub fn from_states(exchanges: Vec<ExchangeState>, thresholds: ExchangeThresholds) -> Self {
        let exposure = vec![1.0; exchanges.len()];
        Self {
            exchanges,
            exposure,
            thresholds,
        }
    }

    /// Draw each exposure uniformly from `[1 - spread, 1 + spread]`
    ///
    /// `spread` is clamped to [0, 1]. A zero spread keeps unit exposure and
    /// draws nothing from `rng`.
    pub fn with_exposure_spread(mut self, spread: f64, rng: &mut SimRng) -> Self {
        let spread = if spread.is_nan() { 0.0 } else { spread.clamp(0.0, 1.0) };
        if spread > 0.0 {
            for exposure in self.exposure.iter_mut() {
                *exposure = rng.gen_range(1.0 - spread..=1.0 + spread);
            }
            debug!(
                "Exchange exposures drawn with spread {:.2} across {} exchanges",
                spread,
                self.exposure.len()
            );
        }
        self
    }

    pub fn with_exposures(mut self, exposure: Vec<f64>) -> Self {
        self.exposure = self
            .exchanges
            .iter()
            .enumerate()
            .map(|(i, _)| exposure.get(i).copied().unwrap_or(1.0).max(0.0))
            .collect();
        self
    }

    pub fn exposure(&self) -> &[f64] {
        &self.exposure
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn exchanges(&self) -> &[ExchangeState] {
        &self.exchanges
    }

    /// Apply one period of market-wide pressure, scaled per exchange
    pub fn step(&mut self, pressure: f64, period: PeriodIndex) -> PoolSnapshot {
        let mut froze = 0;
        let mut reopened = 0;

        for (i, (exchange, exposure)) in self.exchanges.iter_mut().zip(&self.exposure).enumerate() {
            match exchange.step(pressure * exposure, &self.thresholds) {
                Transition::Froze => {
                    froze += 1;
                    info!(
                        "Exchange {} frozen at period {} (reserve {:.3})",
                        i + 1,
                        period,
                        exchange.reserve()
                    );
                }
                Transition::Reopened => {
                    reopened += 1;
                    info!("Exchange {} resumed operations at period {}", i + 1, period);
                }
                Transition::Unchanged => {}
            }
        }

        PoolSnapshot {
            froze,
            reopened,
            ..self.snapshot()
        }
    }

    /// Aggregates over the current population
    ///
    /// An empty pool reports full liquidity and nothing frozen.
    pub fn snapshot(&self) -> PoolSnapshot {
        let count = self.exchanges.len();
        let frozen_count = self.exchanges.iter().filter(|e| e.is_frozen()).count();

        let (mean_liquidity, frozen_fraction) = if count == 0 {
            (1.0, 0.0)
        } else {
            let total: f64 = self.exchanges.iter().map(|e| e.reserve()).sum();
            (total / count as f64, frozen_count as f64 / count as f64)
        };

        PoolSnapshot {
            mean_liquidity,
            frozen_count,
            frozen_fraction,
            froze: 0,
            reopened: 0,
        }
    }
}
