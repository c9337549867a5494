//! Retail Cohort
//!
//! Small holders who panic together. Panic builds in proportion to the
//! intensity while it exceeds a threshold and fades by a fixed step otherwise,
//! so it builds faster than it dissipates. Herding makes selling convex in
//! panic.

use super::{Cohort, clamp_intensity};
use jinn_core::SimRng;

/// Configuration for the retail cohort
#[derive(Debug, Clone)]
pub struct RetailConfig {
    /// Number of retail holders (informational)
    pub population: u64,
    /// Intensity above which panic builds
    pub panic_threshold: f64,
    /// Panic added per unit of intensity
    pub panic_build_rate: f64,
    /// Panic removed per calm period
    pub calm_rate: f64,
    /// Fraction of panicking holders who sell
    pub sell_probability: f64,
    /// Herd amplification of selling
    pub herd_multiplier: f64,
}

impl Default for RetailConfig {
    fn default() -> Self {
        Self {
            population: 1_000_000,
            panic_threshold: 0.05,
            panic_build_rate: 0.5,
            calm_rate: 0.1,
            sell_probability: 0.3,
            herd_multiplier: 2.0,
        }
    }
}

impl RetailConfig {
    pub fn with_panic_threshold(mut self, threshold: f64) -> Self {
        self.panic_threshold = threshold;
        self
    }

    pub fn with_sell_probability(mut self, probability: f64) -> Self {
        self.sell_probability = probability;
        self
    }

    pub fn with_herd_multiplier(mut self, multiplier: f64) -> Self {
        self.herd_multiplier = multiplier;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetailOutput {
    /// Share of holders selling this period, in [0, 1]
    pub sell_pressure: f64,
    pub panic_state: f64,
}

#[derive(Debug, Clone)]
pub struct RetailCohort {
    config: RetailConfig,
    panic_state: f64,
}

impl RetailCohort {
    pub fn new(config: RetailConfig) -> Self {
        Self {
            config,
            panic_state: 0.0,
        }
    }

    pub fn panic_state(&self) -> f64 {
        self.panic_state
    }

    fn sell_pressure(&self) -> f64 {
        let panic = self.panic_state;
        let sell = panic * self.config.sell_probability * (1.0 + self.config.herd_multiplier * panic);
        clamp_intensity(sell)
    }
}

impl Cohort for RetailCohort {
    type Output = RetailOutput;

    fn update(&mut self, intensity: f64, _rng: &mut SimRng) -> RetailOutput {
        let intensity = clamp_intensity(intensity);

        self.panic_state = if intensity > self.config.panic_threshold {
            (self.panic_state + intensity * self.config.panic_build_rate).min(1.0)
        } else {
            (self.panic_state - self.config.calm_rate).max(0.0)
        };

        RetailOutput {
            sell_pressure: self.sell_pressure(),
            panic_state: self.panic_state,
        }
    }

    fn is_at_rest(&self) -> bool {
        self.panic_state == 0.0
    }

    fn cohort_type(&self) -> &'static str {
        "retail"
    }
}
