//! Influencer Pool
//!
//! Social-media accounts moving the meme asset. Two independent effects fire
//! with a fixed probability each period: a celebrity post (either direction)
//! and a coordinated pump (always up). The impulse is added straight onto the
//! meme asset's return.
//!
//! Influencers only post while a panic is live. Below [`QUIET_INTENSITY`]
//! the pool stays silent and draws no random numbers, which covers both the
//! calm before the shock (intensity exactly 0) and the far end of the decay
//! tail (intensity small but never 0).

use super::{Cohort, clamp_intensity};
use jinn_core::SimRng;
use rand::Rng;

/// Intensity below which influencers stay silent
pub const QUIET_INTENSITY: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct InfluencerConfig {
    /// Number of accounts (informational)
    pub population: u64,
    pub celebrity_probability: f64,
    /// Celebrity impulse bounds as return fractions
    pub celebrity_range: (f64, f64),
    pub pump_probability: f64,
    pub pump_range: (f64, f64),
}

impl Default for InfluencerConfig {
    fn default() -> Self {
        Self {
            population: 50,
            celebrity_probability: 0.3,
            celebrity_range: (-0.15, 0.30),
            pump_probability: 0.1,
            pump_range: (0.10, 0.50),
        }
    }
}

impl InfluencerConfig {
    pub fn with_celebrity_probability(mut self, probability: f64) -> Self {
        self.celebrity_probability = probability;
        self
    }

    pub fn with_pump_probability(mut self, probability: f64) -> Self {
        self.pump_probability = probability;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InfluencerOutput {
    pub celebrity_impulse: f64,
    pub pump_impulse: f64,
}

impl InfluencerOutput {
    /// Total additive return on the meme asset
    pub fn impulse(&self) -> f64 {
        self.celebrity_impulse + self.pump_impulse
    }
}

#[derive(Debug, Clone)]
pub struct InfluencerPool {
    config: InfluencerConfig,
    last: InfluencerOutput,
}

impl InfluencerPool {
    pub fn new(config: InfluencerConfig) -> Self {
        Self {
            config,
            last: InfluencerOutput::default(),
        }
    }

    pub fn last_impulse(&self) -> f64 {
        self.last.impulse()
    }
}

impl Cohort for InfluencerPool {
    type Output = InfluencerOutput;

    fn update(&mut self, intensity: f64, rng: &mut SimRng) -> InfluencerOutput {
        if clamp_intensity(intensity) < QUIET_INTENSITY {
            self.last = InfluencerOutput::default();
            return self.last;
        }

        self.last = InfluencerOutput {
            celebrity_impulse: maybe_impulse(
                rng,
                self.config.celebrity_probability,
                self.config.celebrity_range,
            ),
            pump_impulse: maybe_impulse(rng, self.config.pump_probability, self.config.pump_range),
        };
        self.last
    }

    fn is_at_rest(&self) -> bool {
        self.last == InfluencerOutput::default()
    }

    fn cohort_type(&self) -> &'static str {
        "influencer"
    }
}

/// Draw an impulse in `range` with probability `probability`
fn maybe_impulse(rng: &mut SimRng, probability: f64, range: (f64, f64)) -> f64 {
    if rng.r#gen::<f64>() >= probability {
        return 0.0;
    }

    let (low, high) = range;
    if low < high {
        rng.gen_range(low..high)
    } else {
        low
    }
}
