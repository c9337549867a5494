//! Whale Cohort
//!
//! Large holders who coordinate during heavy panic. While active they redraw
//! a directional manipulation intent each period; once panic subsides the
//! intent decays geometrically toward zero.

use super::{Cohort, clamp_intensity};
use jinn_core::SimRng;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct WhaleConfig {
    /// Number of whales (informational)
    pub population: u64,
    /// Intensity above which whales coordinate
    pub activation_threshold: f64,
    /// Coordination gained per unit of intensity
    pub coordination_rate: f64,
    /// Coordination lost per quiet period
    pub coordination_decay: f64,
    /// Per-period multiplier on intent while quiet
    pub intent_persistence: f64,
}

impl Default for WhaleConfig {
    fn default() -> Self {
        Self {
            population: 100,
            activation_threshold: 0.3,
            coordination_rate: 0.2,
            coordination_decay: 0.2,
            intent_persistence: 0.8,
        }
    }
}

impl WhaleConfig {
    pub fn with_coordination_rate(mut self, rate: f64) -> Self {
        self.coordination_rate = rate;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhaleOutput {
    /// Directional push in [-1, 1]; negative is selling
    pub manipulation_intent: f64,
    pub coordination_level: f64,
}

impl WhaleOutput {
    /// Magnitude of whale trading regardless of direction
    pub fn activity(&self) -> f64 {
        self.manipulation_intent.abs()
    }
}

#[derive(Debug, Clone)]
pub struct WhaleCohort {
    config: WhaleConfig,
    coordination_level: f64,
    manipulation_intent: f64,
}

impl WhaleCohort {
    pub fn new(config: WhaleConfig) -> Self {
        Self {
            config,
            coordination_level: 0.0,
            manipulation_intent: 0.0,
        }
    }

    pub fn coordination_level(&self) -> f64 {
        self.coordination_level
    }

    pub fn manipulation_intent(&self) -> f64 {
        self.manipulation_intent
    }
}

impl Cohort for WhaleCohort {
    type Output = WhaleOutput;

    fn update(&mut self, intensity: f64, rng: &mut SimRng) -> WhaleOutput {
        let intensity = clamp_intensity(intensity);

        if intensity > self.config.activation_threshold {
            self.coordination_level =
                (self.coordination_level + self.config.coordination_rate * intensity).min(1.0);
            self.manipulation_intent = rng.gen_range(-1.0f64..1.0) * self.coordination_level;
        } else {
            self.coordination_level =
                (self.coordination_level - self.config.coordination_decay).max(0.0);
            self.manipulation_intent *= self.config.intent_persistence;
        }

        WhaleOutput {
            manipulation_intent: self.manipulation_intent,
            coordination_level: self.coordination_level,
        }
    }

    fn is_at_rest(&self) -> bool {
        self.coordination_level == 0.0 && self.manipulation_intent == 0.0
    }

    fn cohort_type(&self) -> &'static str {
        "whale"
    }
}
