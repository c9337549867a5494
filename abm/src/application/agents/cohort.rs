//! Cohort Trait
//!
//! Core trait that all agent cohorts implement.

use jinn_core::SimRng;

/// A population of agents reacting to one panic intensity per period
pub trait Cohort {
    /// What the cohort contributes to the rest of the period
    type Output;

    /// Advance one period
    ///
    /// Must not fail on any input: out-of-range intensities are clamped.
    fn update(&mut self, intensity: f64, rng: &mut SimRng) -> Self::Output;

    /// Whether the cohort is at its initial state
    fn is_at_rest(&self) -> bool;

    fn cohort_type(&self) -> &'static str;
}

/// Clamp an intensity into [0, 1], mapping NaN to 0
pub fn clamp_intensity(intensity: f64) -> f64 {
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_intensity() {
        assert_eq!(clamp_intensity(-0.2), 0.0);
        assert_eq!(clamp_intensity(0.4), 0.4);
        assert_eq!(clamp_intensity(7.0), 1.0);
        assert_eq!(clamp_intensity(f64::NAN), 0.0);
    }
}
