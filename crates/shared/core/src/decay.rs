//! Deterministic Decay Function
//!
//! Maps a shock's peak magnitude and the elapsed periods since it started to
//! the residual magnitude for one period. Pure: no state, no randomness.
//!
//! ```text
//!   magnitude
//!      │      Plateau            RampPeakDecay
//!      │   ┌─────────┐               /\
//!      │   │         │╲             /  \
//!      │   │         │ ╲__         /    \╲__
//!      └───┴─────────┴──────  ────/──────────────
//!        start   start+duration
//! ```

use serde::{Deserialize, Serialize};

/// Residual floor used by [`DecayCurve::RampPeakDecay`] when none is given
pub const RAMP_RESIDUAL_FLOOR: f64 = 0.1;

/// Shape of the active window of a shock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayCurve {
    /// Full peak for the whole duration
    Plateau,
    /// Linear ramp to the midpoint (`duration / 2`), then linear decay
    RampPeakDecay,
}

/// A decay curve together with its tail parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayProfile {
    pub curve: DecayCurve,
    /// Per-period geometric multiplier after the active window
    pub persistence: f64,
    /// Fraction of the peak the tail starts from
    pub residual_floor: f64,
}

impl DecayProfile {
    /// Plateau whose tail starts one persistence step below the peak
    pub fn plateau(persistence: f64) -> Self {
        Self {
            curve: DecayCurve::Plateau,
            persistence,
            residual_floor: persistence,
        }
    }

    pub fn ramp(persistence: f64, residual_floor: f64) -> Self {
        Self {
            curve: DecayCurve::RampPeakDecay,
            persistence,
            residual_floor,
        }
    }

    /// Residual magnitude at `period`
    pub fn magnitude_at(&self, period: usize, start: usize, duration: usize, peak: f64) -> f64 {
        if period < start {
            return 0.0;
        }

        let relative = period - start;
        if relative < duration {
            return match self.curve {
                DecayCurve::Plateau => peak,
                DecayCurve::RampPeakDecay => ramp_window(relative, duration, peak),
            };
        }

        let persistence = self.persistence.clamp(0.0, 1.0);
        let floor = self.residual_floor.max(0.0);
        let elapsed = (relative - duration) as f64;
        (peak * floor * persistence.powf(elapsed)).max(0.0)
    }
}

/// Residual magnitude using the curve's default tail floor
pub fn decay(
    curve: DecayCurve,
    period: usize,
    start: usize,
    duration: usize,
    peak: f64,
    persistence: f64,
) -> f64 {
    let profile = match curve {
        DecayCurve::Plateau => DecayProfile::plateau(persistence),
        DecayCurve::RampPeakDecay => DecayProfile::ramp(persistence, RAMP_RESIDUAL_FLOOR),
    };
    profile.magnitude_at(period, start, duration, peak)
}

fn ramp_window(relative: usize, duration: usize, peak: f64) -> f64 {
    let peak_period = duration / 2;
    // A one-period window has no ramp to climb
    if peak_period == 0 {
        return peak.max(0.0);
    }

    let intensity = if relative <= peak_period {
        peak * (relative as f64 / peak_period as f64)
    } else {
        peak * ((duration - relative) as f64 / (duration - peak_period) as f64)
    };
    intensity.max(0.0)
}
