//! Summary statistics over completed series
//!
//! Every function here is pure; reducing the same series twice yields the
//! same value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical severity of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    /// Tier for `value` against ascending thresholds (strictly greater wins)
    pub fn classify(value: f64, medium_above: f64, high_above: f64) -> Self {
        if value > high_above {
            Self::High
        } else if value > medium_above {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Largest peak-to-trough fall as a fraction of the running peak
///
/// Returns 0.0 for empty or monotonically rising series. Non-positive peaks
/// are skipped.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;

    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            worst = worst.max((peak - value) / peak);
        }
    }

    worst
}

/// Percentage change from the first to the last value
pub fn total_return_pct(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if first != 0.0 => (last - first) / first * 100.0,
        _ => 0.0,
    }
}

/// Percentage rise of the series maximum above the first value
pub fn max_gain_pct(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    if first == 0.0 {
        return 0.0;
    }
    let max = values.iter().copied().fold(first, f64::max);
    (max - first) / first * 100.0
}

/// Index of the series minimum (first occurrence)
pub fn argmin(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b <= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// First period after the trough at which the series regains `fraction` of
/// its opening value
///
/// Returns `Some(0)` when the series never fell below that level and `None`
/// when it never recovered.
pub fn recovery_period(values: &[f64], fraction: f64) -> Option<usize> {
    let first = *values.first()?;
    let level = first * fraction;
    let trough = argmin(values)?;

    if values[trough] >= level {
        return Some(0);
    }

    values
        .iter()
        .enumerate()
        .skip(trough + 1)
        .find(|(_, v)| **v >= level)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_drawdown_uses_running_peak() {
        // Peak 120 after the start; trough 60 -> 50%
        let values = [100.0, 120.0, 90.0, 60.0, 110.0];
        assert_relative_eq!(max_drawdown(&values), 0.5);
    }

    #[test]
    fn test_drawdown_zero_when_rising() {
        assert_eq!(max_drawdown(&[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn test_returns() {
        assert_relative_eq!(total_return_pct(&[100.0, 80.0, 90.0]), -10.0);
        assert_relative_eq!(max_gain_pct(&[100.0, 150.0, 90.0]), 50.0);
        assert_eq!(total_return_pct(&[]), 0.0);
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(SeverityTier::classify(0.0, 1.0, 3.0), SeverityTier::Low);
        assert_eq!(SeverityTier::classify(1.0, 1.0, 3.0), SeverityTier::Low);
        assert_eq!(SeverityTier::classify(2.0, 1.0, 3.0), SeverityTier::Medium);
        assert_eq!(SeverityTier::classify(4.0, 1.0, 3.0), SeverityTier::High);
    }

    #[test]
    fn test_recovery_period() {
        assert_eq!(recovery_period(&[100.0, 99.0, 101.0], 0.95), Some(0));
        assert_eq!(recovery_period(&[100.0, 80.0, 90.0, 96.0], 0.95), Some(3));
        assert_eq!(recovery_period(&[100.0, 80.0, 85.0], 0.95), None);
    }

    #[test]
    fn test_argmin_first_occurrence() {
        assert_eq!(argmin(&[3.0, 1.0, 1.0]), Some(1));
        assert_eq!(argmin(&[]), None);
    }
}
