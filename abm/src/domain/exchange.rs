//! Exchange State Machine
//!
//! Each exchange holds a normalized liquidity reserve in [0, 1] and is either
//! operational or frozen. Freezing and reopening use separate thresholds so
//! an exchange cannot flap between states in a single period.
//!
//! ```text
//!                 period low < freeze_below
//!   Operational ─────────────────────────────▶ Frozen
//!        ▲                                       │
//!        └──────── reserve > reopen_above ───────┘
//!                (not in the period it froze)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeStatus {
    Operational,
    Frozen,
}

/// Outcome of one period for one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Froze,
    Reopened,
}

/// Reserve dynamics and freeze hysteresis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeThresholds {
    /// Freeze when the reserve drops below this
    pub freeze_below: f64,
    /// Reopen when the reserve climbs above this
    pub reopen_above: f64,
    /// Reserve lost per unit of withdrawal pressure while operational
    pub depletion_rate: f64,
    /// Reserve regained per calm period
    pub recovery_rate: f64,
    /// Pressure below which the reserve recovers
    pub calm_pressure: f64,
}

impl Default for ExchangeThresholds {
    fn default() -> Self {
        Self {
            freeze_below: 0.4,
            reopen_above: 0.8,
            depletion_rate: 0.1,
            recovery_rate: 0.1,
            calm_pressure: 0.1,
        }
    }
}

impl ExchangeThresholds {
    /// Check the hysteresis gap
    pub fn validate(&self) -> Result<(), String> {
        if self.freeze_below < self.reopen_above {
            Ok(())
        } else {
            Err(format!(
                "exchange freeze threshold {} must be below recovery threshold {}",
                self.freeze_below, self.reopen_above
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeState {
    reserve: f64,
    status: ExchangeStatus,
}

impl Default for ExchangeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeState {
    /// Fully liquid, operational exchange
    pub fn new() -> Self {
        Self::with_reserve(1.0)
    }

    pub fn with_reserve(reserve: f64) -> Self {
        Self {
            reserve: clamp_unit(reserve),
            status: ExchangeStatus::Operational,
        }
    }

    pub fn reserve(&self) -> f64 {
        self.reserve
    }

    pub fn status(&self) -> ExchangeStatus {
        self.status
    }

    pub fn is_frozen(&self) -> bool {
        self.status == ExchangeStatus::Frozen
    }

    /// Apply one period of withdrawal pressure
    ///
    /// Negative or non-finite pressure drains nothing. The freeze check uses
    /// the lowest reserve seen during the period, so an exchange that opens
    /// the period below the freeze threshold freezes even if it recovers.
    pub fn step(&mut self, pressure: f64, thresholds: &ExchangeThresholds) -> Transition {
        let pressure = if pressure.is_finite() { pressure } else { 0.0 };
        let mut low = self.reserve;

        if self.status == ExchangeStatus::Operational {
            let outflow = pressure.max(0.0) * thresholds.depletion_rate;
            self.reserve = clamp_unit(self.reserve - outflow);
            low = low.min(self.reserve);
        }

        if pressure < thresholds.calm_pressure {
            self.reserve = clamp_unit(self.reserve + thresholds.recovery_rate);
        }

        match self.status {
            ExchangeStatus::Operational if low < thresholds.freeze_below => {
                self.status = ExchangeStatus::Frozen;
                Transition::Froze
            }
            ExchangeStatus::Frozen if self.reserve > thresholds.reopen_above => {
                self.status = ExchangeStatus::Operational;
                Transition::Reopened
            }
            _ => Transition::Unchanged,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
