//! Shock / Scenario Descriptor
//!
//! A read-only record of the perturbation a run applies. Built once from the
//! simulation section of a scenario and never mutated afterwards.

use crate::decay::DecayProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What triggered the shock
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShockKind {
    WhaleDump,
    DogePump,
    ExchangeHalt,
    Regulatory,
    BankRun,
    /// Any trigger name the models don't interpret specially
    Custom(String),
}

impl ShockKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::WhaleDump => "whale_dump",
            Self::DogePump => "doge_pump",
            Self::ExchangeHalt => "exchange_halt",
            Self::Regulatory => "regulatory",
            Self::BankRun => "bank_run",
            Self::Custom(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "whale_dump" => Self::WhaleDump,
            "doge_pump" => Self::DogePump,
            "exchange_halt" => Self::ExchangeHalt,
            "regulatory" => Self::Regulatory,
            "bank_run" => Self::BankRun,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for ShockKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<ShockKind> for String {
    fn from(kind: ShockKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ShockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Perturbation applied over a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockDescriptor {
    pub kind: ShockKind,
    /// Normalized intensity in [0, 1], or an unbounded magnitude
    pub intensity: f64,
    /// Number of periods in the active window
    pub duration: usize,
    /// First period of the active window
    pub start_period: usize,
    /// Fraction of a local failure that propagates elsewhere, in [0, 1]
    pub contagion_factor: f64,
}

impl ShockDescriptor {
    pub fn new(
        kind: ShockKind,
        intensity: f64,
        duration: usize,
        start_period: usize,
        contagion_factor: f64,
    ) -> Self {
        Self {
            kind,
            intensity,
            duration,
            start_period,
            contagion_factor: contagion_factor.clamp(0.0, 1.0),
        }
    }

    /// Residual intensity at `period` under `profile`
    pub fn intensity_at(&self, period: usize, profile: &DecayProfile) -> f64 {
        profile.magnitude_at(period, self.start_period, self.duration, self.intensity)
    }

    /// Whether `period` falls inside the active window
    pub fn is_active(&self, period: usize) -> bool {
        period >= self.start_period && period < self.start_period + self.duration
    }

    /// First period after the active window
    pub fn end_period(&self) -> usize {
        self.start_period + self.duration
    }
}
