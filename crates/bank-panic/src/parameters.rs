//! Bank Panic Parameters
//!
//! Built-in defaults and the typed configuration the simulation runs on.

use jinn_core::{DecayProfile, ParamMap, ParamResult, ScenarioConfig, ShockDescriptor, ShockKind};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Built-in parameter defaults
pub fn default_parameters() -> ParamMap {
    let defaults = json!({
        "total_deposits": 100e9,
        "liquid_reserves": 15e9,
        "loan_portfolio": 80e9,

        "base_withdrawal_rate": 0.02,
        "panic_multiplier": 7.5,
        "recovery_rate": 0.8,

        "cb_intervention_threshold": 0.2,
        "cb_max_support": 50e9,
        "cb_response_delay": 1,

        "credit_contraction_rate": 0.05,
        "gdp_impact_multiplier": 0.02,

        "periods": 30,
        "num_banks": 10,
        "random_seed": 42,
    });

    match defaults {
        serde_json::Value::Object(map) => map,
        _ => ParamMap::new(),
    }
}

/// Central bank lending policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralBankPolicy {
    /// Intervene when reserves fall below this fraction of deposits
    pub intervention_threshold: f64,
    /// Cap on a single period's support
    pub max_support: f64,
    /// First period the central bank can act in
    pub response_delay: usize,
    /// Days of withdrawals one intervention covers
    pub coverage_days: f64,
}

impl Default for CentralBankPolicy {
    fn default() -> Self {
        Self {
            intervention_threshold: 0.2,
            max_support: 50e9,
            response_delay: 1,
            coverage_days: 7.0,
        }
    }
}

/// Typed configuration for one bank panic model instance
#[derive(Debug, Clone, PartialEq)]
pub struct BankPanicConfig {
    pub periods: usize,
    pub num_banks: usize,

    pub total_deposits: f64,
    pub liquid_reserves: f64,
    pub loan_portfolio: f64,

    /// Daily fraction of deposits withdrawn in calm conditions
    pub base_withdrawal_rate: f64,
    /// Withdrawal rate multiplier at full panic
    pub panic_multiplier: f64,
    /// Per-period panic persistence after the run ends
    pub recovery_rate: f64,

    pub central_bank: CentralBankPolicy,

    pub credit_contraction_rate: f64,
    pub gdp_impact_multiplier: f64,
}

impl BankPanicConfig {
    /// Config built from the built-in defaults alone
    pub fn builtin() -> ParamResult<Self> {
        Self::from_params(&ScenarioConfig::resolve(
            &default_parameters(),
            &ParamMap::new(),
        ))
    }

    pub fn from_params(params: &ScenarioConfig) -> ParamResult<Self> {
        let central_bank = CentralBankPolicy {
            intervention_threshold: params.f64("cb_intervention_threshold")?,
            max_support: params.f64("cb_max_support")?,
            response_delay: params.u64("cb_response_delay")? as usize,
            ..Default::default()
        };

        Ok(Self {
            periods: params.u64("periods")? as usize,
            num_banks: params.u64("num_banks")? as usize,
            total_deposits: params.f64("total_deposits")?,
            liquid_reserves: params.f64("liquid_reserves")?,
            loan_portfolio: params.f64("loan_portfolio")?,
            base_withdrawal_rate: params.f64("base_withdrawal_rate")?,
            panic_multiplier: params.f64("panic_multiplier")?,
            recovery_rate: params.f64("recovery_rate")?,
            central_bank,
            credit_contraction_rate: params.f64("credit_contraction_rate")?,
            gdp_impact_multiplier: params.f64("gdp_impact_multiplier")?,
        })
    }

    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    pub fn with_central_bank(mut self, policy: CentralBankPolicy) -> Self {
        self.central_bank = policy;
        self
    }

    /// Daily withdrawal rate at a given panic intensity
    pub fn withdrawal_rate(&self, intensity: f64) -> f64 {
        if intensity > 0.0 {
            self.base_withdrawal_rate * (1.0 + intensity * self.panic_multiplier)
        } else {
            self.base_withdrawal_rate
        }
    }

    /// Domain checks that must hold before a run starts
    pub fn validate(&self) -> Result<(), String> {
        if !(self.total_deposits.is_finite() && self.total_deposits > 0.0) {
            return Err(format!(
                "total_deposits must be positive, got {}",
                self.total_deposits
            ));
        }

        for (name, value) in [
            ("liquid_reserves", self.liquid_reserves),
            ("loan_portfolio", self.loan_portfolio),
            ("base_withdrawal_rate", self.base_withdrawal_rate),
            ("cb_max_support", self.central_bank.max_support),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{} must be non-negative, got {}", name, value));
            }
        }

        Ok(())
    }
}

/// Bank run read from the `panic` simulation section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRunShock {
    pub descriptor: ShockDescriptor,
    /// Headline daily withdrawal rate in percent, as announced
    pub withdrawal_rate_pct: f64,
}

impl BankRunShock {
    pub fn new(duration: usize, start_period: usize, contagion_factor: f64) -> Self {
        Self {
            descriptor: ShockDescriptor::new(
                ShockKind::BankRun,
                1.0,
                duration,
                start_period,
                contagion_factor,
            ),
            withdrawal_rate_pct: 15.0,
        }
    }

    pub fn with_withdrawal_rate_pct(mut self, rate: f64) -> Self {
        self.withdrawal_rate_pct = rate;
        self
    }
}

pub fn panic_shock(simulation: &ScenarioConfig) -> ParamResult<BankRunShock> {
    let panic = simulation.section("panic")?;

    Ok(BankRunShock::new(
        panic.u64_or("panic_duration", 7)? as usize,
        panic.u64_or("start_period", 0)? as usize,
        panic.f64_or("contagion_factor", 0.1)?,
    )
    .with_withdrawal_rate_pct(panic.f64_or("withdrawal_rate", 15.0)?))
}

/// Full panic for the whole run, then fading at the recovery rate
pub fn panic_decay(recovery_rate: f64) -> DecayProfile {
    DecayProfile::plateau(recovery_rate)
}
