//! Bank Run Simulation
//!
//! Each period runs, in order:
//!
//! ```text
//!   panic intensity → balance sheet → central bank → failures → credit / GDP
//! ```
//!
//! Central bank support granted in period `t` is credited to reserves in
//! period `t + 1`.

use crate::banking::{BankPool, CentralBank};
use crate::parameters::{BankPanicConfig, BankRunShock, panic_decay};
use jinn_core::{DecayProfile, SimRng, TimeSeries};
use log::{debug, info};

/// Liquidity ratio (percent) below which credit starts contracting
const CREDIT_STRESS_RATIO_PCT: f64 = 20.0;
/// Share of credit lost per unit of bank failure rate
const FAILURE_CREDIT_LOSS: f64 = 0.5;
/// GDP impact is quoted per trillion of lost credit
const GDP_SCALE: f64 = 1e12;

/// Per-period series of one run
#[derive(Debug, Clone, PartialEq)]
pub struct BankPanicSeries {
    /// Daily fraction of deposits withdrawn
    pub withdrawal_rate: TimeSeries,
    pub daily_withdrawals: TimeSeries,
    pub remaining_deposits: TimeSeries,
    pub liquid_reserves: TimeSeries,
    /// Reserves as a percentage of deposits
    pub liquidity_ratio: TimeSeries,
    pub central_bank_support: TimeSeries,
    /// Cumulative failed banks
    pub banks_failed: TimeSeries,
    pub credit_available: TimeSeries,
    pub gdp_impact: TimeSeries,
    pub panic_intensity: TimeSeries,
}

impl BankPanicSeries {
    fn new(periods: usize) -> Self {
        Self {
            withdrawal_rate: TimeSeries::new(periods),
            daily_withdrawals: TimeSeries::new(periods),
            remaining_deposits: TimeSeries::new(periods),
            liquid_reserves: TimeSeries::new(periods),
            liquidity_ratio: TimeSeries::new(periods),
            central_bank_support: TimeSeries::new(periods),
            banks_failed: TimeSeries::new(periods),
            credit_available: TimeSeries::new(periods),
            gdp_impact: TimeSeries::new(periods),
            panic_intensity: TimeSeries::new(periods),
        }
    }

    pub fn periods(&self) -> usize {
        self.panic_intensity.len()
    }

    /// Every series under its wire name, in output order
    pub fn named(&self) -> Vec<(&'static str, &TimeSeries)> {
        vec![
            ("withdrawal_rate", &self.withdrawal_rate),
            ("daily_withdrawals", &self.daily_withdrawals),
            ("remaining_deposits", &self.remaining_deposits),
            ("liquid_reserves", &self.liquid_reserves),
            ("liquidity_ratio", &self.liquidity_ratio),
            ("central_bank_support", &self.central_bank_support),
            ("banks_failed", &self.banks_failed),
            ("credit_available", &self.credit_available),
            ("gdp_impact", &self.gdp_impact),
            ("panic_intensity", &self.panic_intensity),
        ]
    }
}

/// Runs one bank run over a config
pub struct BankRunSimulation<'a> {
    config: &'a BankPanicConfig,
    shock: BankRunShock,
    decay: DecayProfile,
}

impl<'a> BankRunSimulation<'a> {
    pub fn new(config: &'a BankPanicConfig, shock: BankRunShock) -> Self {
        Self {
            config,
            shock,
            decay: panic_decay(config.recovery_rate),
        }
    }

    pub fn with_decay(mut self, decay: DecayProfile) -> Self {
        self.decay = decay;
        self
    }

    pub fn shock(&self) -> &BankRunShock {
        &self.shock
    }

    pub fn run(&self, rng: &mut SimRng) -> BankPanicSeries {
        let config = self.config;
        let shock = &self.shock.descriptor;
        let mut series = BankPanicSeries::new(config.periods);
        let mut banks = BankPool::new(config.num_banks);
        let central_bank = CentralBank::new(config.central_bank);

        info!(
            "Simulating bank panic: {:.1}% withdrawal rate for {} periods starting at period {}",
            self.shock.withdrawal_rate_pct, shock.duration, shock.start_period
        );

        for t in 0..config.periods {
            let intensity = shock.intensity_at(t, &self.decay);
            let rate = config.withdrawal_rate(intensity);

            // Balance sheet
            let (withdrawals, deposits, reserves) = match series.remaining_deposits.previous(t) {
                None => (0.0, config.total_deposits, config.liquid_reserves),
                Some(previous_deposits) => {
                    let withdrawals = previous_deposits * rate;
                    let previous_reserves = series.liquid_reserves.get(t - 1);
                    let support = series.central_bank_support.get(t - 1);
                    (
                        withdrawals,
                        (previous_deposits - withdrawals).max(0.0),
                        (previous_reserves + support - withdrawals).max(0.0),
                    )
                }
            };
            let ratio = if deposits > 0.0 {
                reserves / deposits * 100.0
            } else {
                0.0
            };

            let support = central_bank.respond(t, ratio, withdrawals);
            banks.apply_liquidity_stress(ratio, shock.contagion_factor, t, rng);
            let failed = banks.failed_count();

            // Credit and output
            let credit = match series.credit_available.previous(t) {
                None => config.loan_portfolio,
                Some(previous_credit) => {
                    let failure_rate = if banks.is_empty() {
                        0.0
                    } else {
                        failed as f64 / banks.len() as f64
                    };
                    let stress = ((CREDIT_STRESS_RATIO_PCT - ratio) / CREDIT_STRESS_RATIO_PCT).max(0.0);
                    let reduction = previous_credit
                        * (failure_rate * FAILURE_CREDIT_LOSS + stress * config.credit_contraction_rate);
                    (previous_credit - reduction).max(0.0)
                }
            };
            let gdp = -(config.loan_portfolio - credit) / GDP_SCALE * config.gdp_impact_multiplier;

            series.withdrawal_rate.set(t, rate);
            series.daily_withdrawals.set(t, withdrawals);
            series.remaining_deposits.set(t, deposits);
            series.liquid_reserves.set(t, reserves);
            series.liquidity_ratio.set(t, ratio);
            series.central_bank_support.set(t, support);
            series.banks_failed.set(t, failed as f64);
            series.credit_available.set(t, credit);
            series.gdp_impact.set(t, gdp);
            series.panic_intensity.set(t, intensity);

            debug!(
                "Period {:2}: deposits ${:.1}B | reserves ${:.1}B | ratio {:5.2}% | failed {} | panic {:.3}",
                t,
                deposits / 1e9,
                reserves / 1e9,
                ratio,
                failed,
                intensity
            );
        }

        info!(
            "Bank panic finished: {} periods, {} of {} banks failed",
            config.periods,
            banks.failed_count(),
            banks.len()
        );

        series
    }
}
