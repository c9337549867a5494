//! Bank panic summary reducer

use crate::assessment::{LiquidityAssessment, assess_liquidity};
use crate::parameters::{BankPanicConfig, BankRunShock};
use crate::simulation::BankPanicSeries;
use jinn_core::SeverityTier;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankPanicSummary {
    /// Headline withdrawal rate of the run, in percent
    pub panic_withdrawal_rate_pct: f64,

    pub max_daily_withdrawals: f64,
    pub total_withdrawals: f64,
    pub min_liquidity_ratio: f64,
    pub total_cb_support: f64,

    pub max_banks_failed: usize,
    pub final_banks_surviving: usize,

    pub total_gdp_impact: f64,
    /// Most negative GDP impact of the run
    pub worst_gdp_impact: f64,

    pub crisis_severity: SeverityTier,
    /// Closed-form check of the end state
    pub final_assessment: LiquidityAssessment,

    /// `peak_<series>` and `trough_<series>` for every reported series
    #[serde(flatten)]
    pub extremes: BTreeMap<String, f64>,
}

impl BankPanicSummary {
    pub fn from_series(config: &BankPanicConfig, shock: &BankRunShock, series: &BankPanicSeries) -> Self {
        let max_failed = series.banks_failed.max().unwrap_or(0.0) as usize;
        let final_failed = series.banks_failed.last().unwrap_or(0.0) as usize;
        let total_cb_support = series.central_bank_support.sum();

        let final_assessment = assess_liquidity(
            config.total_deposits,
            series.liquid_reserves.last().unwrap_or(config.liquid_reserves),
            series.withdrawal_rate.last().unwrap_or(config.base_withdrawal_rate) * 100.0,
            total_cb_support,
        );

        Self {
            panic_withdrawal_rate_pct: shock.withdrawal_rate_pct,

            max_daily_withdrawals: series.daily_withdrawals.max().unwrap_or(0.0),
            total_withdrawals: series.daily_withdrawals.sum(),
            min_liquidity_ratio: series.liquidity_ratio.min().unwrap_or(0.0),
            total_cb_support,

            max_banks_failed: max_failed,
            final_banks_surviving: config.num_banks.saturating_sub(final_failed),

            total_gdp_impact: series.gdp_impact.sum(),
            worst_gdp_impact: series.gdp_impact.min().unwrap_or(0.0),

            crisis_severity: SeverityTier::classify(max_failed as f64, 1.0, 3.0),
            final_assessment,

            extremes: extremes(series),
        }
    }
}

fn extremes(series: &BankPanicSeries) -> BTreeMap<String, f64> {
    let mut out = BTreeMap::new();
    for (name, values) in series.named() {
        if let (Some(max), Some(min)) = (values.max(), values.min()) {
            out.insert(format!("peak_{}", name), max);
            out.insert(format!("trough_{}", name), min);
        }
    }
    out
}
