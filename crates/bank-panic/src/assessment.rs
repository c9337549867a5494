//! Closed-form liquidity assessment
//!
//! How long one bank lasts against a constant daily withdrawal rate, without
//! running the simulation.

use serde::{Deserialize, Serialize};

/// Survival days reported when nothing is being withdrawn
pub const UNLIMITED_SURVIVAL_DAYS: u64 = 999;
/// A bank must outlast a typical panic to survive it
pub const SURVIVAL_HORIZON_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityAssessment {
    pub daily_withdrawals: f64,
    /// Liquidity left after one day of withdrawals
    pub remaining_liquidity: f64,
    pub survival_days: u64,
    pub bank_survives: bool,
    /// Remaining liquidity as a percentage of deposits
    pub liquidity_ratio: f64,
}

/// Assess a bank facing `withdrawal_rate_pct` percent of deposits per day
pub fn assess_liquidity(
    total_deposits: f64,
    liquid_reserves: f64,
    withdrawal_rate_pct: f64,
    central_bank_support: f64,
) -> LiquidityAssessment {
    let daily_withdrawals = total_deposits * (withdrawal_rate_pct / 100.0);
    let total_liquidity = liquid_reserves + central_bank_support;

    let survival_days = if daily_withdrawals > 0.0 {
        // Negative liquidity saturates to zero days
        (total_liquidity / daily_withdrawals).floor() as u64
    } else {
        UNLIMITED_SURVIVAL_DAYS
    };

    let remaining_liquidity = (total_liquidity - daily_withdrawals).max(0.0);
    let liquidity_ratio = if total_deposits > 0.0 {
        remaining_liquidity / total_deposits * 100.0
    } else {
        0.0
    };

    LiquidityAssessment {
        daily_withdrawals,
        remaining_liquidity,
        survival_days,
        bank_survives: survival_days >= SURVIVAL_HORIZON_DAYS,
        liquidity_ratio,
    }
}
