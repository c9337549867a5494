//! Banking System
//!
//! The failure-prone pool of banks and the lender of last resort.

use crate::parameters::CentralBankPolicy;
use jinn_core::SimRng;
use log::{info, warn};
use rand::seq::index;

/// Liquidity ratio (percent) below which banks start failing
pub const FAILURE_RATIO_PCT: f64 = 5.0;

/// Fixed set of banks, each alive or failed
///
/// A failed bank never comes back within a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BankPool {
    alive: Vec<bool>,
}

impl BankPool {
    pub fn new(count: usize) -> Self {
        Self {
            alive: vec![true; count],
        }
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.alive_count()
    }

    pub fn is_alive(&self, bank: usize) -> bool {
        self.alive.get(bank).copied().unwrap_or(false)
    }

    /// Fail banks for a system-wide liquidity ratio, returning how many failed
    ///
    /// Below [`FAILURE_RATIO_PCT`] a share of the surviving banks fails in
    /// proportion to the shortfall. Each direct failure drags down
    /// `contagion_factor * len` more, capped at the banks still standing.
    pub fn apply_liquidity_stress(
        &mut self,
        liquidity_ratio_pct: f64,
        contagion_factor: f64,
        period: usize,
        rng: &mut SimRng,
    ) -> usize {
        if liquidity_ratio_pct.is_nan() || liquidity_ratio_pct >= FAILURE_RATIO_PCT {
            return 0;
        }

        let survivors: Vec<usize> = (0..self.len()).filter(|&b| self.alive[b]).collect();
        let failure_probability =
            ((FAILURE_RATIO_PCT - liquidity_ratio_pct) / FAILURE_RATIO_PCT).min(1.0);
        let direct = (failure_probability * survivors.len() as f64).floor() as usize;
        if direct == 0 {
            return 0;
        }

        let contagion = (direct as f64 * contagion_factor * self.len() as f64).floor() as usize;
        let total = (direct + contagion).min(survivors.len());

        for i in index::sample(rng, survivors.len(), total).iter() {
            self.alive[survivors[i]] = false;
        }

        warn!(
            "Period {}: {} banks failed ({} direct, {} contagion), {} remain",
            period,
            total,
            direct,
            total - direct.min(total),
            self.alive_count()
        );

        total
    }
}

/// Lender of last resort
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralBank {
    policy: CentralBankPolicy,
}

impl CentralBank {
    pub fn new(policy: CentralBankPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CentralBankPolicy {
        &self.policy
    }

    /// Support granted at `period`; it reaches reserves the following period
    pub fn respond(&self, period: usize, liquidity_ratio_pct: f64, withdrawals: f64) -> f64 {
        let threshold_pct = self.policy.intervention_threshold * 100.0;
        if period < self.policy.response_delay
            || liquidity_ratio_pct.is_nan()
            || liquidity_ratio_pct >= threshold_pct
        {
            return 0.0;
        }

        let support = (withdrawals * self.policy.coverage_days)
            .min(self.policy.max_support)
            .max(0.0);

        if support > 0.0 {
            info!(
                "Period {}: central bank intervention ${:.1}B (liquidity ratio {:.2}%)",
                period,
                support / 1e9,
                liquidity_ratio_pct
            );
        }

        support
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jinn_core::seeded_rng;

    #[test]
    fn test_healthy_ratio_fails_nobody() {
        let mut pool = BankPool::new(10);
        let failed = pool.apply_liquidity_stress(5.0, 1.0, 1, &mut seeded_rng(Some(1)));
        assert_eq!(failed, 0);
        assert_eq!(pool.alive_count(), 10);
    }

    #[test]
    fn test_small_shortfall_rounds_down() {
        // (5 - 4.9) / 5 * 10 = 0.2 banks
        let mut pool = BankPool::new(10);
        assert_eq!(pool.apply_liquidity_stress(4.9, 1.0, 1, &mut seeded_rng(Some(1))), 0);
    }

    #[test]
    fn test_direct_and_contagion_failures() {
        // Half the shortfall: 5 direct, floor(5 * 0.1 * 10) = 5 contagion
        let mut pool = BankPool::new(10);
        let failed = pool.apply_liquidity_stress(2.5, 0.1, 1, &mut seeded_rng(Some(3)));
        assert_eq!(failed, 10);
        assert_eq!(pool.failed_count(), 10);
    }

    #[test]
    fn test_failures_capped_at_survivors() {
        let mut pool = BankPool::new(10);
        pool.apply_liquidity_stress(3.0, 0.0, 1, &mut seeded_rng(Some(3)));
        assert_eq!(pool.failed_count(), 4);

        let failed = pool.apply_liquidity_stress(0.0, 1.0, 2, &mut seeded_rng(Some(4)));
        assert_eq!(failed, 6);
        assert_eq!(pool.alive_count(), 0);

        assert_eq!(pool.apply_liquidity_stress(0.0, 1.0, 3, &mut seeded_rng(Some(5))), 0);
    }

    #[test]
    fn test_nan_ratio_fails_nobody() {
        let mut pool = BankPool::new(4);
        assert_eq!(pool.apply_liquidity_stress(f64::NAN, 0.5, 1, &mut seeded_rng(Some(1))), 0);
    }

    #[test]
    fn test_same_seed_fails_same_banks() {
        let mut first = BankPool::new(20);
        let mut second = BankPool::new(20);
        first.apply_liquidity_stress(2.0, 0.0, 1, &mut seeded_rng(Some(9)));
        second.apply_liquidity_stress(2.0, 0.0, 1, &mut seeded_rng(Some(9)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_central_bank_waits_for_delay() {
        let cb = CentralBank::new(CentralBankPolicy::default());
        assert_eq!(cb.respond(0, 0.0, 10e9), 0.0);
        assert_eq!(cb.respond(1, 0.0, 1e9), 7e9);
    }

    #[test]
    fn test_central_bank_caps_support() {
        let cb = CentralBank::new(CentralBankPolicy::default());
        assert_eq!(cb.respond(3, 10.0, 17e9), 50e9);
        assert_eq!(cb.respond(3, 20.0, 17e9), 0.0);
    }
}
