//! Correlated Price Process
//!
//! Returns are drawn in a fixed order. The first asset (the anchor) gets a
//! plain Gaussian shock. Every later asset loads on the realized returns of
//! the assets priced before it, and its own shock is shrunk by
//! `sqrt(1 - sum of squared loadings)` so the loadings don't double count
//! variance.
//!
//! This is a sequential approximation, not a multivariate-normal sampler.
//! Correlation between two satellites only flows through the loadings written
//! in the matrix, so it under-represents cross-satellite co-movement.
//!
//! ```text
//!   r[0] = z0 * vol[0]                                     + pressure[0]
//!   r[i] = Σ_{j<i} ρ[i][j] * r[j] + zi * vol[i] * sqrt(1 - Σ ρ²) + pressure[i]
//!   p[i] = max(prev[i] * (1 + r[i]), prev[i] * floor[i])
//! ```

use jinn_core::SimRng;
use rand::Rng;
use rand_distr::StandardNormal;

/// Returns and prices of one period
#[derive(Debug, Clone, PartialEq)]
pub struct PriceStep {
    pub returns: Vec<f64>,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct CorrelatedPriceProcess {
    /// Row `i` holds the loadings of asset `i` on assets `0..i`
    correlation: Vec<Vec<f64>>,
    floor_fractions: Vec<f64>,
}

impl CorrelatedPriceProcess {
    /// Build from a correlation matrix (only the strictly lower triangle is
    /// read) and per-asset floor fractions
    pub fn new(correlation: Vec<Vec<f64>>, floor_fractions: Vec<f64>) -> Self {
        let floor_fractions = floor_fractions
            .into_iter()
            .map(|f| if f.is_finite() { f.clamp(f64::MIN_POSITIVE, 1.0) } else { 1.0 })
            .collect();

        Self {
            correlation,
            floor_fractions,
        }
    }

    pub fn asset_count(&self) -> usize {
        self.floor_fractions.len()
    }

    /// Loadings of asset `i` on the assets priced before it
    fn loadings(&self, i: usize) -> &[f64] {
        match self.correlation.get(i) {
            Some(row) => &row[..i.min(row.len())],
            None => &[],
        }
    }

    /// Advance every price by one period
    ///
    /// `previous`, `volatility` and `pressure` are indexed in pricing order.
    /// Missing entries count as zero volatility or zero pressure.
    pub fn step(
        &self,
        previous: &[f64],
        volatility: &[f64],
        pressure: &[f64],
        rng: &mut SimRng,
    ) -> PriceStep {
        let n = previous.len();
        let mut returns = Vec::with_capacity(n);

        for i in 0..n {
            let z: f64 = rng.sample(StandardNormal);
            let loadings = self.loadings(i);

            let explained: f64 = loadings.iter().map(|rho| rho * rho).sum();
            let scale = (1.0 - explained).max(0.0).sqrt();
            let systematic: f64 = loadings.iter().zip(&returns).map(|(rho, r)| rho * r).sum();

            let vol = volatility.get(i).copied().unwrap_or(0.0);
            let push = pressure.get(i).copied().unwrap_or(0.0);
            returns.push(systematic + z * vol * scale + push);
        }

        let prices = previous
            .iter()
            .zip(&returns)
            .enumerate()
            .map(|(i, (&prev, &r))| {
                let floor = self.floor_fractions.get(i).copied().unwrap_or(1.0);
                // f64::max ignores a NaN candidate
                (prev * (1.0 + r)).max(prev * floor).max(f64::MIN_POSITIVE)
            })
            .collect();

        PriceStep { returns, prices }
    }
}
