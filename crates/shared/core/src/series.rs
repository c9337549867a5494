//! Fixed-length per-period series
//!
//! A [`TimeSeries`] is allocated once with one slot per period and filled
//! monotonically by a driver: slot `t` is written during iteration `t` and
//! never ahead of the write frontier.

/// Index of a simulation period in `[0, periods)`
pub type PeriodIndex = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
    /// Number of leading slots already written
    committed: usize,
}

impl TimeSeries {
    /// Series of `periods` zeros
    pub fn new(periods: usize) -> Self {
        Self::filled(periods, 0.0)
    }

    /// Series pre-filled with a baseline value
    pub fn filled(periods: usize, value: f64) -> Self {
        Self {
            values: vec![value; periods],
            committed: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of slots written so far
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Write slot `t`
    ///
    /// `t` may re-write the current frontier slot or advance it by one.
    pub fn set(&mut self, t: PeriodIndex, value: f64) {
        debug_assert!(
            t <= self.committed,
            "slot {} written ahead of frontier {}",
            t,
            self.committed
        );
        self.values[t] = value;
        self.committed = self.committed.max(t + 1);
    }

    pub fn get(&self, t: PeriodIndex) -> f64 {
        self.values[t]
    }

    /// Value of slot `t - 1`, `None` at the first period
    pub fn previous(&self, t: PeriodIndex) -> Option<f64> {
        t.checked_sub(1).map(|p| self.values[p])
    }

    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn count_where(&self, predicate: impl Fn(f64) -> bool) -> usize {
        self.values.iter().filter(|&&v| predicate(v)).count()
    }
}

impl From<Vec<f64>> for TimeSeries {
    fn from(values: Vec<f64>) -> Self {
        let committed = values.len();
        Self { values, committed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_series_is_preallocated() {
        let series = TimeSeries::filled(5, 1.0);
        assert_eq!(series.len(), 5);
        assert_eq!(series.committed(), 0);
        assert_eq!(series.get(4), 1.0);
    }

    #[test]
    fn test_set_advances_frontier() {
        let mut series = TimeSeries::new(3);
        series.set(0, 2.0);
        series.set(0, 3.0);
        series.set(1, 4.0);

        assert_eq!(series.committed(), 2);
        assert_eq!(series.get(0), 3.0);
        assert_eq!(series.previous(1), Some(3.0));
        assert_eq!(series.previous(0), None);
    }

    #[test]
    fn test_reductions() {
        let series = TimeSeries::from(vec![3.0, 1.0, 4.0, 1.0, 5.0]);
        assert_eq!(series.max(), Some(5.0));
        assert_eq!(series.min(), Some(1.0));
        assert_eq!(series.sum(), 14.0);
        assert_eq!(series.count_where(|v| v > 2.0), 3);
        assert_eq!(series.first(), Some(3.0));
        assert_eq!(series.last(), Some(5.0));
    }

    #[test]
    fn test_empty_series_reductions() {
        let series = TimeSeries::new(0);
        assert!(series.is_empty());
        assert_eq!(series.max(), None);
        assert_eq!(series.sum(), 0.0);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_write_ahead_rejected_in_debug() {
        let mut series = TimeSeries::new(3);
        series.set(2, 1.0);
    }
}
