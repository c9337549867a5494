//! Model result record
//!
//! Internally a run keeps native `f64` vectors. [`ModelOutput::to_json`] is
//! the single point where they become wire JSON.

use jinn_core::{ParamMap, TimeSeries};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{ModelError, ModelResult};

/// Result of one `simulate` call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelOutput {
    periods: usize,
    /// Named series in insertion order
    series: Vec<(String, TimeSeries)>,
    summary: ParamMap,
}

impl ModelOutput {
    pub fn new(periods: usize) -> Self {
        Self {
            periods,
            series: Vec::new(),
            summary: ParamMap::new(),
        }
    }

    /// Add a named series; a second series with the same name replaces the first
    pub fn push_series(&mut self, name: impl Into<String>, series: TimeSeries) {
        let name = name.into();
        match self.series.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = series,
            None => self.series.push((name, series)),
        }
    }

    pub fn with_series(mut self, name: impl Into<String>, series: TimeSeries) -> Self {
        self.push_series(name, series);
        self
    }

    /// Store a typed summary record
    pub fn set_summary<T: Serialize>(&mut self, summary: &T) -> ModelResult<()> {
        match serde_json::to_value(summary) {
            Ok(Value::Object(map)) => {
                self.summary = map;
                Ok(())
            }
            Ok(other) => Err(ModelError::Serialization(format!(
                "summary must be an object, got {}",
                other
            ))),
            Err(e) => Err(ModelError::Serialization(e.to_string())),
        }
    }

    /// Period index list `0..periods`
    pub fn periods(&self) -> Vec<usize> {
        (0..self.periods).collect()
    }

    pub fn period_count(&self) -> usize {
        self.periods
    }

    pub fn series(&self, name: &str) -> Option<&TimeSeries> {
        self.series.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|(n, _)| n.as_str())
    }

    pub fn summary(&self) -> &ParamMap {
        &self.summary
    }

    pub fn summary_value(&self, key: &str) -> Option<&Value> {
        self.summary.get(key)
    }

    /// Wire form: `{"periods": [...], <series>: [...], "summary": {...}}`
    pub fn to_json(&self) -> Value {
        let mut root = serde_json::Map::new();
        root.insert(
            "periods".to_string(),
            Value::Array(self.periods().into_iter().map(Value::from).collect()),
        );

        for (name, series) in &self.series {
            let values = series.iter().map(|v| Value::from(finite(v))).collect();
            root.insert(name.clone(), Value::Array(values));
        }

        root.insert("summary".to_string(), Value::Object(self.summary.clone()));
        Value::Object(root)
    }
}

impl Serialize for ModelOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Replace values JSON cannot carry
fn finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else if value.is_infinite() {
        if value > 0.0 { f64::MAX } else { f64::MIN }
    } else {
        value
    }
}
