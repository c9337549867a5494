//! Parameter Resolver
//!
//! Merges a model's built-in defaults with caller-supplied overrides into one
//! immutable [`ScenarioConfig`].
//!
//! Resolution is permissive: no type or range checks happen here. A value of
//! the wrong shape only surfaces as a [`ParamError`] when a typed accessor
//! reads it.

use crate::error::{ParamError, ParamResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw parameter map as it arrives from a scenario document
pub type ParamMap = serde_json::Map<String, Value>;

/// Immutable, resolved configuration map
///
/// Keys are kept ordered so that serialized output is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioConfig {
    values: BTreeMap<String, Value>,
}

impl ScenarioConfig {
    /// Merge `defaults` with `overrides`
    ///
    /// Every default absent from `overrides` is kept. Every override wins,
    /// including keys that have no default.
    pub fn resolve(defaults: &ParamMap, overrides: &ParamMap) -> Self {
        let mut values: BTreeMap<String, Value> = defaults
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        for (key, value) in overrides {
            values.insert(key.clone(), value.clone());
        }

        Self { values }
    }

    /// Wrap a map without defaults (used for simulation sections)
    pub fn from_map(map: &ParamMap) -> Self {
        Self::resolve(&ParamMap::new(), map)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Read a required float
    pub fn f64(&self, key: &str) -> ParamResult<f64> {
        let value = self.require(key)?;
        value.as_f64().ok_or_else(|| wrong_type(key, "number"))
    }

    /// Read a required non-negative integer
    ///
    /// Floats with no fractional part (`30.0`) are accepted.
    pub fn u64(&self, key: &str) -> ParamResult<u64> {
        let value = self.require(key)?;
        as_u64(value).ok_or_else(|| wrong_type(key, "non-negative integer"))
    }

    pub fn bool(&self, key: &str) -> ParamResult<bool> {
        let value = self.require(key)?;
        value.as_bool().ok_or_else(|| wrong_type(key, "boolean"))
    }

    pub fn str(&self, key: &str) -> ParamResult<&str> {
        let value = self.require(key)?;
        value.as_str().ok_or_else(|| wrong_type(key, "string"))
    }

    pub fn f64_or(&self, key: &str, default: f64) -> ParamResult<f64> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(_) => self.f64(key),
        }
    }

    pub fn u64_or(&self, key: &str, default: u64) -> ParamResult<u64> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(_) => self.u64(key),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> ParamResult<bool> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(_) => self.bool(key),
        }
    }

    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> ParamResult<&'a str> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(_) => self.str(key),
        }
    }

    /// Nested object section, empty when absent
    pub fn section(&self, key: &str) -> ParamResult<ScenarioConfig> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(ScenarioConfig::default()),
            Some(Value::Object(map)) => Ok(ScenarioConfig::from_map(map)),
            Some(_) => Err(wrong_type(key, "object")),
        }
    }

    /// Convert back into a raw map (for echoing in results)
    pub fn to_map(&self) -> ParamMap {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn require(&self, key: &str) -> ParamResult<&Value> {
        self.values.get(key).ok_or_else(|| ParamError::Missing {
            key: key.to_string(),
        })
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

fn wrong_type(key: &str, expected: &'static str) -> ParamError {
    ParamError::WrongType {
        key: key.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ParamMap {
        match value {
            Value::Object(m) => m,
            _ => ParamMap::new(),
        }
    }

    #[test]
    fn test_defaults_used_when_not_overridden() {
        let defaults = map(json!({"periods": 30, "volatility": 0.02}));
        let config = ScenarioConfig::resolve(&defaults, &ParamMap::new());

        assert_eq!(config.u64("periods").unwrap(), 30);
        assert_eq!(config.f64("volatility").unwrap(), 0.02);
    }

    #[test]
    fn test_overrides_win_and_extra_keys_accepted() {
        let defaults = map(json!({"periods": 30}));
        let overrides = map(json!({"periods": 12, "description": "custom"}));
        let config = ScenarioConfig::resolve(&defaults, &overrides);

        assert_eq!(config.u64("periods").unwrap(), 12);
        assert_eq!(config.str("description").unwrap(), "custom");
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_resolution_does_not_validate_types() {
        let defaults = map(json!({"periods": 30}));
        let overrides = map(json!({"periods": "thirty"}));
        let config = ScenarioConfig::resolve(&defaults, &overrides);

        assert!(config.contains("periods"));
        assert_eq!(
            config.u64("periods"),
            Err(ParamError::WrongType {
                key: "periods".to_string(),
                expected: "non-negative integer",
            })
        );
    }

    #[test]
    fn test_integer_accessor_accepts_whole_floats() {
        let config = ScenarioConfig::from_map(&map(json!({"a": 7.0, "b": 7.5, "c": -1})));

        assert_eq!(config.u64("a").unwrap(), 7);
        assert!(config.u64("b").is_err());
        assert!(config.u64("c").is_err());
    }

    #[test]
    fn test_missing_key() {
        let config = ScenarioConfig::default();
        assert_eq!(
            config.f64("nope"),
            Err(ParamError::Missing {
                key: "nope".to_string()
            })
        );
        assert_eq!(config.f64_or("nope", 1.5).unwrap(), 1.5);
    }

    #[test]
    fn test_section() {
        let config = ScenarioConfig::from_map(&map(json!({
            "panic": {"trigger_intensity": 0.4},
            "bad": 3
        })));

        let panic = config.section("panic").unwrap();
        assert_eq!(panic.f64("trigger_intensity").unwrap(), 0.4);
        assert!(config.section("absent").unwrap().is_empty());
        assert!(config.section("bad").is_err());
    }
}
