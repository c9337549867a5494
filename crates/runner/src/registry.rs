//! Model registry
//!
//! Built-in models are a closed enum resolved at compile time. Extra models
//! can be registered under any name; registering a name again replaces the
//! earlier factory.

use crate::error::{EngineError, EngineResult};
use abm::CryptoPanicModel;
use jinn_bank_panic::BankPanicModel;
use jinn_core::ParamMap;
use jinn_ports::{ModelFactory, ScenarioModel};
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

/// Models shipped with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinModel {
    CryptoPanic,
    BankPanic,
}

impl BuiltinModel {
    pub const ALL: [BuiltinModel; 2] = [BuiltinModel::CryptoPanic, BuiltinModel::BankPanic];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CryptoPanic => CryptoPanicModel::NAME,
            Self::BankPanic => BankPanicModel::NAME,
        }
    }

    pub fn factory(&self) -> ModelFactory {
        match self {
            Self::CryptoPanic => CryptoPanicModel::factory,
            Self::BankPanic => BankPanicModel::factory,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for BuiltinModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone)]
pub struct ModelRegistry {
    factories: BTreeMap<String, ModelFactory>,
}

impl ModelRegistry {
    /// Registry with no models at all
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry holding every [`BuiltinModel`]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for model in BuiltinModel::ALL {
            registry.register(model.name(), model.factory());
        }
        registry
    }

    /// Register `factory` under `name`, returning the factory it replaced
    pub fn register(&mut self, name: impl Into<String>, factory: ModelFactory) -> Option<ModelFactory> {
        let name = name.into();
        debug!("Registering model {}", name);
        self.factories.insert(name, factory)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered names in sorted order
    pub fn model_names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Construct the model registered as `name`
    pub fn create(&self, name: &str, parameters: &ParamMap) -> EngineResult<Box<dyn ScenarioModel>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| EngineError::UnknownModel {
                name: name.to_string(),
            })?;
        Ok(factory(parameters)?)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.model_names())
            .finish()
    }
}
