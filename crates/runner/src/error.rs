use jinn_ports::ModelError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Unknown model: {name}")]
    UnknownModel { name: String },

    #[error("Failed to load scenario from {path}: {cause}")]
    Load { path: String, cause: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
