use jinn_core::ParamError;
use thiserror::Error;

/// Errors a model raises at construction or per call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid parameter: {0}")]
    Param(#[from] ParamError),

    #[error("Domain validation failed: {0}")]
    Domain(String),

    #[error("Summary serialization failed: {0}")]
    Serialization(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
