use thiserror::Error;

/// Errors raised when a resolved parameter is read with the wrong shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("Missing parameter: {key}")]
    Missing { key: String },

    #[error("Parameter {key} has the wrong type (expected {expected})")]
    WrongType { key: String, expected: &'static str },
}

pub type ParamResult<T> = std::result::Result<T, ParamError>;
