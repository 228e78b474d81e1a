use thiserror::Error;

use crate::models::Field;

/// Why a single field value was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    #[error("value is missing")]
    Missing,

    #[error("value is not a finite decimal number")]
    NotNumeric,

    #[error("value must be greater than 0")]
    NotPositive,

    #[error("value must not be negative")]
    Negative,

    #[error("value must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },

    #[error("value is too large to compute with")]
    TooLarge,
}

/// Error type for reading and validating calculation inputs.
///
/// Every rejected input maps to the one variant; callers show a neutral
/// "no result" state rather than a zero or error reading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("invalid input for {field}: {violation}")]
    InvalidInput { field: Field, violation: Violation },
}

impl EstimateError {
    pub fn invalid(field: Field, violation: Violation) -> Self {
        EstimateError::InvalidInput { field, violation }
    }

    pub fn field(&self) -> Field {
        match self {
            EstimateError::InvalidInput { field, .. } => *field,
        }
    }
}

/// Error type for loading an [`EstimatorConfig`](crate::config::EstimatorConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{key} out of range: {message}")]
    OutOfRange { key: &'static str, message: String },
}
