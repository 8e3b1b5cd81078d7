//! Error types for the Safeval core library
//!
//! Data-shape problems (non-numeric operands, zero divisors, null input to a
//! text operation) never surface here: they are absorbed into a null-valued,
//! poisoned [`SmartValue`](crate::SmartValue). The variants below cover
//! programmer errors and explicit opt-in failures only.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Main error type for Safeval operations
#[derive(Error, Debug)]
pub enum Error {
    /// A value that is not a scalar was passed where a scalar is required
    #[error("Invalid construction: expected a scalar, found {found}")]
    InvalidConstruction {
        found: ValueKind,
        path: Option<String>,
    },

    /// `or_throw` was called on a missing value
    #[error("Missing value: {message}")]
    MissingValue {
        message: String,
    },

    /// A chain step name was not recognised
    #[error("Unknown step: '{name}'")]
    UnknownStep {
        name: String,
    },

    /// A chain step was recognised but its arguments are malformed
    #[error("Invalid step '{step}': {message}")]
    InvalidStep {
        step: String,
        message: String,
    },

    /// Settings failed validation
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Shape of a JSON value, used when rejecting non-scalar input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ValueKind::Null,
            serde_json::Value::Bool(_) => ValueKind::Bool,
            serde_json::Value::Number(_) => ValueKind::Number,
            serde_json::Value::String(_) => ValueKind::String,
            serde_json::Value::Array(_) => ValueKind::Array,
            serde_json::Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Array => write!(f, "array"),
            ValueKind::Object => write!(f, "object"),
        }
    }
}

impl Error {
    /// Create a configuration error for a specific settings field
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an invalid step error
    pub fn invalid_step(step: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidStep {
            step: step.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
