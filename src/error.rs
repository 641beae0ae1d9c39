//! Error types for building and configuring a simulation.

use thiserror::Error;

/// Errors raised while loading a scenario or constructing bodies.
///
/// Numeric degeneracy during a step is never an error: it is neutralised in
/// the force accumulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// Body mass must be strictly positive and finite
    #[error("body mass must be positive and finite, got {0}")]
    NonPositiveMass(f64),

    /// A configuration field violates a host precondition
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// A YAML vector did not have exactly two components
    #[error("body {index}: `{field}` must have 2 components, got {len}")]
    BadVector {
        index: usize,
        field: &'static str,
        len: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl SimError {
    /// Creates an invalid-config error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
