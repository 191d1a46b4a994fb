//! Error types for plugin registration metrics

use crate::capability::{CapabilityKind, Handle};
use thiserror::Error;

/// Errors raised by a language feature registry when a registration fails.
///
/// The tracker never produces these itself; it hands them back to the caller
/// exactly as the wrapped registry returned them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Registration of {capability} rejected: {reason}")]
    Rejected {
        capability: CapabilityKind,
        reason: String,
    },

    #[error("Handle {0} is already registered")]
    DuplicateHandle(Handle),

    #[error("Internal registry error: {0}")]
    Internal(String),
}

impl RegistrationError {
    /// Create a rejection error for a capability
    pub fn rejected(capability: CapabilityKind, reason: impl Into<String>) -> Self {
        Self::Rejected {
            capability,
            reason: reason.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

pub type RegistrationResult<T> = std::result::Result<T, RegistrationError>;

/// Errors from the metrics plumbing around the inventory (config, logging, reporting)
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report interval {0:?} must be greater than zero and at most one day")]
    InvalidInterval(std::time::Duration),

    #[error("No tokio runtime available to schedule the inventory reporter")]
    NoRuntime,

    #[error("Logging initialization failed: {0}")]
    Logging(String),

    #[error("Report sink failed: {0}")]
    Sink(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration source error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl MetricsError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }
}

impl From<figment::Error> for MetricsError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

pub type MetricsResult<T> = std::result::Result<T, MetricsError>;
