//! Error taxonomy for the façade.
//!
//! Configuration problems are fatal at startup or construction time and are
//! never surfaced to an end client. Timestamp and routing failures are
//! recoverable; the caller decides which [`crate::outcome::Outcome`] they
//! become.

use serde_json::Value;

/// Errors reported by the façade.
#[derive(Debug, thiserror::Error)]
pub enum FacadeError {
    /// Misuse detected at startup or construction time: duplicate-slot
    /// registration after freeze, invalid namespace/resource segments,
    /// invalid resource keys, empty capabilities, or a non-empty payload
    /// handed to a 204 outcome.
    #[error("Configuration error: {message}")]
    Configuration { message: String, details: Value },

    /// Malformed or out-of-range date/time input to the normalizer.
    #[error("Invalid timestamp: {message}")]
    InvalidTimestamp { message: String },

    /// No registered capability matches the requested path and method.
    /// Becomes an `Outcome::NotFound`, ultimately a 404 response.
    #[error("No route matches {method} {path}")]
    RouteNotFound { method: String, path: String },
}

impl FacadeError {
    pub fn configuration(message: impl Into<String>, details: Value) -> Self {
        Self::Configuration {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_timestamp(message: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            message: message.into(),
        }
    }

    pub fn route_not_found(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::RouteNotFound {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Returns true for errors that should abort startup.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
