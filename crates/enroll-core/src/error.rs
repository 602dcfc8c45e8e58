//! Error types for the enroll client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::ValidationErrors;

/// A shared error type for the whole enroll stack.
///
/// This provides typed, structured error variants so that callers can
/// distinguish locally recoverable failures (validation, a submission
/// already in flight) from remote ones (transport).
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum EnrollError {
    /// Field-keyed validation failure. Blocks submission; recoverable by
    /// correcting the offending fields.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// Network or HTTP failure. The status code is absent when the request
    /// never reached the server (connect/timeout errors).
    #[error("Transport error: {message}")]
    Transport {
        status_code: Option<u16>,
        message: String,
    },

    /// Update or delete was attempted without a server-assigned id.
    /// Raised before any network activity.
    #[error("Cannot {operation} a profile without a stored id")]
    MissingReference { operation: &'static str },

    /// A submission is already in flight on this form session.
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EnrollError {
    /// Creates a Transport error.
    pub fn transport(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a MissingReference error for the named operation.
    pub fn missing_reference(operation: &'static str) -> Self {
        Self::MissingReference { operation }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a Serialization error for the given format.
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a MissingReference error
    pub fn is_missing_reference(&self) -> bool {
        matches!(self, Self::MissingReference { .. })
    }

    /// Whether retrying the same request may succeed.
    ///
    /// True for transport errors that never reached the server and for
    /// throttling/server-side statuses (429, 5xx).
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { status_code, .. } => match status_code {
                None => true,
                Some(status) => matches!(status, 429 | 500 | 502 | 503 | 504),
            },
            _ => false,
        }
    }

    /// Returns the field-keyed error map for Validation errors.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for EnrollError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// A type alias for `Result<T, EnrollError>`.
pub type Result<T> = std::result::Result<T, EnrollError>;
