//! Error types for credential submission coordination

use thiserror::Error;

use crate::job::{JobError, PortableDataType};
use crate::provider::ProviderError;
use crate::session::SessionError;

/// Errors surfaced by a credential submission, one variant per failure kind.
///
/// None of them are retried internally. Credentials never appear in any
/// message.
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Session token missing, malformed, or failed verification
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    /// Resource not found with context
    #[error("Resource not found: {resource_type} {resource_id}")]
    NotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Malformed submission or job not accepting credentials
    #[error("Validation error: {0}")]
    Validation(String),

    /// No generator registered for the service and data type
    #[error("Unsupported provider: {service} for {data_type}")]
    UnsupportedProvider {
        service: String,
        data_type: PortableDataType,
    },

    /// Provider rejected the credentials
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Provider could not be reached or answered unusably
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Job was updated by someone else since it was read
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Job store backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoordinationError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        tracing::error!("{}", self);
        self
    }

    /// Whether resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Whether the failure lies with what the user submitted.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidToken(_) | Self::AuthFailed(_)
        )
    }
}

// Custom From implementations that automatically log errors

impl From<JobError> for CoordinationError {
    fn from(err: JobError) -> Self {
        let error = match err {
            JobError::NotFound(id) => Self::NotFound {
                resource_type: "Job".to_string(),
                resource_id: id,
            },
            JobError::Conflict(msg) => Self::Conflict(msg),
            JobError::InvalidState(msg) => Self::Validation(msg),
            JobError::InvalidData(msg) | JobError::Storage(msg) => Self::Storage(msg),
        };
        tracing::error!("{}", error);
        error
    }
}

impl From<ProviderError> for CoordinationError {
    fn from(err: ProviderError) -> Self {
        let error = match err {
            ProviderError::Unsupported { service, data_type } => {
                Self::UnsupportedProvider { service, data_type }
            }
            ProviderError::AuthFailed(msg) => Self::AuthFailed(msg),
            ProviderError::Unavailable(msg) => Self::ProviderUnavailable(msg),
        };
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = match err {
            SessionError::InvalidToken(msg) => Self::InvalidToken(msg),
            other => Self::Internal(other.to_string()),
        };
        tracing::error!("{}", error);
        error
    }
}
