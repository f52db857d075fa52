use http::StatusCode;
use portability_auth::{CoordinationError, SessionError};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Maps each submission failure kind to the status the caller sees
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                CoordinationError::Validation(_) => StatusCode::BAD_REQUEST,
                CoordinationError::InvalidToken(_) => StatusCode::BAD_REQUEST,
                CoordinationError::AuthFailed(_) => StatusCode::UNAUTHORIZED,
                CoordinationError::NotFound { .. } => StatusCode::NOT_FOUND,
                CoordinationError::Conflict(_) => StatusCode::CONFLICT,
                CoordinationError::UnsupportedProvider { .. } => StatusCode::NOT_IMPLEMENTED,
                CoordinationError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                CoordinationError::Storage(_) | CoordinationError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, e.to_string())
        })
    }
}

/// Cookie preparation failures are server-side
impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}
