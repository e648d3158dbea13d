use http::StatusCode;
use session_guard::{GuardError, SessionError};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Implementation for GuardError to map variants to appropriate status codes
impl<T> IntoResponseError<T> for Result<T, GuardError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                GuardError::ViewNotFound(_) => StatusCode::NOT_FOUND,
                GuardError::Dispatch(_) | GuardError::Model(_) | GuardError::Session(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            tracing::error!("Request failed: {}", e);
            (status, e.to_string())
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}
