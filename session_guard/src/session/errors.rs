use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session already invalidated")]
    AlreadyInvalidated,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cookie error: {0}")]
    Cookie(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("View not found: {0}")]
    ViewNotFound(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Model error: {0}")]
    Model(String),

    /// Error from the host session
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}
