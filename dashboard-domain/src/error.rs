use thiserror::Error;

/// Failure of a call to the analysis service, or of the client-side checks
/// that guard it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Detected locally before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),
    /// Network failure, timeout, or a non-2xx response without a readable body.
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with a structured error message.
    #[error("{0}")]
    Api(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
