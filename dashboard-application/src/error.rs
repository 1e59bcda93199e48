use dashboard_domain::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("another operation is already in progress ({0})")]
    Busy(&'static str),
    #[error("no file selected")]
    NoFile,
    #[error("no analysis available, run an analysis first")]
    NoAnalysis,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for problems detected locally, before any request was sent.
    pub fn is_validation(&self) -> bool {
        match self {
            AppError::Client(err) => err.is_validation(),
            AppError::NoFile | AppError::NoAnalysis => true,
            _ => false,
        }
    }
}
