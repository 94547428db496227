use thiserror::Error;

/// Error devuelto por cualquier colaborador externo (planilla, drive, mail,
/// document store). Los steps lo convierten en `StepError` en su límite.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
