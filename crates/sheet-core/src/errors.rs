//! Errores específicos del core.
//!
//! - `CoreEngineError`: uso indebido del engine (transiciones inválidas,
//!   registros mal formados, IO del directorio scratch).
//! - `StepError`: fallo dentro del límite de un step. Nunca escapa del
//!   sequencer; se convierte en `Failure` y detiene la cadena activa.

use thiserror::Error;

use crate::step::{ChainKind, WorkflowState};

#[derive(Debug, Error)]
pub enum CoreEngineError {
    #[error("chain '{0}' already started; reset the workflow first")]
    ChainAlreadyStarted(ChainKind),
    #[error("invalid state transition {from} -> {to}")]
    InvalidTransition { from: WorkflowState, to: WorkflowState },
    #[error("duplicate step name: {0}")]
    DuplicateStep(String),
    #[error("unknown step: {0}")]
    UnknownStep(String),
    #[error("step registry is empty")]
    EmptyRegistry,
    #[error("scratch directory error: {0}")]
    Scratch(#[from] std::io::Error),
    #[error("internal: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum StepError {
    #[error("missing required input '{0}'")]
    MissingInput(String),
    #[error("step produced undeclared output '{0}'")]
    UndeclaredOutput(String),
    #[error("invalid input '{key}': {reason}")]
    InvalidInput { key: String, reason: String },
    #[error("collaborator error: {0}")]
    Collaborator(String),
    #[error("render error: {0}")]
    Render(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StepError {
    /// Atajo para `InvalidInput`.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput { key: key.into(),
                             reason: reason.into() }
    }
}
