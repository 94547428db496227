use std::fmt;

use serde::{Deserialize, Serialize};

/// Estado de una cadena de steps.
///
/// Las transiciones válidas son:
/// - `NotStarted` -> `InProgress`
/// - `InProgress` -> `Success`
/// - `InProgress` -> `Failed`
///
/// No se permiten reversiones; sólo `reset` del engine vuelve a
/// `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkflowState {
    #[default]
    NotStarted,
    InProgress,
    Success,
    Failed,
}

impl WorkflowState {
    pub fn can_transition_to(self, next: WorkflowState) -> bool {
        use WorkflowState::*;
        matches!((self, next), (NotStarted, InProgress) | (InProgress, Success) | (InProgress, Failed))
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowState::Success | WorkflowState::Failed)
    }

    /// Etiqueta legible (la misma que ve el usuario en notificaciones).
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowState::NotStarted => "Not Started",
            WorkflowState::InProgress => "In Progress",
            WorkflowState::Success => "Success",
            WorkflowState::Failed => "Failed",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cadena a la que pertenece una ejecución. Cada una tiene su propio
/// `WorkflowState`; el fallo de una no altera a la otra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainKind {
    Main,
    Optional,
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainKind::Main => f.write_str("main"),
            ChainKind::Optional => f.write_str("optional"),
        }
    }
}
