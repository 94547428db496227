//! Tipos de evento del engine y estructura `FlowEvent`.
//!
//! Rol en el flujo:
//! - Cada corrida de cadena emite eventos a un `EventStore` append-only,
//!   correlacionados por `run_id`.
//! - Los eventos son la traza observable del engine (qué step corrió, a quién
//!   cedió el control, por qué se detuvo); el estado vivo sigue estando en el
//!   engine.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::step::{ChainKind, WorkflowState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Primer evento de una corrida. Invariante: único por `run_id`.
    ChainStarted { chain: ChainKind, entry: String, engine_version: String },
    /// Un step comenzó su ejecución. No implica éxito.
    StepStarted { step_id: String, description: String },
    /// Un step terminó bien; `keys` son las claves fusionadas al contexto y
    /// `next` el sucesor elegido (None si cerró la cadena).
    StepFinished { step_id: String, keys: Vec<String>, next: Option<String> },
    /// Un step decidió no hacer nada y ceder (o cerrar) la cadena.
    StepSkipped { step_id: String, reason: String, next: Option<String> },
    /// Un step terminó con error terminal. La cadena no continúa.
    StepFailed { step_id: String, error: String },
    /// Cierre de la corrida con su estado final.
    ChainStopped { chain: ChainKind, status: WorkflowState },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // orden global de append
    pub run_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>,
}
