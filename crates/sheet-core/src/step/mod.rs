//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad de trabajo con nombre que lee el `Context`, usa los
//! servicios prestados por el engine y devuelve un `StepRunResult` que nombra
//! al siguiente step. Este módulo define:
//! - `StepDefinition`: interfaz usada por el sequencer.
//! - `StepRunResult`: resultado etiquetado (continuar, saltar, terminar,
//!   fallar).
//! - `WorkflowState` / `ChainKind`: estado de cada cadena.

pub mod definition;
mod run_result;
mod status;

pub use definition::StepDefinition;
pub use run_result::StepRunResult;
pub use status::{ChainKind, WorkflowState};
