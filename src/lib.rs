//! SheetFlow Rust Library
//!
//! Fachada del workspace:
//! - Reexporta los crates `sheet-*` bajo un solo nombre.
//! - `errors` unifica los errores que un caller puede ver.
//! - `run_all` corre ambas cadenas y resume el resultado.

pub mod errors;

pub use sheet_adapters as adapters;
pub use sheet_core as engine;
pub use sheet_domain as domain;
pub use sheet_infra as infra;
pub use sheet_persistence as persistence;

pub use errors::SheetflowError;
pub use sheet_adapters::{AutomationWorkflow, InputFields, Services};
pub use sheet_core::{ScratchDir, StatusReporter, WorkflowState};

use serde::Serialize;

/// Resultado de una corrida completa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub main: WorkflowState,
    pub optional: WorkflowState,
    /// Mensaje con el que terminó cada cadena (vacío si no falló).
    pub main_error: String,
    pub optional_error: String,
    pub rows: usize,
    pub generated: usize,
    pub uploaded: usize,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.main == WorkflowState::Success && self.optional == WorkflowState::Success
    }
}

/// Corre la cadena principal y después la opcional, aun si la principal
/// falló (la notificación informa el fallo).
pub fn run_all(workflow: &mut AutomationWorkflow) -> Result<RunReport, SheetflowError> {
    let main = workflow.run_main()?;
    let main_error = workflow.error_message().to_string();
    let rows = workflow.rows();
    let optional = workflow.run_optional()?;
    let optional_error = match optional {
        WorkflowState::Failed => workflow.error_message().to_string(),
        _ => String::new(),
    };
    Ok(RunReport { main,
                   optional,
                   main_error,
                   optional_error,
                   rows: rows.len(),
                   generated: rows.iter().filter(|r| r.is_generated()).count(),
                   uploaded: rows.iter().filter(|r| r.is_uploaded()).count() })
}
