//! sheet-adapters: steps concretos del pipeline de planillas.
//!
//! Este crate provee:
//! - Los steps de la cadena principal (`load → validate → generate → store →
//!   upload`) y de la opcional (`notify → report`) sobre los contratos de
//!   colaboradores de `sheet-domain`.
//! - `Services`: colaboradores y reloj prestados a cada step.
//! - Render del correo de notificación y del reporte diario (gráfico SVG
//!   embebido) con plantillas minijinja.
//! - `AutomationWorkflow`: fachada para el caller (configure, run_main,
//!   run_optional, reset).
//!
//! Nota: el core sólo conoce `Context` y `StepDefinition<S>`; toda la
//! semántica de filas y columnas vive aquí y en `sheet-domain`.

pub mod chains;
pub mod inputs;
pub mod mail;
pub mod report;
pub mod services;
pub mod steps;
pub mod templates;
pub mod workflow;

pub use inputs::InputFields;
pub use services::Services;
pub use workflow::AutomationWorkflow;
