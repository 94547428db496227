//! Steps concretos del workflow.
//!
//! Cada step lee el contexto, usa los `Services` y devuelve un
//! `StepRunResult` que nombra a su sucesor. Los errores de colaboradores se
//! registran en el log y se convierten en `StepError` aquí, en el límite del
//! step.

pub mod generate;
pub mod load;
pub mod notify;
pub mod report;
pub mod store;
pub mod upload;
pub mod validate;

pub use generate::GenerateStep;
pub use load::LoadStep;
pub use notify::NotifyStep;
pub use report::ReportStep;
pub use store::StoreStep;
pub use upload::UploadStep;
pub use validate::ValidateStep;

use log::error;
use sheet_core::{Context, StepError};
use sheet_domain::{CollaboratorError, Row};

use crate::inputs::KEY_DATA;

/// Filas actuales del contexto (vacío si la clave no existe).
pub(crate) fn read_rows(ctx: &Context) -> Result<Vec<Row>, StepError> {
    Ok(ctx.get_as::<Vec<Row>>(KEY_DATA)?.unwrap_or_default())
}

/// Fragmento que reescribe `data`.
pub(crate) fn rows_fragment(rows: &[Row]) -> Result<Context, StepError> {
    let mut fragment = Context::new();
    fragment.set_as(KEY_DATA, &rows)?;
    Ok(fragment)
}

pub(crate) fn collaborator(step: &str, err: CollaboratorError) -> StepError {
    error!("{step}: collaborator error: {err}");
    StepError::Collaborator(err.to_string())
}

pub(crate) fn render(step: &str, err: minijinja::Error) -> StepError {
    error!("{step}: template error: {err:#}");
    StepError::Render(err.to_string())
}
