use log::{info, warn};
use sheet_core::{Context, StepDefinition, StepError, StepRunResult};
use sheet_domain::StoredDocument;

use super::{collaborator, read_rows, rows_fragment};
use crate::inputs::KEY_DATA;
use crate::services::Services;

/// Persiste un documento por fila. Un id vacío queda como marcador en la
/// fila; sólo un error del store detiene la cadena.
pub struct StoreStep;

impl StoreStep {
    fn store(&self, ctx: &Context, services: &mut Services) -> Result<StepRunResult, StepError> {
        let mut rows = read_rows(ctx)?;
        let created_date = services.now();
        for row in rows.iter_mut() {
            let doc = StoredDocument::from_row(row, created_date);
            let id = services.documents.insert(&doc).map_err(|e| collaborator(self.name(), e))?;
            if id.is_none() {
                warn!("store: document store returned no id");
            }
            row.storage_id = id.unwrap_or_default();
        }
        info!("store: stored={}", rows.len());
        Ok(StepRunResult::next(rows_fragment(&rows)?, "upload"))
    }
}

impl StepDefinition<Services> for StoreStep {
    fn name(&self) -> &str {
        "store"
    }
    fn description(&self) -> &str {
        "Store output data in the document store"
    }
    fn failure_message(&self) -> String {
        "Failed to store data to the document store".to_string()
    }
    fn requires(&self) -> &[&'static str] {
        &[KEY_DATA]
    }
    fn provides(&self) -> &[&'static str] {
        &[KEY_DATA]
    }
    fn run(&self, ctx: &Context, services: &mut Services) -> StepRunResult {
        self.store(ctx, services).into()
    }
}
