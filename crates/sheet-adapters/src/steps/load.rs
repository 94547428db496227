//! LoadStep: planilla → filas.
//!
//! - La primera fila son los encabezados; el resto se combina con ellos.
//! - Una fuente sin filas es un error; una planilla con sólo encabezados
//!   produce cero filas y la cadena sigue (no hay nada que hacer).
use log::info;
use serde_json::Value;
use sheet_core::{Context, StepDefinition, StepError, StepRunResult};
use sheet_domain::Row;

use super::{collaborator, rows_fragment};
use crate::inputs::{KEY_DATA, KEY_FILE_NAME, KEY_SHEETS_URL, KEY_SHEET_NAME};
use crate::services::Services;

pub struct LoadStep;

impl LoadStep {
    fn load(&self, ctx: &Context, services: &mut Services) -> Result<StepRunResult, StepError> {
        let locator = ctx.get_str(KEY_SHEETS_URL).unwrap_or_default();
        if locator.is_empty() {
            return Err(StepError::invalid(KEY_SHEETS_URL, "spreadsheet locator is empty"));
        }
        let sheet = services.sheets.fetch(locator).map_err(|e| collaborator(self.name(), e))?;
        let Some((header_row, body)) = sheet.rows.split_first() else {
            return Err(StepError::invalid(KEY_SHEETS_URL, "spreadsheet returned no data"));
        };
        let headers: Vec<String> = header_row.iter().map(header_text).collect();
        let rows: Vec<Row> = body.iter().map(|values| Row::from_cells(&headers, values)).collect();
        info!("load: sheet='{}' tab='{}' rows={}", sheet.title, sheet.sheet_name, rows.len());

        let mut fragment = rows_fragment(&rows)?;
        fragment.set(KEY_FILE_NAME, sheet.title);
        fragment.set(KEY_SHEET_NAME, sheet.sheet_name);
        Ok(StepRunResult::next(fragment, "validate"))
    }
}

fn header_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

impl StepDefinition<Services> for LoadStep {
    fn name(&self) -> &str {
        "load"
    }
    fn description(&self) -> &str {
        "Load input source data from the spreadsheet"
    }
    fn failure_message(&self) -> String {
        "Failed to load data from the spreadsheet".to_string()
    }
    fn requires(&self) -> &[&'static str] {
        &[KEY_SHEETS_URL]
    }
    fn provides(&self) -> &[&'static str] {
        &[KEY_DATA, KEY_FILE_NAME, KEY_SHEET_NAME]
    }
    fn run(&self, ctx: &Context, services: &mut Services) -> StepRunResult {
        self.load(ctx, services).into()
    }
}
