use log::info;
use sheet_core::{Context, StepDefinition, StepError, StepRunResult};
use sheet_domain::validate_rows;

use super::{read_rows, rows_fragment};
use crate::inputs::KEY_DATA;
use crate::services::Services;

/// Marca cada fila como válida o inválida. Nunca corta la cadena por datos
/// malos: las filas inválidas siguen con su mensaje.
pub struct ValidateStep;

impl ValidateStep {
    fn validate(&self, ctx: &Context) -> Result<StepRunResult, StepError> {
        let mut rows = read_rows(ctx)?;
        let valid = validate_rows(&mut rows);
        info!("validate: valid={valid} invalid={}", rows.len() - valid);
        Ok(StepRunResult::next(rows_fragment(&rows)?, "generate"))
    }
}

impl StepDefinition<Services> for ValidateStep {
    fn name(&self) -> &str {
        "validate"
    }
    fn description(&self) -> &str {
        "Validate input data"
    }
    fn failure_message(&self) -> String {
        "Failed to validate input data".to_string()
    }
    fn requires(&self) -> &[&'static str] {
        &[KEY_DATA]
    }
    fn provides(&self) -> &[&'static str] {
        &[KEY_DATA]
    }
    fn run(&self, ctx: &Context, _services: &mut Services) -> StepRunResult {
        self.validate(ctx).into()
    }
}
