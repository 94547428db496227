use std::path::Path;

use log::{debug, info};
use sheet_core::{Context, StepDefinition, StepError, StepRunResult};

use super::{collaborator, read_rows, rows_fragment};
use crate::inputs::{KEY_DATA, KEY_DRIVE_FOLDER_URL};
use crate::services::Services;

/// Último step de la cadena principal. Sube cada artifact generado a la
/// carpeta de destino; filas sin artifact o sin carpeta configurada quedan
/// con el marcador vacío.
pub struct UploadStep;

impl UploadStep {
    fn upload(&self, ctx: &Context, services: &mut Services) -> Result<StepRunResult, StepError> {
        let folder = ctx.get_str(KEY_DRIVE_FOLDER_URL).unwrap_or_default();
        let mut rows = read_rows(ctx)?;
        let mut uploaded = 0;
        for row in rows.iter_mut() {
            if row.file_path.is_empty() || folder.is_empty() {
                row.uploaded_file = None;
                continue;
            }
            let file = services.files
                               .upload(Path::new(&row.file_path), folder)
                               .map_err(|e| collaborator(self.name(), e))?;
            debug!("upload: {} -> id={}", row.file_path, file.id);
            row.uploaded_file = Some(file);
            uploaded += 1;
        }
        info!("upload: uploaded={uploaded} total={}", rows.len());
        Ok(StepRunResult::finish(rows_fragment(&rows)?))
    }
}

impl StepDefinition<Services> for UploadStep {
    fn name(&self) -> &str {
        "upload"
    }
    fn description(&self) -> &str {
        "Upload output data to the destination folder"
    }
    fn failure_message(&self) -> String {
        "Failed to upload data to the destination folder".to_string()
    }
    fn requires(&self) -> &[&'static str] {
        &[KEY_DATA, KEY_DRIVE_FOLDER_URL]
    }
    fn provides(&self) -> &[&'static str] {
        &[KEY_DATA]
    }
    fn run(&self, ctx: &Context, services: &mut Services) -> StepRunResult {
        self.upload(ctx, services).into()
    }
}
