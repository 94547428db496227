//! GenerateStep: un artifact JSON por fila válida en el directorio scratch.
//!
//! El archivo se llama `<File Name>.json` y contiene sólo las columnas
//! reconocidas (UTF-8, indentado a 4 espacios). Si el nombre no sirve como
//! nombre de archivo se usa `generated_content_<idx>`.
use std::fs;
use std::path::PathBuf;

use log::{debug, info};
use serde::Serialize;
use sheet_core::{Context, ScratchDir, StepDefinition, StepError, StepRunResult};
use sheet_domain::{Column, GenerationStatus, Row};

use super::{read_rows, rows_fragment};
use crate::inputs::KEY_DATA;
use crate::services::Services;

pub struct GenerateStep;

impl GenerateStep {
    fn generate(&self, ctx: &Context, services: &mut Services) -> Result<StepRunResult, StepError> {
        services.scratch.ensure()?;
        let mut rows = read_rows(ctx)?;
        let mut generated = 0;
        for (idx, row) in rows.iter_mut().enumerate() {
            if row.validation {
                let path = write_artifact(&services.scratch, idx, row)?;
                row.file_path = path.to_string_lossy().into_owned();
                row.generation_status = Some(GenerationStatus::Success);
                generated += 1;
            } else {
                row.file_path.clear();
                row.generation_status = Some(GenerationStatus::Failed);
            }
        }
        info!("generate: generated={generated} skipped={}", rows.len() - generated);
        Ok(StepRunResult::next(rows_fragment(&rows)?, "store"))
    }
}

fn artifact_name(idx: usize, row: &Row) -> String {
    match row.text(Column::FileName).map(str::trim) {
        Some(name) if is_usable_file_name(name) => name.to_string(),
        _ => format!("generated_content_{idx}"),
    }
}

fn is_usable_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

fn write_artifact(scratch: &ScratchDir, idx: usize, row: &Row) -> Result<PathBuf, StepError> {
    let path = scratch.join(format!("{}.json", artifact_name(idx, row)));
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    row.recognized().serialize(&mut ser)?;
    fs::write(&path, buf)?;
    debug!("generate: wrote {}", path.display());
    Ok(path)
}

impl StepDefinition<Services> for GenerateStep {
    fn name(&self) -> &str {
        "generate"
    }
    fn description(&self) -> &str {
        "Generate content for each valid row"
    }
    fn failure_message(&self) -> String {
        "Failed to generate content".to_string()
    }
    fn requires(&self) -> &[&'static str] {
        &[KEY_DATA]
    }
    fn provides(&self) -> &[&'static str] {
        &[KEY_DATA]
    }
    fn run(&self, ctx: &Context, services: &mut Services) -> StepRunResult {
        self.generate(ctx, services).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row_named(name: serde_json::Value) -> Row {
        Row::from_cells(&["File Name".to_string()], &[name])
    }

    #[test]
    fn falls_back_when_name_is_unusable() {
        assert_eq!(artifact_name(3, &row_named(json!("banner"))), "banner");
        assert_eq!(artifact_name(3, &row_named(json!("../etc"))), "generated_content_3");
        assert_eq!(artifact_name(4, &row_named(json!(""))), "generated_content_4");
        assert_eq!(artifact_name(5, &Row::default()), "generated_content_5");
    }

    #[test]
    fn artifact_holds_only_recognized_columns_with_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::new(dir.path());
        let headers: Vec<String> = ["File Name", "Owner", "Output Format"].iter().map(|s| s.to_string()).collect();
        let row = Row::from_cells(&headers, &[json!("café"), json!("ana"), json!("PNG")]);
        let path = write_artifact(&scratch, 0, &row).unwrap();
        assert!(path.ends_with("café.json"));
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"File Name\": \"café\",\n    \"Output Format\": \"PNG\"\n}");
    }
}
