//! Esquema de almacenamiento de una fila procesada.
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::columns::Column;
use crate::row::{GenerationStatus, Row};

/// Documento persistido por fila. Los campos de columna son `None` cuando
/// la fila no traía esa columna.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_assets: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_output_format: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_spec: Option<Value>,
    #[serde(default)]
    pub validation: bool,
    #[serde(default)]
    pub invalid_message: String,
    #[serde(default)]
    pub generation_status: Option<GenerationStatus>,
    pub created_date: DateTime<Utc>,
}

impl StoredDocument {
    /// Mapea la fila al esquema de almacenamiento y sella `created_date`.
    pub fn from_row(row: &Row, created_date: DateTime<Utc>) -> Self {
        let cell = |c: Column| row.get(c).cloned();
        Self { id: None,
               file_name: cell(Column::FileName),
               file_description: cell(Column::Description),
               example_assets: cell(Column::Assets),
               desired_output_format: cell(Column::OutputFormat),
               model_spec: cell(Column::ModelSpecification),
               validation: row.validation,
               invalid_message: row.invalid_message.clone(),
               generation_status: row.generation_status,
               created_date }
    }

    pub fn field(&self, column: Column) -> Option<&Value> {
        match column {
            Column::FileName => self.file_name.as_ref(),
            Column::Description => self.file_description.as_ref(),
            Column::Assets => self.example_assets.as_ref(),
            Column::OutputFormat => self.desired_output_format.as_ref(),
            Column::ModelSpecification => self.model_spec.as_ref(),
        }
    }

    /// Reconstruye las columnas reconocidas con sus encabezados originales.
    pub fn recognized(&self) -> IndexMap<String, Value> {
        Column::ALL.iter()
                   .filter_map(|c| self.field(*c).map(|v| (c.header().to_string(), v.clone())))
                   .collect()
    }

    pub fn is_success(&self) -> bool {
        self.generation_status == Some(GenerationStatus::Success)
    }
}

/// Filtro de consulta para `DocumentStore::find_all`. El default no filtra.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFilter {
    pub generation_status: Option<GenerationStatus>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl DocumentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn since(from: DateTime<Utc>) -> Self {
        Self { created_from: Some(from),
               ..Self::default() }
    }

    pub fn matches(&self, doc: &StoredDocument) -> bool {
        if let Some(status) = self.generation_status {
            if doc.generation_status != Some(status) {
                return false;
            }
        }
        if let Some(from) = self.created_from {
            if doc.created_date < from {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if doc.created_date >= to {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_row() -> Row {
        let headers: Vec<String> = ["File Name", "Description", "Output Format", "Extra"].iter().map(|s| s.to_string()).collect();
        let mut row = Row::from_cells(&headers, &[json!("a"), json!("desc"), json!("GIF"), json!("ignored")]);
        row.generation_status = Some(GenerationStatus::Success);
        row
    }

    #[test]
    fn maps_columns_to_storage_fields() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let doc = StoredDocument::from_row(&sample_row(), ts);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["file_name"], json!("a"));
        assert_eq!(value["file_description"], json!("desc"));
        assert_eq!(value["desired_output_format"], json!("GIF"));
        assert!(value.get("example_assets").is_none());
        assert!(value.get("Extra").is_none());
        assert_eq!(value["generation_status"], json!("Success"));
    }

    #[test]
    fn recognized_values_survive_serialization() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let row = sample_row();
        let doc = StoredDocument::from_row(&row, ts);
        let back: StoredDocument = serde_json::from_value(serde_json::to_value(&doc).unwrap()).unwrap();
        assert_eq!(back.recognized(), row.recognized());
    }

    #[test]
    fn filter_bounds_are_half_open() {
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let filter = DocumentFilter { created_from: Some(from),
                                      created_to: Some(to),
                                      ..DocumentFilter::default() };
        let mut doc = StoredDocument::from_row(&sample_row(), from);
        assert!(filter.matches(&doc));
        doc.created_date = to;
        assert!(!filter.matches(&doc));
        assert!(DocumentFilter::all().matches(&doc));
    }
}
