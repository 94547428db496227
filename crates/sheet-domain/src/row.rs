use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collaborators::UploadedFile;
use crate::columns::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationStatus {
    Success,
    Failed,
}

impl GenerationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationStatus::Success => "Success",
            GenerationStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Un registro de entrada: las celdas tal cual vienen de la planilla (en
/// orden de encabezado) más los campos que agrega cada step.
///
/// Las filas se crean en la carga y sólo se anotan después; nunca se borran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Row {
    pub cells: IndexMap<String, Value>,
    pub validation: bool,
    pub invalid_message: String,
    pub file_path: String,
    pub generation_status: Option<GenerationStatus>,
    pub storage_id: String,
    pub uploaded_file: Option<UploadedFile>,
}

impl Row {
    /// Combina encabezados y valores. Si la fila es más corta que los
    /// encabezados las columnas finales simplemente no aparecen; las celdas
    /// sobrantes sin encabezado se descartan.
    pub fn from_cells(headers: &[String], values: &[Value]) -> Self {
        let cells = headers.iter().cloned().zip(values.iter().cloned()).collect();
        Self { cells,
               ..Self::default() }
    }

    pub fn get(&self, column: Column) -> Option<&Value> {
        self.cells.get(column.header())
    }

    /// Valor de texto de una columna reconocida (None si falta o no es texto).
    pub fn text(&self, column: Column) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    /// Subconjunto de columnas reconocidas presentes, en orden canónico.
    pub fn recognized(&self) -> IndexMap<String, Value> {
        Column::ALL.iter()
                   .filter_map(|c| self.cells.get(c.header()).map(|v| (c.header().to_string(), v.clone())))
                   .collect()
    }

    pub fn is_generated(&self) -> bool {
        self.generation_status == Some(GenerationStatus::Success)
    }

    pub fn is_uploaded(&self) -> bool {
        self.uploaded_file.is_some()
    }
}
