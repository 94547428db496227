use std::fmt;

use serde::{Deserialize, Serialize};

pub const OUTPUT_FORMATS: &[&str] = &["PNG", "JPG", "GIF", "MP3"];
pub const MODEL_SPECS: &[&str] = &["OpenAI", "Claude"];

/// Restricción de valor de una columna reconocida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// Texto libre no vacío.
    Text,
    /// Uno de los valores permitidos (sin distinguir mayúsculas).
    OneOf(&'static [&'static str]),
}

impl ColumnRule {
    pub fn allows(&self, value: &str) -> bool {
        match self {
            ColumnRule::Text => true,
            ColumnRule::OneOf(options) => options.iter().any(|o| o.eq_ignore_ascii_case(value)),
        }
    }
}

/// Columnas reconocidas de la planilla de entrada. El resto de columnas
/// viaja con la fila pero no se valida ni se persiste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    FileName,
    Description,
    Assets,
    OutputFormat,
    ModelSpecification,
}

impl Column {
    /// Orden canónico (el del encabezado esperado).
    pub const ALL: [Column; 5] = [Column::FileName,
                                  Column::Description,
                                  Column::Assets,
                                  Column::OutputFormat,
                                  Column::ModelSpecification];

    /// Texto exacto del encabezado en la planilla.
    pub fn header(self) -> &'static str {
        match self {
            Column::FileName => "File Name",
            Column::Description => "Description",
            Column::Assets => "Assets",
            Column::OutputFormat => "Output Format",
            Column::ModelSpecification => "Model Specification",
        }
    }

    /// Nombre del campo en el documento almacenado.
    pub fn storage_field(self) -> &'static str {
        match self {
            Column::FileName => "file_name",
            Column::Description => "file_description",
            Column::Assets => "example_assets",
            Column::OutputFormat => "desired_output_format",
            Column::ModelSpecification => "model_spec",
        }
    }

    pub fn rule(self) -> ColumnRule {
        match self {
            Column::OutputFormat => ColumnRule::OneOf(OUTPUT_FORMATS),
            Column::ModelSpecification => ColumnRule::OneOf(MODEL_SPECS),
            _ => ColumnRule::Text,
        }
    }

    pub fn from_header(header: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}
