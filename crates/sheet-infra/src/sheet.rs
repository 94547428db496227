use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use sheet_domain::{CollaboratorError, SheetData, SpreadsheetSource};

/// Export de planilla en disco. Acepta dos formas:
/// - objeto `{ "title": .., "sheet_name": .., "rows": [[..], ..] }`;
/// - arreglo de filas `[[..], ..]` (título = nombre del archivo).
#[derive(Deserialize)]
#[serde(untagged)]
enum SheetFile {
    Full {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        sheet_name: Option<String>,
        rows: Vec<Vec<Value>>,
    },
    Bare(Vec<Vec<Value>>),
}

const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Fuente de planillas exportadas como JSON. El locator es una ruta; si es
/// relativa se resuelve contra `root`.
#[derive(Debug, Clone)]
pub struct JsonSheetSource {
    root: PathBuf,
}

impl JsonSheetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl SpreadsheetSource for JsonSheetSource {
    fn fetch(&self, locator: &str) -> Result<SheetData, CollaboratorError> {
        if locator.trim().is_empty() {
            return Err(CollaboratorError::Rejected("empty spreadsheet locator".into()));
        }
        let path = self.resolve(locator);
        if !path.is_file() {
            return Err(CollaboratorError::NotFound(path.display().to_string()));
        }
        let raw = fs::read_to_string(&path)?;
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled").to_string();
        let data = match serde_json::from_str::<SheetFile>(&raw)? {
            SheetFile::Full { title, sheet_name, rows } => SheetData { rows,
                                                                       title: title.unwrap_or(stem),
                                                                       sheet_name: sheet_name.unwrap_or_else(|| DEFAULT_SHEET_NAME.into()) },
            SheetFile::Bare(rows) => SheetData { rows,
                                                 title: stem,
                                                 sheet_name: DEFAULT_SHEET_NAME.into() },
        };
        debug!("fetch:done path={} rows={}", path.display(), data.rows.len());
        Ok(data)
    }
}
