//! Contratos de los colaboradores externos.
//!
//! El motor no conoce APIs concretas (Sheets, Drive, Gmail, Mongo): sólo
//! estos traits. Las implementaciones viven en `sheet-infra`,
//! `sheet-persistence` o en los tests.
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CollaboratorError;
use crate::storage::{DocumentFilter, StoredDocument};

/// Datos tabulares tal cual los devuelve la fuente: la primera fila son los
/// encabezados.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub rows: Vec<Vec<Value>>,
    pub title: String,
    pub sheet_name: String,
}

/// Archivo ya subido al almacenamiento de destino.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

pub trait SpreadsheetSource {
    fn fetch(&self, locator: &str) -> Result<SheetData, CollaboratorError>;
}

pub trait FileStore {
    fn upload(&mut self, local_path: &Path, folder_locator: &str) -> Result<UploadedFile, CollaboratorError>;
}

pub trait MailSender {
    fn send(&mut self, address: &str, subject: &str, html_body: &str) -> Result<DeliveryReceipt, CollaboratorError>;
}

pub trait DocumentStore {
    /// Inserta el documento. `None` significa que el store no asignó id
    /// (marcador de calidad de datos, no error).
    fn insert(&mut self, document: &StoredDocument) -> Result<Option<String>, CollaboratorError>;

    fn find_all(&self, filter: &DocumentFilter) -> Result<Vec<StoredDocument>, CollaboratorError>;
}
