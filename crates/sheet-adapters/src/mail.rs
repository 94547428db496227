//! Correo de notificación del resultado de la cadena principal.
use chrono::{DateTime, Utc};
use minijinja::context;
use serde::Serialize;
use sheet_core::WorkflowState;
use sheet_domain::{Column, Row};

use crate::templates::{self, NOTIFICATION};

pub const SUBJECT_PREFIX: &str = "[AutomationWorkflow]";

/// Lo que el correo necesita saber de la corrida.
#[derive(Debug, Clone)]
pub struct RunSummary<'a> {
    pub status: &'a str,
    pub error_message: &'a str,
    pub file_name: &'a str,
    pub sheet_name: &'a str,
    pub rows: &'a [Row],
}

#[derive(Serialize)]
struct FileLine<'a> {
    name: &'a str,
    ext: String,
    generation: &'a str,
    uploaded: bool,
    invalid_lines: Vec<&'a str>,
}

impl<'a> From<&'a Row> for FileLine<'a> {
    fn from(row: &'a Row) -> Self {
        Self { name: row.text(Column::FileName).unwrap_or("N/A"),
               ext: row.text(Column::OutputFormat).unwrap_or("N/A").to_lowercase(),
               generation: row.generation_status.map(|s| s.as_str()).unwrap_or("N/A"),
               uploaded: row.is_uploaded(),
               invalid_lines: row.invalid_message.lines().collect() }
    }
}

/// Devuelve `(asunto, cuerpo_html)`.
pub fn compose_notification(summary: &RunSummary<'_>, now: DateTime<Utc>) -> Result<(String, String), minijinja::Error> {
    let subject = format!("{SUBJECT_PREFIX} {} - {}", summary.status, now.format("%Y-%m-%d %H:%M:%S"));
    let files: Vec<FileLine<'_>> = summary.rows.iter().map(FileLine::from).collect();
    let body = templates::render(NOTIFICATION,
                                 context! {
                                     success => summary.status == WorkflowState::Success.as_str(),
                                     file_name => summary.file_name,
                                     sheet_name => summary.sheet_name,
                                     error_message => summary.error_message,
                                     total => summary.rows.len(),
                                     created => summary.rows.iter().filter(|r| r.is_generated()).count(),
                                     uploaded => summary.rows.iter().filter(|r| r.is_uploaded()).count(),
                                     files => files,
                                 })?;
    Ok((subject, body))
}
