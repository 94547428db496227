//! Campos de configuración reconocidos y claves documentadas del contexto.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheet_core::Context;

pub const KEY_SHEETS_URL: &str = "google_sheets_url";
pub const KEY_DRIVE_FOLDER_URL: &str = "google_drive_folder_url";
pub const KEY_SEND_NOTIFICATIONS: &str = "send_email_notifications";
pub const KEY_EMAIL_ADDRESS: &str = "email_address";
pub const KEY_DAILY_REPORT: &str = "generate_daily_report";

pub const KEY_DATA: &str = "data";
pub const KEY_FILE_NAME: &str = "file_name";
pub const KEY_SHEET_NAME: &str = "sheet_name";

/// Entradas del caller ya normalizadas: los campos ausentes quedan vacíos o
/// en `false` y cualquier campo no reconocido se ignora.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFields {
    pub google_sheets_url: String,
    pub google_drive_folder_url: String,
    pub send_email_notifications: bool,
    pub email_address: String,
    pub generate_daily_report: bool,
}

impl InputFields {
    /// Lectura tolerante de un objeto JSON (p.ej. el formulario de la UI).
    /// Los textos se recortan; los flags aceptan `true` o los strings
    /// `"true"`, `"on"`, `"yes"` y `"1"`.
    pub fn from_value(fields: &Value) -> Self {
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::trim).unwrap_or_default().to_string();
        let flag = |key: &str| match fields.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "on" | "yes" | "1"),
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        };
        Self { google_sheets_url: text(KEY_SHEETS_URL),
               google_drive_folder_url: text(KEY_DRIVE_FOLDER_URL),
               send_email_notifications: flag(KEY_SEND_NOTIFICATIONS),
               email_address: text(KEY_EMAIL_ADDRESS),
               generate_daily_report: flag(KEY_DAILY_REPORT) }
    }

    pub fn to_context(&self) -> Context {
        Context::new().with(KEY_SHEETS_URL, self.google_sheets_url.clone())
                      .with(KEY_DRIVE_FOLDER_URL, self.google_drive_folder_url.clone())
                      .with(KEY_SEND_NOTIFICATIONS, self.send_email_notifications)
                      .with(KEY_EMAIL_ADDRESS, self.email_address.clone())
                      .with(KEY_DAILY_REPORT, self.generate_daily_report)
    }
}
