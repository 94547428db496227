//! Reglas de validación de filas.
//!
//! Cada columna reconocida debe estar presente (no vacía) y cumplir su
//! restricción de tipo o de enumeración. Se acumulan todas las violaciones
//! de la fila; la validación nunca corta el flujo.
use serde_json::Value;

use crate::columns::{Column, ColumnRule};
use crate::row::Row;

/// Devuelve las violaciones de una fila (vacío si es válida).
pub fn validate_row(row: &Row) -> Vec<String> {
    let mut errors = Vec::new();
    for column in Column::ALL {
        let value = match row.get(column) {
            Some(v) if !is_blank(v) => v,
            _ => {
                errors.push(format!("Missing value for '{column}'"));
                continue;
            }
        };
        let Some(text) = value.as_str() else {
            errors.push(format!("Invalid type for '{column}': expected string, got {}", type_name(value)));
            continue;
        };
        if let ColumnRule::OneOf(options) = column.rule() {
            if !column.rule().allows(text) {
                errors.push(format!("Invalid value for '{column}': expected one of [{}], got {text}",
                                    options.join(", ")));
            }
        }
    }
    errors
}

/// Anota `validation` e `invalid_message` en cada fila. Devuelve cuántas
/// filas resultaron válidas.
pub fn validate_rows(rows: &mut [Row]) -> usize {
    let mut valid = 0;
    for (idx, row) in rows.iter_mut().enumerate() {
        let errors = validate_row(row);
        if errors.is_empty() {
            row.validation = true;
            row.invalid_message.clear();
            valid += 1;
        } else {
            row.validation = false;
            row.invalid_message = format!("Row {idx} has errors:\n - {}", errors.join("\n - "));
        }
    }
    valid
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
