//! Constantes del motor core.
//!
//! Agrupa las claves de `Context` que escribe el propio engine (no un step)
//! y el prefijo de los mensajes de estado. Los steps que las leen deben
//! declararlas en `StepDefinition::requires` sólo si el engine garantiza su
//! presencia en ese punto.

/// Versión lógica del motor. Se adjunta a los eventos de inicio de cadena.
pub const ENGINE_VERSION: &str = "S1.0";

/// Clave donde el engine publica el estado final de la cadena principal.
pub const KEY_WORKFLOW_STATUS: &str = "workflow_status";

/// Clave donde el engine publica el último mensaje de error de la cadena
/// principal (vacío si terminó bien).
pub const KEY_ERROR_MESSAGE: &str = "error_message";

/// Prefijo del mensaje enviado al `StatusReporter` antes de cada step.
pub const STATUS_PREFIX: &str = "Running step: ";
