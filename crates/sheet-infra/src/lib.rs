//! sheet-infra: colaboradores locales sobre el sistema de archivos.
//!
//! Permiten correr el pipeline completo sin credenciales de nube:
//! - `JsonSheetSource`: planilla exportada como JSON.
//! - `LocalFolderStore`: carpeta local como "drive" de destino.
//! - `OutboxMailer`: cada correo queda como archivo `.html` en un outbox.

pub mod drive;
pub mod mailer;
pub mod sheet;

pub use drive::LocalFolderStore;
pub use mailer::OutboxMailer;
pub use sheet::JsonSheetSource;
