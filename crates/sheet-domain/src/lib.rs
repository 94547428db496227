// sheet-domain library entry point
pub mod collaborators;
pub mod columns;
pub mod digest;
pub mod error;
pub mod row;
pub mod storage;
pub mod validation;
pub use collaborators::{DeliveryReceipt, DocumentStore, FileStore, MailSender, SheetData, SpreadsheetSource, UploadedFile};
pub use columns::{Column, ColumnRule};
pub use digest::{group_by_date, last_days, DailyCounts};
pub use error::CollaboratorError;
pub use row::{GenerationStatus, Row};
pub use storage::{DocumentFilter, StoredDocument};
pub use validation::{validate_row, validate_rows};
