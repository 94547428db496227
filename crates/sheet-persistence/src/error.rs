//! Errores de persistencia.
//! Mapea errores de Diesel / conexión a variantes semánticas del dominio de persistencia.

use thiserror::Error;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use sheet_domain::CollaboratorError;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("unique violation: {0}")]
    UniqueViolation(String),
    #[error("check violation: {0}")]
    CheckViolation(String),
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("not found")]
    NotFound,
    #[error("transient IO / connection pool error: {0}")]
    TransientIo(String),
    #[error("document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("unknown database error: {0}")]
    Unknown(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(info.message().to_string()),
                DatabaseErrorKind::CheckViolation => Self::CheckViolation(info.message().to_string()),
                DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(info.message().to_string()),
                DatabaseErrorKind::ClosedConnection => Self::TransientIo(info.message().to_string()),
                other => Self::Unknown(format!("db error kind {:?}: {}", other, info.message())),
            },
            DieselError::DeserializationError(e) => Self::Unknown(format!("deser: {e}")),
            DieselError::SerializationError(e) => Self::Unknown(format!("ser: {e}")),
            DieselError::BrokenTransactionManager => Self::TransientIo("broken transaction manager".into()),
            DieselError::QueryBuilderError(e) => Self::Unknown(format!("query builder: {e}")),
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

/// Los steps sólo conocen `CollaboratorError`.
impl From<PersistenceError> for CollaboratorError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::TransientIo(msg) => CollaboratorError::Unavailable(msg),
            PersistenceError::NotFound => CollaboratorError::NotFound("document".into()),
            PersistenceError::Encoding(e) => CollaboratorError::Serialization(e),
            other => CollaboratorError::Rejected(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err: PersistenceError = DieselError::NotFound.into();
        assert!(matches!(err, PersistenceError::NotFound));
    }

    #[test]
    fn transient_errors_surface_as_unavailable() {
        let err: CollaboratorError = PersistenceError::TransientIo("pool timeout".into()).into();
        assert!(matches!(err, CollaboratorError::Unavailable(ref m) if m == "pool timeout"));
        let err: CollaboratorError = PersistenceError::CheckViolation("bad status".into()).into();
        assert_eq!(err.to_string(), "request rejected: check violation: bad status");
    }
}
