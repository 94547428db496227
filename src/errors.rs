use sheet_core::CoreEngineError;
use sheet_domain::CollaboratorError;
use sheet_persistence::PersistenceError;
use thiserror::Error;

/// Errores que pueden llegar al caller de la librería. Los fallos de un step
/// no aparecen aquí: quedan en el estado de la cadena y en su mensaje.
#[derive(Debug, Error)]
pub enum SheetflowError {
    #[error("Error de engine: {0}")]
    Engine(#[from] CoreEngineError),
    #[error("Error de colaborador: {0}")]
    Collaborator(#[from] CollaboratorError),
    #[error("Error de persistencia: {0}")]
    Persistence(#[from] PersistenceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::ChainKind;

    #[test]
    fn engine_variant_format() {
        let err: SheetflowError = CoreEngineError::ChainAlreadyStarted(ChainKind::Main).into();
        assert_eq!(err.to_string(), "Error de engine: chain 'main' already started; reset the workflow first");
    }

    #[test]
    fn collaborator_variant_from() {
        let err: SheetflowError = CollaboratorError::NotFound("june.json".into()).into();
        assert_eq!(err.to_string(), "Error de colaborador: not found: june.json");
    }

    #[test]
    fn persistence_variant_from() {
        let err: SheetflowError = PersistenceError::Config("DATABASE_URL no definido".into()).into();
        assert!(err.to_string().starts_with("Error de persistencia: "));
    }
}
