//! Wrapper para correr migraciones embebidas.
//!
//! Las migraciones viven en `migrations/` dentro de este crate y se ejecutan
//! una vez al construir el pool.

use crate::error::PersistenceError;
use log::warn;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::result::QueryResult;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn run_pending_migrations(conn: &mut PgConnection) -> Result<(), PersistenceError> {
    // gen_random_uuid() es nativo desde PG13; en versiones previas lo aporta pgcrypto
    extension_ready(conn.batch_execute("CREATE EXTENSION IF NOT EXISTS pgcrypto;"));
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|e| PersistenceError::Unknown(format!("migration error: {e}")))
}

/// Registra el fallo y sigue; la migración decide después.
fn extension_ready(result: QueryResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("migrations: no se pudo crear pgcrypto ({e}); gen_random_uuid() puede faltar");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::Error as DieselError;

    #[test]
    fn extension_failure_is_reported_not_propagated() {
        assert!(extension_ready(Ok(())));
        assert!(!extension_ready(Err(DieselError::BrokenTransactionManager)));
    }
}
