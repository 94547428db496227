//! Implementación Postgres (Diesel) de `DocumentStore`.
//!
//! - Cada `StoredDocument` se guarda como JSONB en `file_metadata.document`;
//!   `created_date` y `generation_status` se duplican en columnas propias
//!   para filtrar y ordenar en SQL.
//! - El id lo asigna la base (`gen_random_uuid()`) y se devuelve con
//!   `RETURNING`.
//! - Paridad con `InMemoryDocumentStore`: mismo filtro, mismo orden
//!   (ascendente por `created_date`).
//! - Sin reintentos: cualquier error se propaga y el step falla.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use log::{debug, error, warn};
use serde_json::Value;
use uuid::Uuid;

use sheet_domain::{CollaboratorError, DocumentFilter, DocumentStore, StoredDocument};

use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;
use crate::schema::file_metadata;

/// Alias de tipo para el pool r2d2 de conexiones Postgres.
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Proveedor abstracto de conexiones.
///
/// Permite inyectar un pool real o cualquier otra fuente en tests sin acoplar
/// el store a r2d2.
pub trait ConnectionProvider: Send + Sync + 'static {
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError>;
}

/// Implementación concreta de `ConnectionProvider` respaldada por un `PgPool`.
pub struct PoolProvider {
    pub pool: PgPool,
}
impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::TransientIo(format!("pool error: {e}")))
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = file_metadata)]
pub struct NewDocumentRow<'a> {
    pub created_date: DateTime<Utc>,
    pub generation_status: Option<&'a str>,
    pub document: &'a Value,
}

/// Fila mapeada de `file_metadata` para lecturas.
#[derive(Queryable, Debug)]
pub struct DocumentRow {
    pub id: Uuid,
    pub created_date: DateTime<Utc>,
    pub generation_status: Option<String>,
    pub document: Value,
}

impl DocumentRow {
    /// Reconstruye el documento; id y fecha salen de las columnas, que son
    /// la fuente de verdad.
    fn into_document(self) -> Result<StoredDocument, PersistenceError> {
        let mut doc: StoredDocument = serde_json::from_value(self.document)?;
        doc.id = Some(self.id.to_string());
        doc.created_date = self.created_date;
        Ok(doc)
    }
}

/// Todo o nada: un documento ilegible corta la lectura con su id, para que
/// el reporte no cuente de menos.
fn decode_documents(rows: Vec<DocumentRow>) -> Result<Vec<StoredDocument>, PersistenceError> {
    rows.into_iter()
        .map(|row| {
            let id = row.id;
            row.into_document().inspect_err(|e| error!("find_all: undecodable document id={id} err={e}"))
        })
        .collect()
}

pub struct PgDocumentStore<P: ConnectionProvider> {
    pub provider: P,
}

impl<P: ConnectionProvider> PgDocumentStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn insert_document(&self, document: &StoredDocument) -> Result<Uuid, PersistenceError> {
        let mut payload = serde_json::to_value(document)?;
        if let Value::Object(map) = &mut payload {
            map.remove("id");
        }
        let status = document.generation_status.map(|s| s.as_str());
        let mut conn = self.provider.connection()?;
        let id: Uuid = diesel::insert_into(file_metadata::table).values(NewDocumentRow { created_date: document.created_date,
                                                                                        generation_status: status,
                                                                                        document: &payload })
                                                                .returning(file_metadata::id)
                                                                .get_result(&mut conn)?;
        debug!("insert:done id={id} status={status:?}");
        Ok(id)
    }

    pub fn load_documents(&self, filter: &DocumentFilter) -> Result<Vec<StoredDocument>, PersistenceError> {
        let mut conn = self.provider.connection()?;
        let mut query = file_metadata::table.into_boxed();
        if let Some(status) = filter.generation_status {
            query = query.filter(file_metadata::generation_status.eq(status.as_str()));
        }
        if let Some(from) = filter.created_from {
            query = query.filter(file_metadata::created_date.ge(from));
        }
        if let Some(to) = filter.created_to {
            query = query.filter(file_metadata::created_date.lt(to));
        }
        let rows: Vec<DocumentRow> = query.order(file_metadata::created_date.asc()).load(&mut conn)?;
        let docs = decode_documents(rows)?;
        debug!("find_all:done rows={}", docs.len());
        Ok(docs)
    }
}

impl<P: ConnectionProvider> DocumentStore for PgDocumentStore<P> {
    fn insert(&mut self, document: &StoredDocument) -> Result<Option<String>, CollaboratorError> {
        self.insert_document(document).map(|id| Some(id.to_string())).map_err(|e| {
                                                                           error!("insert:error err={e}");
                                                                           CollaboratorError::from(e)
                                                                       })
    }

    fn find_all(&self, filter: &DocumentFilter) -> Result<Vec<StoredDocument>, CollaboratorError> {
        self.load_documents(filter).map_err(|e| {
                                       error!("find_all:error err={e}");
                                       CollaboratorError::from(e)
                                   })
    }
}

/// Construye un pool Postgres r2d2 a partir de URL y corre las migraciones
/// pendientes una vez.
pub fn build_pool(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    let validated_min = min_size.max(1);
    let validated_max = max_size.max(1);
    if validated_min > validated_max {
        warn!("min_size > max_size ({validated_min} > {validated_max}), ajustando min=max");
    }
    let final_min = validated_min.min(validated_max);
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().min_idle(Some(final_min))
                                    .max_size(validated_max)
                                    .build(manager)
                                    .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))?;
    {
        let mut conn = pool.get()
                           .map_err(|e| PersistenceError::TransientIo(format!("pool get for migrations: {e}")))?;
        run_pending_migrations(&mut conn)?;
    }
    Ok(pool)
}

/// Carga `.env`, lee configuración y construye un pool ya migrado.
pub fn build_pool_from_env() -> Result<PgPool, PersistenceError> {
    let cfg = crate::config::DbConfig::from_env()?;
    build_pool(&cfg.url, cfg.min_connections, cfg.max_connections)
}
