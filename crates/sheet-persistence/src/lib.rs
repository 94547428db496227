//! sheet-persistence
//!
//! Implementaciones de `DocumentStore` para los metadatos de cada fila
//! procesada.
//!
//! Módulos:
//! - `pg`: store Postgres (Diesel + r2d2) sobre la tabla `file_metadata`.
//! - `memory`: store en memoria con la misma semántica.
//! - `migrations`: runner embebido de migraciones Diesel.
//! - `config`: carga de configuración desde .env.
//! - `schema`: tablas Diesel declaradas para compilar queries.

pub mod config;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod pg;
pub mod schema;

pub use config::{init_dotenv, DbConfig};
pub use error::PersistenceError;
pub use memory::InMemoryDocumentStore;
pub use pg::{build_pool, build_pool_from_env, ConnectionProvider, PgDocumentStore, PgPool, PoolProvider};
