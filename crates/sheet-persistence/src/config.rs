//! Carga de configuración de conexión desde variables de entorno.
//! Usa convención `DATABASE_URL` y parámetros opcionales de pool.

use std::env;
use once_cell::sync::Lazy;
use dotenvy::dotenv;

use crate::error::PersistenceError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, PersistenceError> {
        Lazy::force(&DOTENV_LOADED);
        let url = env::var("DATABASE_URL").map_err(|_| PersistenceError::Config("DATABASE_URL no definido".into()))?;
        let min_connections = parse_or("DATABASE_MIN_CONNECTIONS", 1);
        let max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 4);
        Ok(Self { url, min_connections, max_connections })
    }

    /// `true` si hay una base configurada (en entorno o `.env`).
    pub fn is_configured() -> bool {
        Lazy::force(&DOTENV_LOADED);
        env::var("DATABASE_URL").is_ok()
    }
}

fn parse_or(key: &str, default: u32) -> u32 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() { Lazy::force(&DOTENV_LOADED); }
