//! Directorio scratch para artifacts generados.
//!
//! Es el único recurso con ciclo de vida explícito: `reset` borra todo su
//! contenido y lo vuelve a crear siempre, no sólo tras un error, de modo que
//! la siguiente corrida parte de un directorio vacío aunque una corrida
//! anterior haya dejado archivos parciales.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// No toca el disco; el directorio se crea en `ensure` o `reset`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Crea el directorio (y padres) si no existe.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    /// Borra el contenido completo y recrea el directorio vacío.
    pub fn reset(&self) -> io::Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        fs::create_dir_all(&self.root)
    }

    /// `true` si el directorio no existe o no tiene entradas.
    pub fn is_empty(&self) -> io::Result<bool> {
        if !self.root.exists() {
            return Ok(true);
        }
        Ok(fs::read_dir(&self.root)?.next().is_none())
    }

    /// Ruta de un archivo dentro del scratch.
    pub fn join(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.root.join(file_name)
    }
}
