use std::fs;
use std::path::{Component, Path, PathBuf};

use log::info;
use uuid::Uuid;

use sheet_domain::{CollaboratorError, FileStore, UploadedFile};

/// "Drive" local: el locator de carpeta se interpreta como subcarpeta de
/// `root` y cada subida copia el archivo allí.
#[derive(Debug, Clone)]
pub struct LocalFolderStore {
    root: PathBuf,
}

impl LocalFolderStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sólo componentes normales: el locator no puede salir de `root`.
    fn folder(&self, locator: &str) -> Result<PathBuf, CollaboratorError> {
        let rel = Path::new(locator.trim().trim_start_matches('/'));
        if rel.as_os_str().is_empty() || rel.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(CollaboratorError::Rejected(format!("invalid folder locator '{locator}'")));
        }
        Ok(self.root.join(rel))
    }
}

impl FileStore for LocalFolderStore {
    fn upload(&mut self, local_path: &Path, folder_locator: &str) -> Result<UploadedFile, CollaboratorError> {
        let folder = self.folder(folder_locator)?;
        let name = local_path.file_name()
                             .and_then(|n| n.to_str())
                             .ok_or_else(|| CollaboratorError::Rejected(format!("invalid file path {}", local_path.display())))?
                             .to_string();
        if !local_path.is_file() {
            return Err(CollaboratorError::NotFound(local_path.display().to_string()));
        }
        fs::create_dir_all(&folder)?;
        fs::copy(local_path, folder.join(&name))?;
        let id = Uuid::new_v4().to_string();
        info!("upload:done id={id} name={name} folder={}", folder.display());
        Ok(UploadedFile { id, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_file_into_folder() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("hero.json");
        fs::write(&src, "{}").unwrap();
        let mut store = LocalFolderStore::new(dir.path().join("drive"));
        let up = store.upload(&src, "campaign/may").unwrap();
        assert_eq!(up.name, "hero.json");
        assert!(dir.path().join("drive/campaign/may/hero.json").is_file());
    }

    #[test]
    fn rejects_escaping_locators() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.json");
        fs::write(&src, "{}").unwrap();
        let mut store = LocalFolderStore::new(dir.path().join("drive"));
        assert!(matches!(store.upload(&src, "../outside"), Err(CollaboratorError::Rejected(_))));
        assert!(matches!(store.upload(&src, ""), Err(CollaboratorError::Rejected(_))));
    }
}
