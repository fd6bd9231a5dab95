//! Local-disk implementation of [`FileStoreTrait`].

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use log::{debug, error};
use tokio::fs;

use super::files_traits::FileStoreTrait;
use crate::errors::{Error, Result};

/// Stores files below a root directory. References are paths relative to the root.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a reference to an absolute path, refusing anything that could
    /// escape the root directory.
    fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let relative = Path::new(reference);
        let is_plain = !reference.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(Error::FileStore(format!(
                "Invalid file reference '{}'",
                reference
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStoreTrait for LocalFileStore {
    async fn store(&self, bytes: Vec<u8>, proposed_path: &str) -> Result<String> {
        let path = self.resolve(proposed_path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create upload directory {}: {}", parent.display(), e);
                Error::FileStore(e.to_string())
            })?;
        }
        fs::write(&path, bytes).await.map_err(|e| {
            error!("Failed to write file {}: {}", path.display(), e);
            Error::FileStore(e.to_string())
        })?;
        debug!("Stored file {}", path.display());
        Ok(proposed_path.to_string())
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        let path = self.resolve(reference)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("File {} already gone", path.display());
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete file {}: {}", path.display(), e);
                Err(Error::FileStore(e.to_string()))
            }
        }
    }
}
