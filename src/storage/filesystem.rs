use super::{ArtifactStorage, StorageError, StorageLocation};
use async_trait::async_trait;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Keeps artifacts as `<root>/<location>/<id>.pdf`.
///
/// Each write goes to a hidden temporary file in the target directory that is renamed
/// into place once fully written and synced.
#[derive(Debug, Clone)]
pub struct FilesystemStorage {
    root: PathBuf,
}

impl FilesystemStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, location: &StorageLocation, id: Uuid) -> PathBuf {
        self.root
            .join(location.relative_dir())
            .join(format!("{}.pdf", id))
    }
}

#[async_trait]
impl ArtifactStorage for FilesystemStorage {
    async fn write(
        &self,
        location: &StorageLocation,
        id: Uuid,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let target = self.path_for(location, id);
        let bytes = bytes.to_vec();
        let path = tokio::task::spawn_blocking(move || {
            write_atomic(&target, &bytes)?;
            Ok::<_, StorageError>(target)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))??;
        log::debug!("Stored artifact {} at {}", id, path.display());
        Ok(path)
    }

    async fn read(&self, location: &StorageLocation, id: Uuid) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(location, id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::NotFound(path)),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    async fn exists(&self, location: &StorageLocation, id: Uuid) -> bool {
        tokio::fs::try_exists(self.path_for(location, id))
            .await
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemStorage"
    }
}

fn write_atomic(target: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|source| io_error(dir, source))?;
    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|source| io_error(target, source))?;
    // Dropping the temporary on failure removes it.
    temp.persist(target)
        .map_err(|e| io_error(target, e.error))?;
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}
