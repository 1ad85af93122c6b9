//! Filesystem-backed asset provider.
//!
//! Relative paths are resolved below the asset root and may not climb out of it.

use folio_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonical form of `base_path`, when it exists at construction time.
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base_path = base_path.as_ref().to_path_buf();
        let canonical_base = base_path.canonicalize().ok();
        Self {
            base_path,
            canonical_base,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Maps `path` to a file below the root, refusing absolute paths and traversal.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, ResourceError> {
        let relative = Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(ResourceError::OutsideRoot(path.to_string()));
        }

        let full_path = self.base_path.join(relative);
        // Symlinks can still point elsewhere.
        if let (Ok(canonical), Some(base)) = (full_path.canonicalize(), &self.canonical_base)
            && !canonical.starts_with(base)
        {
            return Err(ResourceError::OutsideRoot(path.to_string()));
        }
        Ok(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve(path)?;
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn base_path(&self) -> Option<&str> {
        self.base_path.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
