//! Byte-level access to assets such as logos and item pictures.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource '{0}' is outside the asset root")]
    OutsideRoot(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

pub type SharedResourceData = Arc<Vec<u8>>;

/// Loads named assets. Implementations must be shareable across request tasks.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, path: &str) -> bool;

    /// Root that relative paths are resolved against, if the provider has one.
    fn base_path(&self) -> Option<&str> {
        None
    }

    fn name(&self) -> &'static str;
}

/// Assets held in memory, keyed by path. Mostly useful in tests.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path = path.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: path.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(path, Arc::new(data));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
