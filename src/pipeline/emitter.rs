use super::request::GeneratedArtifact;
use crate::error::EmitError;
use crate::storage::{ArtifactStorage, StorageLocation};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use folio_render_core::{LayoutEngine, collect};
use folio_types::AssembledDocument;
use std::sync::Arc;
use uuid::Uuid;

/// Drives a layout engine to completion and stores what it produced.
#[derive(Debug, Clone)]
pub struct EmissionAdapter {
    engine: Arc<dyn LayoutEngine>,
    storage: Arc<dyn ArtifactStorage>,
}

impl EmissionAdapter {
    pub fn new(engine: Arc<dyn LayoutEngine>, storage: Arc<dyn ArtifactStorage>) -> Self {
        Self { engine, storage }
    }

    pub fn storage(&self) -> &Arc<dyn ArtifactStorage> {
        &self.storage
    }

    /// Renders `document` under a fresh id and writes it to `location`.
    ///
    /// Nothing is stored unless the engine reports a complete document.
    pub async fn emit(
        &self,
        document: AssembledDocument,
        location: &StorageLocation,
    ) -> Result<GeneratedArtifact, EmitError> {
        let id = Uuid::new_v4();
        let bytes = collect(self.engine.render(document))
            .await
            .map_err(|source| EmitError::Render {
                engine: self.engine.name(),
                source,
            })?;
        log::debug!("Engine '{}' produced {} bytes for {}", self.engine.name(), bytes.len(), id);

        let base64 = STANDARD.encode(&bytes);
        let path = self.storage.write(location, id, &bytes).await?;
        Ok(GeneratedArtifact {
            id,
            bytes,
            base64,
            path,
        })
    }
}
