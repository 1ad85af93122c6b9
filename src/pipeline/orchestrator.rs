use super::assembler::{AssemblyStage, DocumentAssembler};
use super::emitter::EmissionAdapter;
use super::request::{GeneratedArtifact, GenerationRequest};
use crate::error::{ErrorKind, GenerationError};
use crate::storage::StorageLocation;
use std::time::Instant;

/// Runs generation requests end to end: validate, assemble, render, store.
///
/// Holds no per-request state, so one pipeline can serve any number of concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct DocumentPipeline {
    assembler: DocumentAssembler,
    emitter: EmissionAdapter,
}

impl DocumentPipeline {
    pub fn new(assembler: DocumentAssembler, emitter: EmissionAdapter) -> Self {
        Self { assembler, emitter }
    }

    pub fn assembler(&self) -> &DocumentAssembler {
        &self.assembler
    }

    pub fn emitter(&self) -> &EmissionAdapter {
        &self.emitter
    }

    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let started = Instant::now();
        let selector = request.selector.clone();
        let result = self.run(request).await;
        match &result {
            Ok(artifact) => log::info!(
                "Generated {} for {} in {:.2?} ({} bytes)",
                artifact.id,
                selector,
                started.elapsed(),
                artifact.bytes.len()
            ),
            Err(e) => {
                let stage = match e {
                    GenerationError::Assembly(err) => err.stage().to_string(),
                    GenerationError::RenderFailure(_) => "emit".to_string(),
                    _ => "validate-request".to_string(),
                };
                match e.kind() {
                    ErrorKind::Internal => {
                        log::error!("Generation for {} failed at {}: {}", selector, stage, e)
                    }
                    ErrorKind::NotFound | ErrorKind::BadRequest => {
                        log::debug!("Rejected request for {} at {}: {}", selector, stage, e)
                    }
                }
            }
        }
        result
    }

    async fn run(&self, request: GenerationRequest) -> Result<GeneratedArtifact, GenerationError> {
        let GenerationRequest { selector, payload } = request;
        if !payload.is_object() {
            return Err(GenerationError::InvalidPayload(format!(
                "payload must be an object, found {}",
                json_type(&payload)
            )));
        }

        let document = self.assembler.assemble(&selector, &payload).await?;
        log::debug!("{}: {} complete, rendering", selector, AssemblyStage::Validate);
        let location = StorageLocation::from(&selector);
        Ok(self.emitter.emit(document, &location).await?)
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
