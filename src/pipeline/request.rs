use crate::error::GenerationError;
use folio_traits::TemplateSelector;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use uuid::Uuid;

/// One document to generate.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub selector: TemplateSelector,
    pub payload: Value,
}

impl GenerationRequest {
    pub fn new(selector: TemplateSelector, payload: Value) -> Self {
        Self { selector, payload }
    }

    /// A request for an organization's stored report. Both ids must be UUIDs.
    pub fn for_report(
        organization_id: &str,
        report_id: &str,
        payload: Value,
    ) -> Result<Self, GenerationError> {
        let selector = TemplateSelector::organization_report(organization_id, report_id)?;
        Ok(Self::new(selector, payload))
    }

    pub fn for_template(name: &str, payload: Value) -> Result<Self, GenerationError> {
        Ok(Self::new(TemplateSelector::named(name)?, payload))
    }
}

/// A rendered and stored document.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub id: Uuid,
    pub bytes: Vec<u8>,
    pub base64: String,
    pub path: PathBuf,
}

impl GeneratedArtifact {
    pub fn summary(&self, include_base64: bool) -> ArtifactSummary {
        ArtifactSummary {
            status: "success",
            pdf_id: self.id,
            pdf_path: self.path.display().to_string(),
            base64: include_base64.then(|| self.base64.clone()),
        }
    }
}

/// What a caller gets back for a successful request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    pub status: &'static str,
    pub pdf_id: Uuid,
    pub pdf_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}
