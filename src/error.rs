use crate::storage::StorageError;
use folio_render_core::RenderError;
use folio_traits::{LoadError, SelectorError};
use folio_types::DefinitionError;
use thiserror::Error;

/// How a failed request should be reported to whoever asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The selector does not resolve to a template.
    NotFound,
    /// The request itself is unusable.
    BadRequest,
    /// Something failed on our side.
    Internal,
}

/// Failures while turning a selector and payload into an [`AssembledDocument`].
///
/// [`AssembledDocument`]: folio_types::AssembledDocument
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("template not found for {0}")]
    TemplateNotFound(String),

    #[error("loading template failed: {0}")]
    Load(LoadError),

    #[error("template '{template}' produced an invalid document: {source}")]
    InvalidDocumentDefinition {
        template: String,
        #[source]
        source: DefinitionError,
    },
}

impl From<LoadError> for AssemblyError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound(selector) => AssemblyError::TemplateNotFound(selector),
            other => AssemblyError::Load(other),
        }
    }
}

/// Failures while rendering an assembled document and storing the result.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("rendering with engine '{engine}' failed: {source}")]
    Render {
        engine: &'static str,
        #[source]
        source: RenderError,
    },

    #[error("storing the rendered document failed: {0}")]
    Storage(#[from] StorageError),
}

/// A pipeline that could not be put together.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("failed to create the image HTTP client: {0}")]
    HttpClient(String),
}

/// A failed generation request.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("invalid template selector: {0}")]
    InvalidSelector(#[from] SelectorError),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("render failure: {0}")]
    RenderFailure(#[from] EmitError),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::InvalidSelector(_) | GenerationError::InvalidPayload(_) => {
                ErrorKind::BadRequest
            }
            GenerationError::Assembly(AssemblyError::TemplateNotFound(_)) => ErrorKind::NotFound,
            GenerationError::Assembly(_) | GenerationError::RenderFailure(_) => ErrorKind::Internal,
        }
    }

    /// A stable message that is safe to show callers. Internal details stay in the logs.
    pub fn caller_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotFound => "report not found",
            ErrorKind::BadRequest => "invalid input",
            ErrorKind::Internal => "Failed to generate PDF",
        }
    }

    pub fn is_template_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_caller_messages() {
        let not_found = GenerationError::from(AssemblyError::from(LoadError::NotFound("x".into())));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(not_found.caller_message(), "report not found");
        assert!(not_found.is_template_not_found());

        let bad = GenerationError::InvalidSelector(SelectorError::InvalidReportId("nope".into()));
        assert_eq!(bad.kind(), ErrorKind::BadRequest);
        assert_eq!(bad.caller_message(), "invalid input");

        let invalid = GenerationError::from(AssemblyError::InvalidDocumentDefinition {
            template: "invoice".into(),
            source: DefinitionError::MissingContent,
        });
        assert_eq!(invalid.kind(), ErrorKind::Internal);
        assert_eq!(invalid.caller_message(), "Failed to generate PDF");
    }

    #[test]
    fn malformed_templates_are_internal() {
        let err = AssemblyError::from(LoadError::Malformed {
            selector: "template 'a'".into(),
            message: "expected value".into(),
        });
        assert!(matches!(err, AssemblyError::Load(_)));
        assert_eq!(GenerationError::from(err).kind(), ErrorKind::Internal);
    }

    #[test]
    fn render_failures_keep_their_cause() {
        let err = GenerationError::from(EmitError::Render {
            engine: "lopdf",
            source: RenderError::ChannelClosed,
        });
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("closed"));
    }
}
