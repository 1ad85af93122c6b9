//! Template resolution and PDF assembly for organization reports.
//!
//! A request names a template (an organization's stored report, or a template by name)
//! and carries a JSON payload. The pipeline loads the template, splices payload values
//! into it, embeds images as `data:` URLs, composes style packs, fills document defaults,
//! renders the result to PDF and stores it:
//!
//! ```ignore
//! use folio::{FolioConfig, GenerationRequest, PipelineBuilder};
//!
//! let pipeline = PipelineBuilder::from_config(FolioConfig::load()?).build()?;
//! let artifact = pipeline
//!     .generate(GenerationRequest::for_report(org_id, report_id, payload)?)
//!     .await?;
//! ```
//!
//! The building blocks live in their own crates and are re-exported here.

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod storage;

pub use config::{ConfigError, FolioConfig};
pub use error::{AssemblyError, BuildError, EmitError, ErrorKind, GenerationError};
pub use loader::{BuiltinTemplateLoader, CompositeTemplateLoader, FilesystemTemplateLoader};
pub use pipeline::{
    ArtifactSummary, AssemblyStage, DocumentAssembler, DocumentPipeline, EmissionAdapter,
    GeneratedArtifact, GenerationRequest, PipelineBuilder,
};
pub use storage::{ArtifactStorage, FilesystemStorage, StorageError, StorageLocation};

pub use folio_render_core::{EngineConfig, LayoutEngine, RenderError, RenderEvent};
pub use folio_render_lopdf::LopdfLayoutEngine;
pub use folio_resource::{FilesystemResourceProvider, ImageResolver};
pub use folio_style::{StylePack, StyleRegistry};
pub use folio_template_dsl::TemplateRegistry;
pub use folio_traits::{LoadError, TemplateLoader, TemplateSelector};
pub use folio_types::{AssembledDocument, DocumentDefinition, PageDecoration};
