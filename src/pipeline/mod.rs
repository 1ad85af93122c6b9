//! Document generation pipeline orchestration.
//!
//! - [`PipelineBuilder`]: wires loaders, styles, images, engine and storage from a config
//! - [`DocumentPipeline`]: validates a [`GenerationRequest`], assembles and emits it
//! - [`DocumentAssembler`]: load, substitute, resolve images, compose styles, fill defaults
//! - [`EmissionAdapter`]: drives the layout engine and stores the artifact
//!
//! # Example
//!
//! ```ignore
//! use folio::{FolioConfig, GenerationRequest, PipelineBuilder};
//!
//! let pipeline = PipelineBuilder::from_config(FolioConfig::load()?).build()?;
//! let request = GenerationRequest::for_template("invoice", payload)?;
//! let artifact = pipeline.generate(request).await?;
//! println!("{}", artifact.path.display());
//! ```

mod assembler;
mod builder;
pub mod defaults;
mod emitter;
mod orchestrator;
mod request;

pub use assembler::{AssemblyStage, DocumentAssembler};
pub use builder::PipelineBuilder;
pub use defaults::{Branding, DocumentDefaults};
pub use emitter::EmissionAdapter;
pub use orchestrator::DocumentPipeline;
pub use request::{ArtifactSummary, GeneratedArtifact, GenerationRequest};
