use super::assembler::DocumentAssembler;
use super::defaults::DocumentDefaults;
use super::emitter::EmissionAdapter;
use super::orchestrator::DocumentPipeline;
use crate::config::FolioConfig;
use crate::error::BuildError;
use crate::loader::{BuiltinTemplateLoader, CompositeTemplateLoader, FilesystemTemplateLoader};
use crate::storage::{ArtifactStorage, FilesystemStorage};
use folio_render_core::LayoutEngine;
use folio_render_lopdf::LopdfLayoutEngine;
use folio_resource::{FetchOptions, FilesystemResourceProvider, ImageResolver};
use folio_style::StyleRegistry;
use folio_traits::{ResourceProvider, TemplateLoader};
use std::sync::Arc;

/// A builder for creating a `DocumentPipeline`.
///
/// Every component defaults to the one described by the configuration; the `with_*`
/// methods replace individual components.
pub struct PipelineBuilder {
    config: FolioConfig,
    loader: Option<Arc<dyn TemplateLoader>>,
    styles: Option<StyleRegistry>,
    assets: Option<Arc<dyn ResourceProvider>>,
    engine: Option<Arc<dyn LayoutEngine>>,
    storage: Option<Arc<dyn ArtifactStorage>>,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::from_config(FolioConfig::default())
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_config(config: FolioConfig) -> Self {
        Self {
            config,
            loader: None,
            styles: None,
            assets: None,
            engine: None,
            storage: None,
        }
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Replaces the default loader: stored templates first, then the built-in ones.
    pub fn with_loader(mut self, loader: Arc<dyn TemplateLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_style_registry(mut self, styles: StyleRegistry) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Provider for relative image references, instead of the configured assets directory.
    pub fn with_assets(mut self, assets: Arc<dyn ResourceProvider>) -> Self {
        self.assets = Some(assets);
        self
    }

    pub fn with_engine(mut self, engine: Arc<dyn LayoutEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn ArtifactStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn build(self) -> Result<DocumentPipeline, BuildError> {
        let config = self.config;

        let loader = self.loader.unwrap_or_else(|| {
            Arc::new(
                CompositeTemplateLoader::new()
                    .with(Arc::new(FilesystemTemplateLoader::new(&config.templates.dir)))
                    .with(Arc::new(BuiltinTemplateLoader::default())),
            )
        });
        let assets = self
            .assets
            .unwrap_or_else(|| Arc::new(FilesystemResourceProvider::new(&config.assets.dir)));
        let fetch = FetchOptions {
            timeout: config.http.timeout(),
            user_agent: config.http.user_agent.clone(),
        };
        let images =
            ImageResolver::new(assets, &fetch).map_err(|e| BuildError::HttpClient(e.to_string()))?;
        let styles = Arc::new(self.styles.unwrap_or_else(StyleRegistry::builtin));

        let engine = self
            .engine
            .unwrap_or_else(|| Arc::new(LopdfLayoutEngine::new(config.engine.clone())));
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(FilesystemStorage::new(&config.storage.dir)));

        log::debug!(
            "Pipeline: loader {}, engine {}, storage {}",
            loader.name(),
            engine.name(),
            storage.name()
        );
        let assembler =
            DocumentAssembler::new(loader, styles, images, DocumentDefaults::new(config.document))
                .with_default_logo(config.assets.default_logo);
        Ok(DocumentPipeline::new(
            assembler,
            EmissionAdapter::new(engine, storage),
        ))
    }
}
