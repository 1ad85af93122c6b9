//! Template loaders backed by the filesystem and the built-in registry.

use async_trait::async_trait;
use folio_template_dsl::TemplateRegistry;
use folio_traits::{LoadError, LoadedTemplate, TemplateLoader, TemplateSelector};
use folio_types::DocumentDefinition;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Top-level key a stored template may use to name its style pack.
pub const STYLE_PACK_KEY: &str = "stylePack";

/// Reads JSON definitions laid out as `<root>/<orgId>/<reportId>.json` for organization
/// reports and `<root>/<name>.json` for named templates.
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    root: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, selector: &TemplateSelector) -> PathBuf {
        match selector {
            TemplateSelector::OrganizationReport {
                organization_id,
                report_id,
            } => self
                .root
                .join(organization_id.to_string())
                .join(format!("{}.json", report_id)),
            TemplateSelector::Named(name) => self.root.join(format!("{}.json", name)),
        }
    }
}

#[async_trait]
impl TemplateLoader for FilesystemTemplateLoader {
    async fn load(&self, selector: &TemplateSelector) -> Result<LoadedTemplate, LoadError> {
        let path = self.path_for(selector);
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadError::NotFound(selector.to_string()));
            }
            Err(e) => {
                return Err(LoadError::Io {
                    selector: selector.to_string(),
                    message: format!("{}: {}", path.display(), e),
                });
            }
        };
        let mut tree: Value = serde_json::from_str(&source).map_err(|e| LoadError::Malformed {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

        let style_pack = tree
            .as_object_mut()
            .and_then(|root| root.remove(STYLE_PACK_KEY))
            .and_then(|name| name.as_str().map(str::to_string));
        let name = style_pack.unwrap_or_else(|| selector.template_name());
        log::debug!("Loaded {} from {} (styles '{}')", selector, path.display(), name);
        Ok(LoadedTemplate::stored(name, DocumentDefinition::new(tree)))
    }

    fn name(&self) -> &'static str {
        "FilesystemTemplateLoader"
    }
}

/// Serves the built-in templates by name.
#[derive(Debug, Clone)]
pub struct BuiltinTemplateLoader {
    registry: TemplateRegistry,
}

impl BuiltinTemplateLoader {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }
}

impl Default for BuiltinTemplateLoader {
    fn default() -> Self {
        Self::new(TemplateRegistry::builtin())
    }
}

#[async_trait]
impl TemplateLoader for BuiltinTemplateLoader {
    async fn load(&self, selector: &TemplateSelector) -> Result<LoadedTemplate, LoadError> {
        match selector {
            TemplateSelector::Named(name) => self
                .registry
                .get(name)
                .map(|template| LoadedTemplate::builtin(name.clone(), template))
                .ok_or_else(|| LoadError::NotFound(selector.to_string())),
            TemplateSelector::OrganizationReport { .. } => {
                Err(LoadError::NotFound(selector.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "BuiltinTemplateLoader"
    }
}

/// Asks each loader in turn; the first answer other than "not found" wins.
#[derive(Debug, Clone, Default)]
pub struct CompositeTemplateLoader {
    loaders: Vec<Arc<dyn TemplateLoader>>,
}

impl CompositeTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, loader: Arc<dyn TemplateLoader>) -> Self {
        self.loaders.push(loader);
        self
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

#[async_trait]
impl TemplateLoader for CompositeTemplateLoader {
    async fn load(&self, selector: &TemplateSelector) -> Result<LoadedTemplate, LoadError> {
        for loader in &self.loaders {
            match loader.load(selector).await {
                Err(e) if e.is_not_found() => {
                    log::trace!("{} has no {}", loader.name(), selector);
                }
                result => return result,
            }
        }
        Err(LoadError::NotFound(selector.to_string()))
    }

    fn name(&self) -> &'static str {
        "CompositeTemplateLoader"
    }
}
