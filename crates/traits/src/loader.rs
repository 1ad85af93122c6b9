//! The template loading boundary.

use crate::selector::TemplateSelector;
use async_trait::async_trait;
use folio_style::StylePack;
use folio_types::DocumentDefinition;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::RwLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The selector does not resolve to any stored or registered template.
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("template {selector} is not valid JSON: {message}")]
    Malformed { selector: String, message: String },

    #[error("failed to read template {selector}: {message}")]
    Io { selector: String, message: String },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}

/// A built-in template: a pure function of the payload and its composed style pack.
pub type TemplateFn = fn(&Value, &StylePack) -> DocumentDefinition;

#[derive(Clone)]
pub enum TemplateSource {
    /// A definition tree read from a backing store, still carrying `{{...}}` markers.
    Stored(DocumentDefinition),
    Builtin(TemplateFn),
}

impl Debug for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Stored(def) => f.debug_tuple("Stored").field(def).finish(),
            TemplateSource::Builtin(_) => f.write_str("Builtin(..)"),
        }
    }
}

/// What a loader hands back: the template and the name its style pack is registered under.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub name: String,
    pub source: TemplateSource,
}

impl LoadedTemplate {
    pub fn stored(name: impl Into<String>, definition: DocumentDefinition) -> Self {
        Self {
            name: name.into(),
            source: TemplateSource::Stored(definition),
        }
    }

    pub fn builtin(name: impl Into<String>, template: TemplateFn) -> Self {
        Self {
            name: name.into(),
            source: TemplateSource::Builtin(template),
        }
    }
}

/// Fetches a template definition for a selector.
///
/// Templates are loaded fresh for every request; implementations should not cache
/// definitions across calls.
#[async_trait]
pub trait TemplateLoader: Send + Sync + Debug {
    async fn load(&self, selector: &TemplateSelector) -> Result<LoadedTemplate, LoadError>;

    fn name(&self) -> &'static str;
}

/// Stored definitions held in memory.
#[derive(Debug, Default)]
pub struct InMemoryTemplateLoader {
    templates: RwLock<HashMap<TemplateSelector, (String, Value)>>,
}

impl InMemoryTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `tree` for `selector`, with its style pack registered as `style_name`.
    pub fn insert(&self, selector: TemplateSelector, style_name: impl Into<String>, tree: Value) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(selector, (style_name.into(), tree));
        }
    }
}

#[async_trait]
impl TemplateLoader for InMemoryTemplateLoader {
    async fn load(&self, selector: &TemplateSelector) -> Result<LoadedTemplate, LoadError> {
        let templates = self.templates.read().map_err(|_| LoadError::Io {
            selector: selector.to_string(),
            message: "template store lock poisoned".to_string(),
        })?;
        templates
            .get(selector)
            .map(|(name, tree)| LoadedTemplate::stored(name.clone(), DocumentDefinition::new(tree.clone())))
            .ok_or_else(|| LoadError::NotFound(selector.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryTemplateLoader"
    }
}
