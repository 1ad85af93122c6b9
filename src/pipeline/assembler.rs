//! Turns a selector and payload into a fully resolved document.

use super::defaults::{Branding, DocumentDefaults, LOGO_IMAGE};
use crate::error::AssemblyError;
use chrono::Local;
use folio_json_template::{substitute, unresolved};
use folio_resource::ImageResolver;
use folio_style::{StylePack, StyleRegistry};
use folio_traits::{TemplateLoader, TemplateSelector, TemplateSource};
use folio_types::{AssembledDocument, DocumentDefinition, PageDecoration};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The steps of [`DocumentAssembler::assemble`], in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStage {
    Load,
    Materialize,
    ResolveImages,
    ComposeStyles,
    FillDefaults,
    Validate,
}

impl fmt::Display for AssemblyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssemblyStage::Load => "load",
            AssemblyStage::Materialize => "materialize",
            AssemblyStage::ResolveImages => "resolve-images",
            AssemblyStage::ComposeStyles => "compose-styles",
            AssemblyStage::FillDefaults => "fill-defaults",
            AssemblyStage::Validate => "validate",
        };
        f.write_str(name)
    }
}

impl AssemblyError {
    pub fn stage(&self) -> AssemblyStage {
        match self {
            AssemblyError::TemplateNotFound(_) | AssemblyError::Load(_) => AssemblyStage::Load,
            AssemblyError::InvalidDocumentDefinition { .. } => AssemblyStage::Validate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    loader: Arc<dyn TemplateLoader>,
    styles: Arc<StyleRegistry>,
    images: ImageResolver,
    defaults: DocumentDefaults,
    default_logo: Option<String>,
}

impl DocumentAssembler {
    pub fn new(
        loader: Arc<dyn TemplateLoader>,
        styles: Arc<StyleRegistry>,
        images: ImageResolver,
        defaults: DocumentDefaults,
    ) -> Self {
        Self {
            loader,
            styles,
            images,
            defaults,
            default_logo: None,
        }
    }

    /// Image reference used for branding, resolved once per request.
    pub fn with_default_logo(mut self, logo: Option<String>) -> Self {
        self.default_logo = logo;
        self
    }

    /// Loads the template for `selector` and resolves it against `payload`.
    ///
    /// Image failures never fail assembly: an image that cannot be resolved keeps its
    /// original reference.
    pub async fn assemble(
        &self,
        selector: &TemplateSelector,
        payload: &Value,
    ) -> Result<AssembledDocument, AssemblyError> {
        log::debug!("{}: {}", selector, AssemblyStage::Load);
        let loaded = self.loader.load(selector).await?;
        let pack = self.styles.pack_for(&loaded.name);

        log::debug!("{}: {} ('{}')", selector, AssemblyStage::Materialize, loaded.name);
        let mut definition = materialize(loaded.source, payload, &pack);

        log::debug!("{}: {}", selector, AssemblyStage::ResolveImages);
        self.resolve_images(&mut definition).await;

        log::debug!("{}: {}", selector, AssemblyStage::ComposeStyles);
        merge_styles(&mut definition, &pack);

        log::debug!("{}: {}", selector, AssemblyStage::FillDefaults);
        self.defaults
            .fill(&mut definition, &loaded.name, Local::now().fixed_offset());
        if self.needs_logo(&definition) || self.defaults.wants_decorations(&definition) {
            let logo = self.images.resolve(self.default_logo.as_deref()).await;
            if logo.is_none() && self.default_logo.is_some() {
                log::debug!("{}: default logo unavailable, using the company name", selector);
            }
            self.defaults
                .decorate(&mut definition, &Branding::new(logo, payload));
        }

        log::debug!("{}: {}", selector, AssemblyStage::Validate);
        AssembledDocument::try_from_definition(definition).map_err(|source| {
            AssemblyError::InvalidDocumentDefinition {
                template: loaded.name,
                source,
            }
        })
    }

    fn needs_logo(&self, definition: &DocumentDefinition) -> bool {
        self.default_logo.is_some()
            && definition
                .get("images")
                .and_then(|images| images.get(LOGO_IMAGE))
                .is_none_or(Value::is_null)
    }

    async fn resolve_images(&self, definition: &mut DocumentDefinition) {
        definition.root = self.images.resolve_images_in_tree(&definition.root).await;

        let dictionary = definition.get("images").and_then(Value::as_object).cloned();
        if let (Some(images), Some(root)) = (dictionary, definition.root.as_object_mut()) {
            let resolved = self.images.resolve_image_dictionary(&images).await;
            root.insert("images".to_string(), Value::Object(resolved));
        }

        for decoration in [&mut definition.header, &mut definition.footer]
            .into_iter()
            .flatten()
        {
            if let PageDecoration::Static(node) = decoration {
                *node = self.images.resolve_images_in_tree(node).await;
            }
        }
    }
}

/// Fills a stored template's placeholders. Built-in templates read the payload themselves,
/// so their output is taken as is and braces inside payload values stay literal text.
fn materialize(source: TemplateSource, payload: &Value, pack: &StylePack) -> DocumentDefinition {
    let mut definition = match source {
        TemplateSource::Builtin(template) => return template(payload, pack),
        TemplateSource::Stored(definition) => definition,
    };

    let missing = unresolved(&definition.root, payload);
    if !missing.is_empty() {
        log::debug!("Placeholders without payload values: {}", missing.join(", "));
    }
    definition.root = substitute(&definition.root, payload);
    for decoration in [&mut definition.header, &mut definition.footer]
        .into_iter()
        .flatten()
    {
        if let PageDecoration::Static(node) = decoration {
            *node = substitute(node, payload);
        }
    }
    definition
}

/// Puts the composed pack under the template's `styles`; the template's entries win.
fn merge_styles(definition: &mut DocumentDefinition, pack: &StylePack) {
    let Some(root) = definition.root.as_object_mut() else {
        return;
    };
    let mut styles = pack.to_value();
    if let Some(Value::Object(own)) = root.remove("styles") {
        styles.extend(own);
    }
    root.insert("styles".to_string(), Value::Object(styles));
}
