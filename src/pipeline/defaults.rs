//! Document-level defaults and the shared page header and footer.

use crate::config::DocumentConfig;
use chrono::{DateTime, FixedOffset};
use folio_types::{DocumentDefinition, PageDecoration};
use serde_json::{Map, Value, json};

/// Name under which the branding logo is added to a document's `images`.
pub const LOGO_IMAGE: &str = "companyLogo";

const COMPANY_NAME_PATHS: [&str; 3] = ["companyInfo.name", "company.name", "companyName"];
const SIGNATURE_LINE: &str = "Authorized Signature: _________________";

/// Per-request branding for the shared decorations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branding {
    /// Logo as a `data:` URL.
    pub logo: Option<String>,
    pub company_name: String,
}

impl Branding {
    pub fn new(logo: Option<String>, payload: &Value) -> Self {
        Self {
            logo,
            company_name: company_name(payload),
        }
    }
}

/// The first non-empty company name the payload carries.
pub fn company_name(payload: &Value) -> String {
    COMPANY_NAME_PATHS
        .iter()
        .map(|path| folio_jpath::resolve_str(path, payload))
        .find(|name| !name.trim().is_empty())
        .unwrap_or_default()
}

/// Fills document-level keys a template left out. Present values are never replaced.
#[derive(Debug, Clone, Default)]
pub struct DocumentDefaults {
    config: DocumentConfig,
}

impl DocumentDefaults {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Whether `definition` will get the shared header or footer.
    pub fn wants_decorations(&self, definition: &DocumentDefinition) -> bool {
        self.config.page_decorations && (!definition.has_header() || !definition.has_footer())
    }

    pub fn fill(&self, definition: &mut DocumentDefinition, template_name: &str, created: DateTime<FixedOffset>) {
        let Some(root) = definition.root.as_object_mut() else {
            return;
        };
        fill_absent(root, "pageSize", || json!(self.config.page_size));
        fill_absent(root, "pageMargins", || json!(self.config.page_margins));

        fill_absent(root, "defaultStyle", || Value::Object(Map::new()));
        if let Some(Value::Object(style)) = root.get_mut("defaultStyle") {
            fill_absent(style, "font", || json!(self.config.font));
        }

        fill_absent(root, "info", || Value::Object(Map::new()));
        if let Some(Value::Object(info)) = root.get_mut("info") {
            fill_absent(info, "title", || json!(template_name));
            fill_absent(info, "author", || json!(self.config.author));
            fill_absent(info, "subject", || json!(template_name));
            fill_absent(info, "keywords", || json!(""));
            fill_absent(info, "creationDate", || json!(created.to_rfc3339()));
        }
    }

    /// Adds the shared header and footer where the template has none, and the logo image.
    pub fn decorate(&self, definition: &mut DocumentDefinition, branding: &Branding) {
        if let (Some(logo), Some(root)) = (&branding.logo, definition.root.as_object_mut()) {
            fill_absent(root, "images", || Value::Object(Map::new()));
            if let Some(Value::Object(images)) = root.get_mut("images") {
                fill_absent(images, LOGO_IMAGE, || json!(logo));
            }
        }
        if !self.config.page_decorations {
            return;
        }
        if !definition.has_header() {
            definition.header = Some(default_header(branding));
        }
        if !definition.has_footer() {
            definition.footer = Some(default_footer());
        }
    }
}

fn fill_absent(map: &mut Map<String, Value>, key: &str, value: impl FnOnce() -> Value) {
    if map.get(key).is_none_or(Value::is_null) {
        map.insert(key.to_string(), value());
    }
}

/// Logo (or the company name) on the left, the running page number on the right.
pub fn default_header(branding: &Branding) -> PageDecoration {
    let left = match &branding.logo {
        Some(logo) => json!({ "image": logo, "width": 100, "margin": [40, 20, 0, 20] }),
        None => json!({ "text": branding.company_name, "bold": true, "margin": [40, 20, 0, 20] }),
    };
    PageDecoration::generated(move |ctx| {
        Some(json!({
            "columns": [
                left.clone(),
                {
                    "text": format!("Page {}", ctx.current_page),
                    "alignment": "right",
                    "margin": [0, 20, 40, 20]
                }
            ]
        }))
    })
}

/// Signature line on the left, "Page N of M" on the right.
pub fn default_footer() -> PageDecoration {
    PageDecoration::generated(|ctx| {
        Some(json!({
            "columns": [
                { "text": SIGNATURE_LINE, "alignment": "left", "margin": [40, 20] },
                {
                    "text": format!("Page {} of {}", ctx.current_page, ctx.page_count),
                    "alignment": "right",
                    "margin": [0, 20, 40, 20]
                }
            ]
        }))
    })
}
