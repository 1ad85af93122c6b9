use crate::builders::*;
use folio_style::StylePack;
use serde_json::Value;

/// Key of the company logo in a document's `images` dictionary.
pub const COMPANY_LOGO: &str = "companyLogo";

/// Two-decimal amount, or an empty string when the value is missing.
pub fn amount(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// The field at `path`, or `fallback` when it is missing or empty.
pub fn field_or(payload: &Value, path: &str, fallback: &str) -> String {
    let value = folio_jpath::resolve_str(path, payload);
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// `preferred` when the pack defines it, otherwise `fallback`.
pub fn style_or<'a>(pack: &StylePack, preferred: &'a str, fallback: &'a str) -> &'a str {
    if pack.contains(preferred) {
        preferred
    } else {
        fallback
    }
}

/// Vertical white space.
pub fn spacer(height: f32) -> Text {
    Text::empty().margin([0.0, height / 2.0, 0.0, height / 2.0])
}

/// A small-print line such as `Phone: ...`.
pub fn labelled(label: &str, value: impl std::fmt::Display) -> String {
    format!("{}: {}", label, value)
}
