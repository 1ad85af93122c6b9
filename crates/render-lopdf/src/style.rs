use crate::fonts::{Family, FontBook, FontKey};
use folio_style::{Style, TextAlign};
use folio_types::Color;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Node attributes that take part in style resolution.
const STYLE_KEYS: [&str; 10] = [
    "font",
    "fontSize",
    "bold",
    "italics",
    "color",
    "fillColor",
    "margin",
    "alignment",
    "lineHeight",
    "decoration",
];

/// Inherited text attributes in effect for a node.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: Family,
    pub size: f32,
    pub bold: bool,
    pub italics: bool,
    pub color: Color,
    pub alignment: TextAlign,
    pub line_height: f32,
    pub underline: bool,
}

impl TextStyle {
    pub fn new(family: Family) -> Self {
        Self {
            family,
            size: 12.0,
            bold: false,
            italics: false,
            color: Color::BLACK,
            alignment: TextAlign::Left,
            line_height: 1.0,
            underline: false,
        }
    }

    pub fn font(&self) -> FontKey {
        FontKey::new(self.family.clone(), self.bold, self.italics)
    }

    pub fn width_of(&self, text: &str) -> f32 {
        self.font().text_width(text, self.size)
    }

    fn apply(&mut self, style: &Style, fonts: &FontBook) {
        if let Some(font) = &style.font {
            self.family = fonts.resolve(font, fonts.fallback());
        }
        if let Some(size) = style.font_size.filter(|s| *s > 0.0) {
            self.size = size;
        }
        if let Some(bold) = style.bold {
            self.bold = bold;
        }
        if let Some(italics) = style.italics {
            self.italics = italics;
        }
        if let Some(color) = style.color.as_deref().and_then(|c| Color::parse(c).ok()) {
            self.color = color;
        }
        if let Some(alignment) = style.alignment {
            self.alignment = alignment;
        }
        if let Some(line_height) = style.line_height.filter(|l| *l > 0.0) {
            self.line_height = line_height;
        }
        if let Some(decoration) = style.extra.get("decoration").and_then(Value::as_str) {
            self.underline = decoration == "underline";
        }
    }
}

/// Everything resolved for one node: inherited text attributes plus its own box attributes.
#[derive(Debug, Clone)]
pub struct NodeStyle {
    pub text: TextStyle,
    /// `[left, top, right, bottom]`.
    pub margin: [f32; 4],
    pub fill: Option<Color>,
}

/// Resolves styles against a document's named styles.
///
/// Order: inherited attributes, then each named style in the order listed, then the node's
/// own attributes.
#[derive(Debug)]
pub struct StyleResolver {
    named: HashMap<String, Style>,
    fonts: FontBook,
}

impl StyleResolver {
    pub fn new(styles: Option<&Map<String, Value>>, fonts: FontBook) -> Self {
        let mut named = HashMap::new();
        for (name, value) in styles.into_iter().flatten() {
            match serde_json::from_value::<Style>(value.clone()) {
                Ok(style) => {
                    named.insert(name.clone(), style);
                }
                Err(e) => log::warn!("Ignoring malformed style '{}': {}", name, e),
            }
        }
        Self { named, fonts }
    }

    /// The document-wide base style.
    pub fn root(&self, default_style: Option<&Map<String, Value>>) -> TextStyle {
        let mut text = TextStyle::new(self.fonts.fallback().clone());
        if let Some(map) = default_style {
            text.apply(&inline_style(map), &self.fonts);
        }
        text
    }

    pub fn resolve(&self, node: &Map<String, Value>, parent: &TextStyle) -> NodeStyle {
        let mut text = parent.clone();
        let mut margin = None;
        let mut fill = None;

        for name in style_names(node.get("style")) {
            match self.named.get(name) {
                Some(style) => {
                    text.apply(style, &self.fonts);
                    margin = style.margin.map(|m| m.sides()).or(margin);
                    fill = merge_fill(fill, style.fill_color.as_ref());
                }
                None => log::debug!("Style '{}' is not defined", name),
            }
        }

        let own = inline_style(node);
        text.apply(&own, &self.fonts);
        margin = own.margin.map(|m| m.sides()).or(margin);
        fill = merge_fill(fill, own.fill_color.as_ref());

        NodeStyle {
            text,
            margin: margin.unwrap_or_default(),
            fill,
        }
    }
}

fn style_names(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::String(name)) => vec![name.as_str()],
        Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn merge_fill(current: Option<Color>, fill: Option<&Option<String>>) -> Option<Color> {
    match fill {
        None => current,
        Some(None) => None,
        Some(Some(color)) => Color::parse(color).ok().or(current),
    }
}

/// Reads the style attributes set directly on a node. Malformed attributes are dropped
/// one by one so a single bad value does not discard the rest.
fn inline_style(node: &Map<String, Value>) -> Style {
    let mut attrs = Map::new();
    for key in STYLE_KEYS {
        if let Some(value) = node.get(key) {
            attrs.insert(key.to_string(), value.clone());
        }
    }
    if attrs.is_empty() {
        return Style::default();
    }
    if let Ok(style) = serde_json::from_value(Value::Object(attrs.clone())) {
        return style;
    }
    let mut style = Style::default();
    for (key, value) in attrs {
        let single = Map::from_iter([(key.clone(), value)]);
        match serde_json::from_value::<Style>(Value::Object(single)) {
            Ok(parsed) => merge_into(&mut style, parsed),
            Err(e) => log::warn!("Ignoring malformed attribute '{}': {}", key, e),
        }
    }
    style
}

fn merge_into(target: &mut Style, source: Style) {
    target.font = source.font.or(target.font.take());
    target.font_size = source.font_size.or(target.font_size);
    target.bold = source.bold.or(target.bold);
    target.italics = source.italics.or(target.italics);
    target.color = source.color.or(target.color.take());
    target.fill_color = source.fill_color.or(target.fill_color.take());
    target.margin = source.margin.or(target.margin);
    target.alignment = source.alignment.or(target.alignment);
    target.line_height = source.line_height.or(target.line_height);
    target.extra.extend(source.extra);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> StyleResolver {
        let styles = json!({
            "header": { "fontSize": 18, "bold": true, "margin": [0, 0, 0, 10] },
            "muted": { "color": "#666666", "fontSize": 9 },
            "shaded": { "fillColor": "#eeeeee" }
        });
        StyleResolver::new(styles.as_object(), FontBook::default())
    }

    #[test]
    fn named_styles_apply_in_order_then_inline() {
        let r = resolver();
        let root = r.root(None);
        let node = json!({ "text": "x", "style": ["header", "muted"], "italics": true });
        let resolved = r.resolve(node.as_object().unwrap(), &root);
        assert_eq!(resolved.text.size, 9.0);
        assert!(resolved.text.bold);
        assert!(resolved.text.italics);
        assert_eq!(resolved.text.color, Color::gray(0x66));
        assert_eq!(resolved.margin, [0.0, 0.0, 0.0, 10.0]);
    }

    #[test]
    fn inline_margin_wins_and_null_fill_clears() {
        let r = resolver();
        let root = r.root(None);
        let node = json!({ "style": "shaded", "fillColor": null, "margin": 5 });
        let resolved = r.resolve(node.as_object().unwrap(), &root);
        assert_eq!(resolved.fill, None);
        assert_eq!(resolved.margin, [5.0; 4]);
    }

    #[test]
    fn margin_and_fill_are_not_inherited() {
        let r = resolver();
        let parent = r.resolve(
            json!({ "style": ["header", "shaded"] }).as_object().unwrap(),
            &r.root(None),
        );
        let child = r.resolve(json!({ "text": "y" }).as_object().unwrap(), &parent.text);
        assert_eq!(child.margin, [0.0; 4]);
        assert_eq!(child.fill, None);
        assert_eq!(child.text.size, 18.0);
    }

    #[test]
    fn default_style_and_bad_attributes() {
        let r = resolver();
        let root = r.root(json!({ "font": "Courier", "fontSize": 10 }).as_object());
        assert_eq!(root.family, Family::Courier);
        let node = json!({ "alignment": "middle", "bold": true });
        let resolved = r.resolve(node.as_object().unwrap(), &root);
        assert!(resolved.text.bold);
        assert_eq!(resolved.text.alignment, TextAlign::Left);
        assert_eq!(resolved.text.size, 10.0);
    }
}
