//! Named text and box styles, and the packs that group them.

use crate::error::StyleError;
use crate::text::TextAlign;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Margin shorthand: one value, `[horizontal, vertical]` or `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Spacing {
    Uniform(f32),
    Pair([f32; 2]),
    Sides([f32; 4]),
}

impl Spacing {
    /// Expands to `[left, top, right, bottom]`.
    pub fn sides(&self) -> [f32; 4] {
        match *self {
            Spacing::Uniform(v) => [v, v, v, v],
            Spacing::Pair([h, v]) => [h, v, h, v],
            Spacing::Sides(s) => s,
        }
    }
}

impl From<[f32; 4]> for Spacing {
    fn from(sides: [f32; 4]) -> Self {
        Spacing::Sides(sides)
    }
}

/// A flat set of rendering attributes. Unset attributes inherit from the surrounding style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `Some(None)` is an explicit `null` that clears an inherited fill.
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub fill_color: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    /// Attributes this crate does not model, passed through to the renderer untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(mut self, family: impl Into<String>) -> Self {
        self.font = Some(family.into());
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn italics(mut self) -> Self {
        self.italics = Some(true);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn fill_color(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(Some(color.into()));
        self
    }

    pub fn no_fill(mut self) -> Self {
        self.fill_color = Some(None);
        self
    }

    pub fn margin(mut self, margin: impl Into<Spacing>) -> Self {
        self.margin = Some(margin.into());
        self
    }

    pub fn alignment(mut self, alignment: TextAlign) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// A named collection of styles, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StylePack {
    styles: BTreeMap<String, Style>,
}

impl StylePack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, style: Style) -> Self {
        self.styles.insert(name.into(), style);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, style: Style) -> Option<Style> {
        self.styles.insert(name.into(), style)
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn from_json(source: &str) -> Result<Self, StyleError> {
        serde_json::from_str(source).map_err(|e| StyleError::Parse(e.to_string()))
    }

    pub fn from_value(value: &Value) -> Result<Self, StyleError> {
        StylePack::deserialize(value).map_err(|e| StyleError::Parse(e.to_string()))
    }

    /// The pack as a `styles` dictionary for a document definition.
    pub fn to_value(&self) -> Map<String, Value> {
        self.styles
            .iter()
            .map(|(name, style)| (name.clone(), style.to_value()))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, Style)> for StylePack {
    fn from_iter<I: IntoIterator<Item = (S, Style)>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
