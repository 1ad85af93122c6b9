use serde_json::{Map, Value};

/// Anything that can become a document node.
pub trait NodeBuilder {
    fn build(self) -> Value;
}

impl NodeBuilder for Value {
    fn build(self) -> Value {
        self
    }
}

impl NodeBuilder for &str {
    fn build(self) -> Value {
        Value::String(self.to_string())
    }
}

impl NodeBuilder for String {
    fn build(self) -> Value {
        Value::String(self)
    }
}

/// A column or table column width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Width {
    /// Share of the remaining space.
    Star,
    /// As wide as the content needs.
    Auto,
    Points(f32),
    Percent(f32),
}

impl From<Width> for Value {
    fn from(width: Width) -> Self {
        match width {
            Width::Star => Value::from("*"),
            Width::Auto => Value::from("auto"),
            Width::Points(p) => Value::from(p),
            Width::Percent(p) => Value::from(format!("{}%", p)),
        }
    }
}

pub(crate) fn append_style(attrs: &mut Map<String, Value>, name: &str) {
    let name = Value::from(name);
    match attrs.remove("style") {
        None => {
            attrs.insert("style".into(), name);
        }
        Some(Value::Array(mut names)) => {
            names.push(name);
            attrs.insert("style".into(), Value::Array(names));
        }
        Some(existing) => {
            attrs.insert("style".into(), Value::Array(vec![existing, name]));
        }
    }
}

/// Attribute setters shared by every builder with an `attrs` map.
macro_rules! impl_node_attrs {
    ($t:ty) => {
        impl $t {
            /// Adds a named style. Calling it twice yields a style list.
            pub fn style(mut self, name: &str) -> Self {
                $crate::node::append_style(&mut self.attrs, name);
                self
            }

            pub fn margin(mut self, margin: [f32; 4]) -> Self {
                self.attrs.insert("margin".into(), serde_json::json!(margin));
                self
            }

            pub fn alignment(mut self, alignment: folio_style::TextAlign) -> Self {
                self.attrs.insert(
                    "alignment".into(),
                    serde_json::to_value(alignment).unwrap_or_default(),
                );
                self
            }

            pub fn font_size(mut self, size: f32) -> Self {
                self.attrs.insert("fontSize".into(), size.into());
                self
            }

            pub fn bold(mut self) -> Self {
                self.attrs.insert("bold".into(), true.into());
                self
            }

            pub fn italics(mut self) -> Self {
                self.attrs.insert("italics".into(), true.into());
                self
            }

            pub fn color(mut self, color: &str) -> Self {
                self.attrs.insert("color".into(), color.into());
                self
            }

            pub fn fill_color(mut self, color: &str) -> Self {
                self.attrs.insert("fillColor".into(), color.into());
                self
            }

            pub fn width(mut self, width: $crate::node::Width) -> Self {
                self.attrs.insert("width".into(), width.into());
                self
            }

            /// Table cell span.
            pub fn col_span(mut self, span: usize) -> Self {
                self.attrs.insert("colSpan".into(), span.into());
                self
            }

            /// Table cell borders, `[left, top, right, bottom]`.
            pub fn border(mut self, border: [bool; 4]) -> Self {
                self.attrs.insert("border".into(), serde_json::json!(border));
                self
            }

            pub fn page_break_before(mut self) -> Self {
                self.attrs.insert("pageBreak".into(), "before".into());
                self
            }

            /// Escape hatch for attributes without a dedicated setter.
            pub fn attr(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
                self.attrs.insert(key.into(), value.into());
                self
            }
        }
    };
}

pub(crate) use impl_node_attrs;
