use crate::node::{NodeBuilder, impl_node_attrs};
use serde_json::{Map, Value, json};

/// `{ "image": ... }`: a data URL, path, URL or a key of the document's `images`.
#[derive(Debug, Clone)]
pub struct Image {
    source: String,
    attrs: Map<String, Value>,
}

impl Image {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            attrs: Map::new(),
        }
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.attrs.insert("width".into(), width.into());
        self.attrs.insert("height".into(), height.into());
        self
    }

    /// Scales the image to fit inside the box, keeping its aspect ratio.
    pub fn fit(mut self, width: f32, height: f32) -> Self {
        self.attrs.insert("fit".into(), json!([width, height]));
        self
    }
}

impl_node_attrs!(Image);

impl NodeBuilder for Image {
    fn build(self) -> Value {
        let mut node = Map::new();
        node.insert("image".into(), Value::String(self.source));
        node.extend(self.attrs);
        Value::Object(node)
    }
}

/// Vector drawing: `{ "canvas": [ { "type": "line", ... } ] }`.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    shapes: Vec<Value>,
    attrs: Map<String, Value>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// A horizontal rule `length` points long.
    pub fn rule(length: f32, line_width: f32) -> Self {
        Self::new().line(0.0, 0.0, length, 0.0, line_width)
    }

    pub fn line(mut self, x1: f32, y1: f32, x2: f32, y2: f32, line_width: f32) -> Self {
        self.shapes.push(json!({
            "type": "line",
            "x1": x1, "y1": y1, "x2": x2, "y2": y2,
            "lineWidth": line_width
        }));
        self
    }

    /// Colors the most recently added shape.
    pub fn line_color(mut self, color: &str) -> Self {
        if let Some(Value::Object(shape)) = self.shapes.last_mut() {
            shape.insert("lineColor".into(), color.into());
        }
        self
    }
}

impl_node_attrs!(Canvas);

impl NodeBuilder for Canvas {
    fn build(self) -> Value {
        let mut node = Map::new();
        node.insert("canvas".into(), Value::Array(self.shapes));
        node.extend(self.attrs);
        Value::Object(node)
    }
}
