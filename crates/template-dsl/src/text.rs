use crate::node::{NodeBuilder, impl_node_attrs};
use serde_json::{Map, Value};

/// A paragraph: `{ "text": ... }`.
#[derive(Debug, Clone)]
pub struct Text {
    content: Value,
    attrs: Map<String, Value>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Value::String(content.into()),
            attrs: Map::new(),
        }
    }

    /// Inline runs, each a string or a styled text node.
    pub fn runs<I, B>(runs: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: NodeBuilder,
    {
        Self {
            content: Value::Array(runs.into_iter().map(NodeBuilder::build).collect()),
            attrs: Map::new(),
        }
    }

    /// An empty paragraph, used as a spacer or a blank table cell.
    pub fn empty() -> Self {
        Self::new("")
    }
}

impl_node_attrs!(Text);

impl NodeBuilder for Text {
    fn build(self) -> Value {
        let mut node = Map::new();
        node.insert("text".into(), self.content);
        node.extend(self.attrs);
        Value::Object(node)
    }
}
