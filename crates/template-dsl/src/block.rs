use crate::node::{NodeBuilder, impl_node_attrs};
use serde_json::{Map, Value};

/// Children laid out top to bottom.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    children: Vec<Value>,
    attrs: Map<String, Value>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: impl NodeBuilder) -> Self {
        self.children.push(child.build());
        self
    }

    pub fn children<I, B>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: NodeBuilder,
    {
        self.children.extend(children.into_iter().map(NodeBuilder::build));
        self
    }
}

impl_node_attrs!(Stack);

impl NodeBuilder for Stack {
    fn build(self) -> Value {
        let mut node = Map::new();
        node.insert("stack".into(), Value::Array(self.children));
        node.extend(self.attrs);
        Value::Object(node)
    }
}

/// Children laid out side by side. Each child may carry its own `width`.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    columns: Vec<Value>,
    attrs: Map<String, Value>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: impl NodeBuilder) -> Self {
        self.columns.push(column.build());
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.attrs.insert("columnGap".into(), gap.into());
        self
    }
}

impl_node_attrs!(Columns);

impl NodeBuilder for Columns {
    fn build(self) -> Value {
        let mut node = Map::new();
        node.insert("columns".into(), Value::Array(self.columns));
        node.extend(self.attrs);
        Value::Object(node)
    }
}
