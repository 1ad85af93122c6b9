//! The renderer-agnostic document model.
//!
//! A document is a tree of JSON [`Node`]s. Semantic sub-shapes are recognized by reserved
//! keys (`text`, `image`, `table`, `columns`, `stack`, `canvas`) rather than by a type tag.
//! Page headers and footers are either static nodes or generator closures evaluated once
//! per page after pagination, when the page count is known.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub type Node = Value;

/// Position of a page within the finished document, handed to decoration generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    /// 1-based.
    pub current_page: usize,
    pub page_count: usize,
}

pub type DecorationFn = Arc<dyn Fn(&PageContext) -> Option<Node> + Send + Sync>;

/// A page header or footer.
#[derive(Clone)]
pub enum PageDecoration {
    Static(Node),
    Generated(DecorationFn),
}

impl PageDecoration {
    pub fn generated<F>(f: F) -> Self
    where
        F: Fn(&PageContext) -> Option<Node> + Send + Sync + 'static,
    {
        PageDecoration::Generated(Arc::new(f))
    }

    /// The node to draw on the given page, if any.
    pub fn for_page(&self, ctx: &PageContext) -> Option<Node> {
        match self {
            PageDecoration::Static(Value::Null) => None,
            PageDecoration::Static(node) => Some(node.clone()),
            PageDecoration::Generated(f) => f(ctx),
        }
    }
}

impl fmt::Debug for PageDecoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageDecoration::Static(node) => f.debug_tuple("Static").field(node).finish(),
            PageDecoration::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/// A document description as produced by a template, before assembly.
#[derive(Debug, Clone)]
pub struct DocumentDefinition {
    pub root: Node,
    pub header: Option<PageDecoration>,
    pub footer: Option<PageDecoration>,
}

impl DocumentDefinition {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            header: None,
            footer: None,
        }
    }

    pub fn with_header(mut self, header: PageDecoration) -> Self {
        self.header = Some(header);
        self
    }

    pub fn with_footer(mut self, footer: PageDecoration) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Looks up a top-level key of the root mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.as_object().and_then(|m| m.get(key))
    }

    /// True when the template declared a header, either as a decoration or a root key.
    pub fn has_header(&self) -> bool {
        self.header.is_some() || self.get("header").is_some()
    }

    pub fn has_footer(&self) -> bool {
        self.footer.is_some() || self.get("footer").is_some()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("document root must be a mapping, found {0}")]
    RootNotMapping(&'static str),
    #[error("document has no `content` entry")]
    MissingContent,
    #[error("document `content` must be a sequence, found {0}")]
    ContentNotSequence(&'static str),
}

/// A definition whose placeholders and images are resolved and whose defaults are filled.
///
/// Construction checks the structural shape the layout engine relies on: a mapping root
/// holding a `content` sequence.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    definition: Map<String, Value>,
    header: Option<PageDecoration>,
    footer: Option<PageDecoration>,
}

impl AssembledDocument {
    pub fn try_from_definition(def: DocumentDefinition) -> Result<Self, DefinitionError> {
        let DocumentDefinition {
            root,
            mut header,
            mut footer,
        } = def;

        let mut definition = match root {
            Value::Object(map) => map,
            other => return Err(DefinitionError::RootNotMapping(kind_of(&other))),
        };
        match definition.get("content") {
            None | Some(Value::Null) => return Err(DefinitionError::MissingContent),
            Some(Value::Array(_)) => {}
            Some(other) => return Err(DefinitionError::ContentNotSequence(kind_of(other))),
        }

        if let Some(node) = definition.remove("header")
            && header.is_none()
        {
            header = Some(PageDecoration::Static(node));
        }
        if let Some(node) = definition.remove("footer")
            && footer.is_none()
        {
            footer = Some(PageDecoration::Static(node));
        }

        Ok(Self {
            definition,
            header,
            footer,
        })
    }

    pub fn definition(&self) -> &Map<String, Value> {
        &self.definition
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.definition.get(key)
    }

    pub fn content(&self) -> &[Value] {
        self.definition
            .get("content")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn styles(&self) -> Option<&Map<String, Value>> {
        self.get("styles").and_then(Value::as_object)
    }

    pub fn default_style(&self) -> Option<&Map<String, Value>> {
        self.get("defaultStyle").and_then(Value::as_object)
    }

    pub fn info(&self) -> Option<&Map<String, Value>> {
        self.get("info").and_then(Value::as_object)
    }

    pub fn images(&self) -> Option<&Map<String, Value>> {
        self.get("images").and_then(Value::as_object)
    }

    pub fn header(&self) -> Option<&PageDecoration> {
        self.header.as_ref()
    }

    pub fn footer(&self) -> Option<&PageDecoration> {
        self.footer.as_ref()
    }

    /// The whole definition as one JSON value, with static decorations put back in place.
    /// Generated decorations cannot be represented and are left out.
    pub fn to_json(&self) -> Value {
        let mut map = self.definition.clone();
        if let Some(PageDecoration::Static(node)) = &self.header {
            map.insert("header".into(), node.clone());
        }
        if let Some(PageDecoration::Static(node)) = &self.footer {
            map.insert("footer".into(), node.clone());
        }
        Value::Object(map)
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
