use crate::node::{NodeBuilder, Width, impl_node_attrs};
use serde_json::{Map, Value};

/// Builder for `{ "table": { "widths", "headerRows", "body" }, "layout": ... }`.
///
/// Rows are sequences of cells; a cell spanning `n` columns is followed by `n - 1`
/// placeholder cells, which [`Table::row`] does not add for you.
#[derive(Debug, Clone, Default)]
pub struct Table {
    widths: Vec<Width>,
    header_rows: usize,
    body: Vec<Value>,
    attrs: Map<String, Value>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn widths(mut self, widths: impl IntoIterator<Item = Width>) -> Self {
        self.widths = widths.into_iter().collect();
        self
    }

    /// Rows repeated at the top of every page the table continues on.
    pub fn header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    pub fn row<I, B>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: NodeBuilder,
    {
        self.body
            .push(Value::Array(cells.into_iter().map(NodeBuilder::build).collect()));
        self
    }

    pub fn rows<R, I, B>(self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = B>,
        B: NodeBuilder,
    {
        rows.into_iter().fold(self, |table, cells| table.row(cells))
    }

    pub fn layout(mut self, layout: TableLayout) -> Self {
        self.attrs.insert("layout".into(), layout.into());
        self
    }
}

impl_node_attrs!(Table);

impl NodeBuilder for Table {
    fn build(self) -> Value {
        let mut table = Map::new();
        if self.header_rows > 0 {
            table.insert("headerRows".into(), self.header_rows.into());
        }
        if !self.widths.is_empty() {
            table.insert(
                "widths".into(),
                Value::Array(self.widths.into_iter().map(Value::from).collect()),
            );
        }
        table.insert("body".into(), Value::Array(self.body));

        let mut node = Map::new();
        node.insert("table".into(), Value::Object(table));
        node.extend(self.attrs);
        Value::Object(node)
    }
}

/// Table line and padding presets, or explicit values.
#[derive(Debug, Clone)]
pub enum TableLayout {
    NoBorders,
    LightHorizontalLines,
    HeaderLineOnly,
    Custom(Lines),
}

impl From<TableLayout> for Value {
    fn from(layout: TableLayout) -> Self {
        match layout {
            TableLayout::NoBorders => "noBorders".into(),
            TableLayout::LightHorizontalLines => "lightHorizontalLines".into(),
            TableLayout::HeaderLineOnly => "headerLineOnly".into(),
            TableLayout::Custom(lines) => Value::Object(lines.attrs),
        }
    }
}

/// Explicit line widths, colors and cell padding.
///
/// A width given as a list applies per line index; lines past the end reuse the last entry.
#[derive(Debug, Clone, Default)]
pub struct Lines {
    attrs: Map<String, Value>,
}

impl Lines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same width for every horizontal and vertical line.
    pub fn grid(width: f32, color: &str) -> Self {
        Self::new()
            .h_line_width(width)
            .v_line_width(width)
            .h_line_color(color)
            .v_line_color(color)
    }

    pub fn h_line_width(mut self, width: f32) -> Self {
        self.attrs.insert("hLineWidth".into(), width.into());
        self
    }

    pub fn h_line_widths(mut self, widths: &[f32]) -> Self {
        self.attrs.insert("hLineWidth".into(), serde_json::json!(widths));
        self
    }

    pub fn v_line_width(mut self, width: f32) -> Self {
        self.attrs.insert("vLineWidth".into(), width.into());
        self
    }

    pub fn h_line_color(mut self, color: &str) -> Self {
        self.attrs.insert("hLineColor".into(), color.into());
        self
    }

    pub fn v_line_color(mut self, color: &str) -> Self {
        self.attrs.insert("vLineColor".into(), color.into());
        self
    }

    /// Cell padding as `[left, top, right, bottom]`.
    pub fn padding(mut self, [left, top, right, bottom]: [f32; 4]) -> Self {
        self.attrs.insert("paddingLeft".into(), left.into());
        self.attrs.insert("paddingTop".into(), top.into());
        self.attrs.insert("paddingRight".into(), right.into());
        self.attrs.insert("paddingBottom".into(), bottom.into());
        self
    }
}

impl From<Lines> for TableLayout {
    fn from(lines: Lines) -> Self {
        TableLayout::Custom(lines)
    }
}
