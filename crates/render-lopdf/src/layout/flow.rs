use super::text::{self, Run};
use super::widths::{WidthSpec, distribute};
use super::{Block, Draw, Item, flatten};
use crate::fonts::FontBook;
use crate::images::{ImageInfo, ImageStore};
use crate::style::{StyleResolver, TextStyle};
use folio_style::TextAlign;
use folio_types::{AssembledDocument, Color};
use serde_json::{Map, Value};

/// Lays out document nodes. One per document; it owns the images embedded along the way.
#[derive(Debug)]
pub struct Layouter<'a> {
    pub(super) styles: StyleResolver,
    images: Option<&'a Map<String, Value>>,
    store: ImageStore,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PageBreak {
    None,
    Before,
    After,
}

impl<'a> Layouter<'a> {
    pub fn new(document: &'a AssembledDocument, fonts: &FontBook, compress_images: bool) -> Self {
        Self {
            styles: StyleResolver::new(document.styles(), fonts.clone()),
            images: document.images(),
            store: ImageStore::new(compress_images),
        }
    }

    pub fn root_style(&self, default_style: Option<&Map<String, Value>>) -> TextStyle {
        self.styles.root(default_style)
    }

    pub fn into_images(self) -> ImageStore {
        self.store
    }

    /// Lays out `node` in a column `width` points wide.
    pub fn layout(&mut self, node: &Value, parent: &TextStyle, width: f32) -> Vec<Item> {
        match node {
            Value::Null => Vec::new(),
            Value::Array(children) => children
                .iter()
                .flat_map(|child| self.layout(child, parent, width))
                .collect(),
            Value::Object(map) => self.layout_object(map, parent, width),
            scalar => paragraph(&[Run::new(scalar_text(scalar), parent.clone())], parent, None, width),
        }
    }

    fn layout_object(&mut self, node: &Map<String, Value>, parent: &TextStyle, width: f32) -> Vec<Item> {
        let style = self.styles.resolve(node, parent);
        let [left, top, right, bottom] = style.margin;
        let inner = (width - left - right).max(0.0);

        let mut body = if let Some(content) = node.get("text") {
            let runs = self.runs(content, &style.text);
            paragraph(&runs, &style.text, style.fill, inner)
        } else if let Some(children) = node.get("stack") {
            self.layout(children, &style.text, inner)
        } else if let Some(columns) = node.get("columns") {
            vec![Item::Block(self.columns(node, columns, &style.text, inner))]
        } else if node.contains_key("table") {
            self.table(node, &style.text, inner)
        } else if let Some(source) = node.get("image") {
            self.image(node, source, style.text.alignment, inner)
                .map(Item::Block)
                .into_iter()
                .collect()
        } else if let Some(shapes) = node.get("canvas") {
            vec![Item::Block(canvas(shapes))]
        } else {
            Vec::new()
        };

        if left != 0.0 {
            body.iter_mut().for_each(|item| item.shift(left));
        }

        let page_break = page_break(node);
        let mut items = Vec::with_capacity(body.len() + 4);
        if page_break == PageBreak::Before {
            items.push(Item::Break);
        }
        if top > 0.0 {
            items.push(Item::Gap(top));
        }
        items.extend(body);
        if bottom > 0.0 {
            items.push(Item::Gap(bottom));
        }
        if page_break == PageBreak::After {
            items.push(Item::Break);
        }
        items
    }

    /// Flattens a `text` value into styled runs. Nested objects may restyle their part.
    fn runs(&self, content: &Value, style: &TextStyle) -> Vec<Run> {
        match content {
            Value::Null => Vec::new(),
            Value::Array(parts) => parts.iter().flat_map(|p| self.runs(p, style)).collect(),
            Value::Object(map) => {
                let inner = self.styles.resolve(map, style).text;
                map.get("text")
                    .map(|t| self.runs(t, &inner))
                    .unwrap_or_default()
            }
            scalar => vec![Run::new(scalar_text(scalar), style.clone())],
        }
    }

    fn columns(
        &mut self,
        node: &Map<String, Value>,
        columns: &Value,
        style: &TextStyle,
        width: f32,
    ) -> Block {
        let children: Vec<&Value> = match columns {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        if children.is_empty() {
            return Block::default();
        }
        let gap = number(node.get("columnGap")).unwrap_or(0.0);
        let available = (width - gap * (children.len() - 1) as f32).max(0.0);
        let specs: Vec<WidthSpec> = children
            .iter()
            .map(|c| WidthSpec::parse(c.get("width")))
            .collect();
        let natural: Vec<f32> = children
            .iter()
            .zip(&specs)
            .map(|(child, spec)| match spec {
                WidthSpec::Auto => self.natural_width(child, style),
                _ => 0.0,
            })
            .collect();
        let widths = distribute(&specs, available, &natural);

        let mut block = Block::default();
        let mut x = 0.0;
        for (child, w) in children.into_iter().zip(widths) {
            let column = flatten(self.layout(child, style, w));
            block.place(column, x, 0.0);
            x += w + gap;
        }
        block
    }

    fn image(
        &mut self,
        node: &Map<String, Value>,
        source: &Value,
        alignment: TextAlign,
        width: f32,
    ) -> Option<Block> {
        let info = self.load_image(source)?;
        let (w, h) = image_box(node, &info, width);
        let x = match alignment {
            TextAlign::Center => (width - w) / 2.0,
            TextAlign::Right => width - w,
            TextAlign::Left | TextAlign::Justify => 0.0,
        }
        .max(0.0);
        Some(Block {
            height: h,
            draws: vec![Draw::Image {
                x,
                y: 0.0,
                width: w,
                height: h,
                name: info.name,
            }],
        })
    }

    /// An `image` value is a data URL or a key of the document's `images`. References
    /// that were never resolved to data are skipped.
    fn load_image(&mut self, source: &Value) -> Option<ImageInfo> {
        let reference = source.as_str()?.trim();
        if reference.starts_with("data:") {
            return self.store.load(reference);
        }
        match self.images.and_then(|m| m.get(reference)).and_then(Value::as_str) {
            Some(data) if data.starts_with("data:") => self.store.load(data),
            Some(_) => {
                log::warn!("Image '{}' was never resolved to data; skipping", reference);
                None
            }
            None => {
                log::warn!("Image '{}' is neither data nor a known image; skipping", reference);
                None
            }
        }
    }

    /// Preferred width of a node when nothing wraps, including its margins.
    pub(super) fn natural_width(&mut self, node: &Value, parent: &TextStyle) -> f32 {
        let map = match node {
            Value::Null => return 0.0,
            Value::Array(children) => {
                return children
                    .iter()
                    .map(|c| self.natural_width(c, parent))
                    .fold(0.0, f32::max);
            }
            Value::Object(map) => map,
            scalar => return text::natural_width(&[Run::new(scalar_text(scalar), parent.clone())]),
        };

        let style = self.styles.resolve(map, parent);
        let [left, _, right, _] = style.margin;
        let inner = if let Some(content) = map.get("text") {
            text::natural_width(&self.runs(content, &style.text))
        } else if let Some(children) = map.get("stack") {
            self.natural_width(children, &style.text)
        } else if let Some(columns) = map.get("columns") {
            let children: Vec<&Value> = columns.as_array().map(|a| a.iter().collect()).unwrap_or_default();
            let gap = number(map.get("columnGap")).unwrap_or(0.0);
            let total: f32 = children
                .iter()
                .map(|c| match WidthSpec::parse(c.get("width")) {
                    WidthSpec::Fixed(w) => w,
                    _ => self.natural_width(c, &style.text),
                })
                .sum();
            total + gap * children.len().saturating_sub(1) as f32
        } else if map.contains_key("table") {
            self.table_natural_width(map, &style.text)
        } else if let Some(source) = map.get("image") {
            self.load_image(source)
                .map_or(0.0, |info| image_box(map, &info, f32::INFINITY).0)
        } else if let Some(shapes) = map.get("canvas") {
            canvas(shapes)
                .draws
                .iter()
                .map(|d| match d {
                    Draw::Line { x1, x2, .. } => x1.max(*x2),
                    Draw::Fill { x, width, .. } => x + width,
                    _ => 0.0,
                })
                .fold(0.0, f32::max)
        } else {
            0.0
        };
        inner + left + right
    }
}

/// Lines of one paragraph, each its own block so the paragraph can break across pages.
fn paragraph(runs: &[Run], style: &TextStyle, fill: Option<Color>, width: f32) -> Vec<Item> {
    text::wrap(runs, width)
        .iter()
        .map(|line| {
            let mut block = text::line_block(line, runs, style, width);
            if let Some(color) = fill {
                block.draws.insert(
                    0,
                    Draw::Fill {
                        x: 0.0,
                        y: 0.0,
                        width,
                        height: block.height,
                        color,
                    },
                );
            }
            Item::Block(block)
        })
        .collect()
}

fn canvas(shapes: &Value) -> Block {
    let mut block = Block::default();
    for shape in shapes.as_array().into_iter().flatten() {
        let line_width = number(shape.get("lineWidth")).unwrap_or(1.0);
        let line_color = color(shape.get("lineColor")).unwrap_or(Color::BLACK);
        match shape.get("type").and_then(Value::as_str) {
            Some("line") => {
                let (x1, y1) = (coord(shape, "x1"), coord(shape, "y1"));
                let (x2, y2) = (coord(shape, "x2"), coord(shape, "y2"));
                block.height = block.height.max(y1.max(y2) + line_width);
                block.draws.push(Draw::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    width: line_width,
                    color: line_color,
                });
            }
            Some("rect") => {
                let (x, y) = (coord(shape, "x"), coord(shape, "y"));
                let (w, h) = (coord(shape, "w"), coord(shape, "h"));
                block.height = block.height.max(y + h);
                if let Some(fill) = color(shape.get("color")) {
                    block.draws.push(Draw::Fill {
                        x,
                        y,
                        width: w,
                        height: h,
                        color: fill,
                    });
                }
                if shape.get("lineColor").is_some() || shape.get("color").is_none() {
                    for (x1, y1, x2, y2) in [
                        (x, y, x + w, y),
                        (x + w, y, x + w, y + h),
                        (x + w, y + h, x, y + h),
                        (x, y + h, x, y),
                    ] {
                        block.draws.push(Draw::Line {
                            x1,
                            y1,
                            x2,
                            y2,
                            width: line_width,
                            color: line_color,
                        });
                    }
                }
            }
            other => log::debug!("Unsupported canvas shape {:?}", other),
        }
    }
    block
}

/// Display size of an image in points. Pixels count as points; the result never exceeds
/// `available` in width.
fn image_box(node: &Map<String, Value>, info: &ImageInfo, available: f32) -> (f32, f32) {
    let natural_w = info.width.max(1) as f32;
    let natural_h = info.height.max(1) as f32;
    let ratio = natural_h / natural_w;
    let fit = node
        .get("fit")
        .and_then(Value::as_array)
        .and_then(|f| Some((f.first()?.as_f64()? as f32, f.get(1)?.as_f64()? as f32)));

    let (mut w, mut h) = match (number(node.get("width")), number(node.get("height")), fit) {
        (Some(w), Some(h), _) => (w, h),
        (Some(w), None, _) => (w, w * ratio),
        (None, Some(h), _) => (h / ratio, h),
        (None, None, Some((fw, fh))) => {
            let scale = (fw / natural_w).min(fh / natural_h);
            (natural_w * scale, natural_h * scale)
        }
        (None, None, None) => (natural_w, natural_h),
    };
    if w > available && available > 0.0 {
        let scale = available / w;
        w *= scale;
        h *= scale;
    }
    (w, h)
}

fn page_break(node: &Map<String, Value>) -> PageBreak {
    match node.get("pageBreak").and_then(Value::as_str) {
        Some("before") => PageBreak::Before,
        Some("after") => PageBreak::After,
        _ => PageBreak::None,
    }
}

pub(super) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(super) fn number(value: Option<&Value>) -> Option<f32> {
    value.and_then(Value::as_f64).map(|n| n as f32)
}

pub(super) fn color(value: Option<&Value>) -> Option<Color> {
    value.and_then(Value::as_str).and_then(|c| Color::parse(c).ok())
}

fn coord(shape: &Value, key: &str) -> f32 {
    number(shape.get(key)).unwrap_or(0.0)
}
