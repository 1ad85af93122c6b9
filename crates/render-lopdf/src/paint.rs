//! Turns positioned draws into a page content stream.

use crate::fonts::FontKey;
use crate::layout::Draw;
use folio_types::Color;
use lopdf::content::{Content, Operation};
use lopdf::Object;

#[derive(Debug, Default, Clone, PartialEq)]
struct GraphicsState {
    font: Option<(FontKey, f32)>,
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
}

/// Paints onto one page. Draw coordinates have their origin at the top-left corner and are
/// flipped into PDF space here.
#[derive(Debug)]
pub struct PagePainter {
    page_height: f32,
    content: Content,
    state: GraphicsState,
}

impl PagePainter {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: GraphicsState::default(),
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    pub fn draw(&mut self, draw: &Draw) {
        match draw {
            Draw::Text {
                x,
                baseline,
                text,
                font,
                size,
                color,
            } => self.text(*x, *baseline, text, font, *size, *color),
            Draw::Fill {
                x,
                y,
                width,
                height,
                color,
            } => {
                self.set_fill(*color);
                let bottom = self.page_height - (y + height);
                self.op("re", vec![(*x).into(), bottom.into(), (*width).into(), (*height).into()]);
                self.op("f", vec![]);
            }
            Draw::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                self.set_line_width(*width);
                self.set_stroke(*color);
                self.op("m", vec![(*x1).into(), (self.page_height - y1).into()]);
                self.op("l", vec![(*x2).into(), (self.page_height - y2).into()]);
                self.op("S", vec![]);
            }
            Draw::Image {
                x,
                y,
                width,
                height,
                name,
            } => {
                let bottom = self.page_height - (y + height);
                self.op("q", vec![]);
                self.op(
                    "cm",
                    vec![
                        (*width).into(),
                        0.into(),
                        0.into(),
                        (*height).into(),
                        (*x).into(),
                        bottom.into(),
                    ],
                );
                self.op("Do", vec![Object::Name(name.as_bytes().to_vec())]);
                self.op("Q", vec![]);
            }
        }
    }

    fn text(&mut self, x: f32, baseline: f32, text: &str, font: &FontKey, size: f32, color: Color) {
        if text.trim().is_empty() {
            return;
        }
        self.op("BT", vec![]);
        let current = self.state.font.as_ref().is_some_and(|(f, s)| f == font && *s == size);
        if !current {
            self.op(
                "Tf",
                vec![Object::Name(font.resource_name().into_bytes()), size.into()],
            );
            self.state.font = Some((font.clone(), size));
        }
        self.set_fill(color);
        self.op("Td", vec![x.into(), (self.page_height - baseline).into()]);
        self.op("Tj", vec![font.show(text)]);
        self.op("ET", vec![]);
    }

    fn set_fill(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            self.op("rg", rgb(color));
            self.state.fill = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color) {
        if self.state.stroke != Some(color) {
            self.op("RG", rgb(color));
            self.state.stroke = Some(color);
        }
    }

    fn set_line_width(&mut self, width: f32) {
        if self.state.line_width != Some(width) {
            self.op("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content
            .operations
            .push(Operation::new(operator, operands));
    }
}

fn rgb(color: Color) -> Vec<Object> {
    color.to_unit_rgb().into_iter().map(Object::from).collect()
}
