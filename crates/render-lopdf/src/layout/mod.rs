//! Flow layout.
//!
//! Nodes are laid out top to bottom into [`Item`]s: unbreakable blocks, vertical gaps,
//! forced breaks and tables whose rows may be split across pages. Coordinates inside a
//! block are relative to its top-left corner with `y` growing downwards. [`paginate`]
//! places items on pages; conversion to PDF space happens when painting.

mod flow;
mod paginate;
mod table;
mod text;
mod widths;

pub use flow::Layouter;
pub use paginate::{Frame, paginate};

use crate::fonts::FontKey;
use folio_types::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    Text {
        x: f32,
        baseline: f32,
        text: String,
        font: FontKey,
        size: f32,
        color: Color,
    },
    Fill {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        name: String,
    },
}

impl Draw {
    fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Draw::Text { x, baseline, .. } => {
                *x += dx;
                *baseline += dy;
            }
            Draw::Fill { x, y, .. } | Draw::Image { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Draw::Line { x1, y1, x2, y2, .. } => {
                *x1 += dx;
                *x2 += dx;
                *y1 += dy;
                *y2 += dy;
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Block {
    pub height: f32,
    pub draws: Vec<Draw>,
}

impl Block {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            draws: Vec::new(),
        }
    }

    /// Draws `other` with its top-left corner at `(dx, dy)`, growing this block if needed.
    pub fn place(&mut self, other: Block, dx: f32, dy: f32) {
        self.height = self.height.max(dy + other.height);
        self.draws.extend(other.draws.into_iter().map(|mut d| {
            d.translate(dx, dy);
            d
        }));
    }

    fn shift(&mut self, dx: f32) {
        for draw in &mut self.draws {
            draw.translate(dx, 0.0);
        }
    }
}

#[derive(Debug, Clone)]
pub enum Item {
    Block(Block),
    Gap(f32),
    Break,
    /// Header rows are repeated at the top of every page the rows continue on.
    Table {
        header: Vec<Block>,
        rows: Vec<Block>,
    },
}

impl Item {
    fn shift(&mut self, dx: f32) {
        match self {
            Item::Block(block) => block.shift(dx),
            Item::Table { header, rows } => {
                header.iter_mut().chain(rows.iter_mut()).for_each(|b| b.shift(dx))
            }
            Item::Gap(_) | Item::Break => {}
        }
    }
}

/// Stacks items into one unbreakable block. Breaks have no effect inside it.
pub fn flatten(items: Vec<Item>) -> Block {
    let mut block = Block::default();
    let mut y = 0.0;
    fn put(block: &mut Block, b: Block, y: &mut f32) {
        let height = b.height;
        block.place(b, 0.0, *y);
        *y += height;
    }
    for item in items {
        match item {
            Item::Block(b) => put(&mut block, b, &mut y),
            Item::Gap(h) => y += h,
            Item::Break => {}
            Item::Table { header, rows } => {
                for b in header.into_iter().chain(rows) {
                    put(&mut block, b, &mut y);
                }
            }
        }
    }
    block.height = y;
    block
}
