use super::{Block, Draw, Item};

/// Tolerance for rounding when checking whether a block still fits.
const EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub draws: Vec<Draw>,
}

impl Page {
    /// Adds a block with its top-left corner at `(x, y)` in page coordinates.
    pub fn add(&mut self, block: Block, x: f32, y: f32) {
        self.draws.extend(block.draws.into_iter().map(|mut d| {
            d.translate(x, y);
            d
        }));
    }
}

/// The body area of a page: content starts at `(x, top)` and must end above `bottom`.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Distributes items over as many pages as needed. Always returns at least one page.
///
/// A block taller than a whole page is placed on a fresh page and overflows it.
pub fn paginate(items: Vec<Item>, frame: Frame) -> Vec<Page> {
    let mut paginator = Paginator {
        frame,
        pages: Vec::new(),
        current: Page::default(),
        y: frame.top,
        empty: true,
    };
    for item in items {
        paginator.push(item);
    }
    paginator.finish()
}

struct Paginator {
    frame: Frame,
    pages: Vec<Page>,
    current: Page,
    y: f32,
    /// Nothing has been placed on the current page yet.
    empty: bool,
}

impl Paginator {
    fn push(&mut self, item: Item) {
        match item {
            Item::Block(block) => {
                if !self.fits(block.height) && !self.empty {
                    self.new_page();
                }
                self.put(block);
            }
            Item::Gap(height) => {
                if self.fits(height) {
                    self.y += height;
                } else if !self.empty {
                    self.new_page();
                }
            }
            Item::Break => {
                if !self.empty {
                    self.new_page();
                }
            }
            Item::Table { header, rows } => self.push_table(header, rows),
        }
    }

    fn push_table(&mut self, header: Vec<Block>, rows: Vec<Block>) {
        let header_height: f32 = header.iter().map(|b| b.height).sum();
        let first_row = rows.first().map_or(0.0, |b| b.height);
        if !self.empty && !self.fits(header_height + first_row) {
            self.new_page();
        }
        let mut fresh = self.empty;
        self.put_all(&header);

        let mut rows_on_page = 0;
        for row in rows {
            let stuck = rows_on_page == 0 && fresh;
            if !self.fits(row.height) && !stuck {
                self.new_page();
                fresh = true;
                rows_on_page = 0;
                self.put_all(&header);
            }
            self.put(row);
            rows_on_page += 1;
        }
    }

    fn put_all(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.put(block.clone());
        }
    }

    fn put(&mut self, block: Block) {
        let height = block.height;
        self.current.add(block, self.frame.x, self.y);
        self.y += height;
        self.empty = false;
    }

    fn fits(&self, height: f32) -> bool {
        self.y + height <= self.frame.bottom + EPSILON
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = self.frame.top;
        self.empty = true;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.empty || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}
