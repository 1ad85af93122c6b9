use super::flow::{color, number};
use super::widths::{WidthSpec, distribute};
use super::{Block, Draw, Item, Layouter, flatten};
use crate::style::TextStyle;
use folio_types::Color;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rule {
    width: f32,
    color: Color,
}

/// Grid lines and cell padding of one table. `horizontal[i]` is the line above row `i`,
/// `vertical[i]` the line left of column `i`.
#[derive(Debug, Clone, PartialEq)]
struct Rules {
    horizontal: Vec<Rule>,
    vertical: Vec<Rule>,
    /// `[left, top, right, bottom]`.
    padding: [f32; 4],
}

const DEFAULT_PADDING: [f32; 4] = [4.0, 2.0, 4.0, 2.0];

impl Rules {
    fn new(layout: Option<&Value>, rows: usize, cols: usize, header_rows: usize) -> Rules {
        let solid = |width: f32| Rule {
            width,
            color: Color::BLACK,
        };
        let (horizontal, vertical): (Vec<Rule>, Vec<Rule>) = match layout {
            Some(Value::String(preset)) if preset == "noBorders" => {
                (vec![solid(0.0); rows + 1], vec![solid(0.0); cols + 1])
            }
            Some(Value::String(preset)) if preset == "headerLineOnly" => (
                (0..=rows)
                    .map(|i| solid(if header_rows > 0 && i == header_rows { 2.0 } else { 0.0 }))
                    .collect(),
                vec![solid(0.0); cols + 1],
            ),
            Some(Value::String(preset)) if preset == "lightHorizontalLines" => (
                (0..=rows)
                    .map(|i| Rule {
                        width: if i == 0 || i == rows {
                            0.0
                        } else if i == header_rows {
                            2.0
                        } else {
                            1.0
                        },
                        color: if i == 1 { Color::BLACK } else { Color::gray(0xaa) },
                    })
                    .collect(),
                vec![solid(0.0); cols + 1],
            ),
            Some(Value::Object(custom)) => (
                custom_rules(custom, "hLineWidth", "hLineColor", rows + 1),
                custom_rules(custom, "vLineWidth", "vLineColor", cols + 1),
            ),
            Some(Value::String(other)) => {
                log::debug!("Unknown table layout '{}', using default lines", other);
                (vec![solid(1.0); rows + 1], vec![solid(1.0); cols + 1])
            }
            _ => (vec![solid(1.0); rows + 1], vec![solid(1.0); cols + 1]),
        };

        let mut padding = DEFAULT_PADDING;
        if let Some(Value::Object(custom)) = layout {
            for (slot, key) in ["paddingLeft", "paddingTop", "paddingRight", "paddingBottom"]
                .into_iter()
                .enumerate()
            {
                if let Some(p) = number(custom.get(key)) {
                    padding[slot] = p.max(0.0);
                }
            }
        }

        Rules {
            horizontal,
            vertical,
            padding,
        }
    }

    fn rule(lines: &[Rule], i: usize) -> Rule {
        lines.get(i).copied().unwrap_or(Rule {
            width: 0.0,
            color: Color::BLACK,
        })
    }
}

/// A number or an array indexed by line, whose last entry repeats.
fn per_line<'v>(value: Option<&'v Value>, i: usize) -> Option<&'v Value> {
    match value? {
        Value::Array(items) => items.get(i).or(items.last()),
        single => Some(single),
    }
}

fn custom_rules(layout: &Map<String, Value>, width_key: &str, color_key: &str, count: usize) -> Vec<Rule> {
    (0..count)
        .map(|i| Rule {
            width: number(per_line(layout.get(width_key), i)).unwrap_or(1.0).max(0.0),
            color: color(per_line(layout.get(color_key), i)).unwrap_or(Color::BLACK),
        })
        .collect()
}

fn column_span(cell: &Value, remaining: usize) -> usize {
    cell.get("colSpan")
        .and_then(Value::as_u64)
        .map_or(1, |s| s as usize)
        .clamp(1, remaining.max(1))
}

/// Which of `[left, top, right, bottom]` edges a cell draws.
fn cell_border(cell: &Value) -> [bool; 4] {
    let mut border = [true; 4];
    if let Some(flags) = cell.get("border").and_then(Value::as_array) {
        for (slot, flag) in border.iter_mut().zip(flags) {
            *slot = flag.as_bool().unwrap_or(true);
        }
    }
    border
}

fn body(node: &Map<String, Value>) -> &[Value] {
    node.get("table")
        .and_then(|t| t.get("body"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn cells(row: &Value) -> &[Value] {
    row.as_array().map(Vec::as_slice).unwrap_or_default()
}

fn column_count(node: &Map<String, Value>) -> usize {
    let declared = node
        .get("table")
        .and_then(|t| t.get("widths"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    body(node)
        .iter()
        .map(|row| cells(row).len())
        .fold(declared, usize::max)
}

impl Layouter<'_> {
    /// Lays out a table as one row block per body row. The first `headerRows` rows are
    /// repeated when the table continues on another page.
    pub(super) fn table(&mut self, node: &Map<String, Value>, style: &TextStyle, width: f32) -> Vec<Item> {
        let rows = body(node);
        let cols = column_count(node);
        if rows.is_empty() || cols == 0 {
            return Vec::new();
        }
        let header_rows = node
            .get("table")
            .and_then(|t| t.get("headerRows"))
            .and_then(Value::as_u64)
            .map_or(0, |h| h as usize)
            .min(rows.len());
        let rules = Rules::new(node.get("layout"), rows.len(), cols, header_rows);
        let widths = self.column_widths(node, style, cols, &rules, width);

        let mut blocks: Vec<Block> = rows
            .iter()
            .enumerate()
            .map(|(r, row)| self.row(cells(row), r, style, &widths, &rules))
            .collect();
        let body_rows = blocks.split_off(header_rows);
        vec![Item::Table {
            header: blocks,
            rows: body_rows,
        }]
    }

    fn column_widths(
        &mut self,
        node: &Map<String, Value>,
        style: &TextStyle,
        cols: usize,
        rules: &Rules,
        width: f32,
    ) -> Vec<f32> {
        let declared = node
            .get("table")
            .and_then(|t| t.get("widths"))
            .and_then(Value::as_array);
        let specs: Vec<WidthSpec> = (0..cols)
            .map(|c| WidthSpec::parse(declared.and_then(|w| w.get(c))))
            .collect();
        let natural = if specs.contains(&WidthSpec::Auto) {
            self.column_naturals(node, style, cols, rules)
        } else {
            Vec::new()
        };
        distribute(&specs, width, &natural)
    }

    /// Preferred width of each column, from the cells that span only that column.
    fn column_naturals(
        &mut self,
        node: &Map<String, Value>,
        style: &TextStyle,
        cols: usize,
        rules: &Rules,
    ) -> Vec<f32> {
        let horizontal_padding = rules.padding[0] + rules.padding[2];
        let mut natural = vec![0.0f32; cols];
        for row in body(node) {
            let cells = cells(row);
            let mut c = 0;
            while c < cols {
                let Some(cell) = cells.get(c) else { break };
                let span = column_span(cell, cols - c);
                if span == 1 {
                    let w = self.natural_width(cell, style) + horizontal_padding;
                    natural[c] = natural[c].max(w);
                }
                c += span;
            }
        }
        natural
    }

    pub(super) fn table_natural_width(&mut self, node: &Map<String, Value>, style: &TextStyle) -> f32 {
        let cols = column_count(node);
        let rules = Rules::new(node.get("layout"), body(node).len(), cols, 0);
        let declared = node
            .get("table")
            .and_then(|t| t.get("widths"))
            .and_then(Value::as_array);
        let naturals = self.column_naturals(node, style, cols, &rules);
        naturals
            .into_iter()
            .enumerate()
            .map(|(c, natural)| match WidthSpec::parse(declared.and_then(|w| w.get(c))) {
                WidthSpec::Fixed(w) => w,
                _ => natural,
            })
            .sum()
    }

    fn row(&mut self, cells: &[Value], r: usize, style: &TextStyle, widths: &[f32], rules: &Rules) -> Block {
        let [pad_left, pad_top, pad_right, pad_bottom] = rules.padding;
        let cols = widths.len();

        struct Placed {
            x: f32,
            width: f32,
            first_col: usize,
            span: usize,
            content: Block,
            fill: Option<Color>,
            border: [bool; 4],
        }

        let mut placed = Vec::new();
        let mut x = 0.0;
        let mut c = 0;
        while c < cols {
            let cell = cells.get(c).unwrap_or(&Value::Null);
            let span = column_span(cell, cols - c);
            let cell_width: f32 = widths[c..c + span].iter().sum();
            let inner = (cell_width - pad_left - pad_right).max(0.0);
            let fill = cell
                .as_object()
                .and_then(|map| self.styles.resolve(map, style).fill);
            let content = flatten(self.layout(cell, style, inner));
            placed.push(Placed {
                x,
                width: cell_width,
                first_col: c,
                span,
                content,
                fill,
                border: cell_border(cell),
            });
            x += cell_width;
            c += span;
        }

        let height = placed
            .iter()
            .map(|p| p.content.height)
            .fold(0.0, f32::max)
            + pad_top
            + pad_bottom;

        let mut block = Block::new(height);
        for p in &placed {
            if let Some(color) = p.fill {
                block.draws.push(Draw::Fill {
                    x: p.x,
                    y: 0.0,
                    width: p.width,
                    height,
                    color,
                });
            }
        }
        let mut lines = Vec::new();
        for p in placed {
            let (left, right) = (p.x, p.x + p.width);
            let [draw_left, draw_top, draw_right, draw_bottom] = p.border;
            let edges = [
                (draw_top, Rules::rule(&rules.horizontal, r), (left, 0.0, right, 0.0)),
                (draw_bottom, Rules::rule(&rules.horizontal, r + 1), (left, height, right, height)),
                (draw_left, Rules::rule(&rules.vertical, p.first_col), (left, 0.0, left, height)),
                (
                    draw_right,
                    Rules::rule(&rules.vertical, p.first_col + p.span),
                    (right, 0.0, right, height),
                ),
            ];
            for (enabled, rule, (x1, y1, x2, y2)) in edges {
                if enabled && rule.width > 0.0 {
                    lines.push(Draw::Line {
                        x1,
                        y1,
                        x2,
                        y2,
                        width: rule.width,
                        color: rule.color,
                    });
                }
            }
            block.place(p.content, p.x + pad_left, pad_top);
        }
        block.height = height;
        block.draws.extend(lines);
        block
    }
}
