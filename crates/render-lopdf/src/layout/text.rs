use super::{Block, Draw};
use crate::style::TextStyle;
use folio_style::TextAlign;

/// Line box height as a multiple of the font size.
const LINE_SPACING: f32 = 1.2;
/// Distance from the baseline to the bottom of the line box, as a multiple of the font size.
const DESCENT: f32 = 0.25;

/// A piece of text with one style.
#[derive(Debug, Clone)]
pub struct Run {
    pub text: String,
    pub style: TextStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Word(&'a str, usize),
    Space(usize),
    Newline,
}

fn tokenize(runs: &[Run]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for (idx, run) in runs.iter().enumerate() {
        for (n, segment) in run.text.split('\n').enumerate() {
            if n > 0 {
                tokens.push(Token::Newline);
            }
            let mut start = None;
            for (i, c) in segment.char_indices() {
                if c == ' ' || c == '\t' {
                    if let Some(s) = start.take() {
                        tokens.push(Token::Word(&segment[s..i], idx));
                    }
                    tokens.push(Token::Space(idx));
                } else if start.is_none() {
                    start = Some(i);
                }
            }
            if let Some(s) = start {
                tokens.push(Token::Word(&segment[s..], idx));
            }
        }
    }
    tokens
}

#[derive(Debug, Clone)]
struct Fragment {
    text: String,
    run: usize,
    x: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Line {
    fragments: Vec<Fragment>,
    width: f32,
}

impl Line {
    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn push(&mut self, text: &str, run: usize, runs: &[Run]) {
        let width = runs[run].style.width_of(text);
        match self.fragments.last_mut() {
            Some(last) if last.run == run => last.text.push_str(text),
            _ => self.fragments.push(Fragment {
                text: text.to_string(),
                run,
                x: self.width,
            }),
        }
        self.width += width;
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// Breaks runs into lines no wider than `width`. Words longer than a line are split
/// between characters. Always returns at least one line.
pub fn wrap(runs: &[Run], width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();
    let mut pending_space: Option<usize> = None;

    for token in tokenize(runs) {
        match token {
            Token::Newline => {
                lines.push(std::mem::take(&mut line));
                pending_space = None;
            }
            Token::Space(run) => {
                if !line.is_empty() {
                    pending_space = Some(run);
                }
            }
            Token::Word(word, run) => {
                let style = &runs[run].style;
                let space = pending_space.map_or(0.0, |s| runs[s].style.width_of(" "));
                let word_width = style.width_of(word);
                if !line.is_empty() && line.width + space + word_width > width {
                    lines.push(std::mem::take(&mut line));
                    pending_space = None;
                }
                if let Some(s) = pending_space.take() {
                    line.push(" ", s, runs);
                }

                let mut rest = word;
                while line.is_empty() && style.width_of(rest) > width && rest.chars().count() > 1 {
                    let cut = fitting_prefix(rest, style, width);
                    line.push(&rest[..cut], run, runs);
                    lines.push(std::mem::take(&mut line));
                    rest = &rest[cut..];
                }
                line.push(rest, run, runs);
            }
        }
    }
    lines.push(line);
    lines
}

/// Byte length of the longest prefix of `word` that fits, at least one character.
fn fitting_prefix(word: &str, style: &TextStyle, width: f32) -> usize {
    let mut end = 0;
    for (i, c) in word.char_indices() {
        let next = i + c.len_utf8();
        if end > 0 && style.width_of(&word[..next]) > width {
            break;
        }
        end = next;
    }
    end
}

/// Width of the widest line when nothing is wrapped.
pub fn natural_width(runs: &[Run]) -> f32 {
    wrap(runs, f32::INFINITY)
        .iter()
        .map(|l| l.width)
        .fold(0.0, f32::max)
}

/// Turns a wrapped line into a block `width` points wide.
///
/// `base` sizes empty lines so blank paragraphs still take vertical space. Justified text
/// is set flush left.
pub fn line_block(line: &Line, runs: &[Run], base: &TextStyle, width: f32) -> Block {
    let styles = || line.fragments.iter().map(|f| &runs[f.run].style);
    let size = styles().map(|s| s.size).fold(0.0, f32::max);
    let size = if size > 0.0 { size } else { base.size };
    let line_height = styles().map(|s| s.line_height).fold(base.line_height, f32::max);
    let height = size * LINE_SPACING * line_height;
    let baseline = height - size * DESCENT;

    let offset = match base.alignment {
        TextAlign::Right => width - line.width,
        TextAlign::Center => (width - line.width) / 2.0,
        TextAlign::Left | TextAlign::Justify => 0.0,
    }
    .max(0.0);

    let mut block = Block::new(height);
    for fragment in &line.fragments {
        let style = &runs[fragment.run].style;
        let text = fragment.text.trim_end();
        if text.trim_start().is_empty() {
            continue;
        }
        let x = offset + fragment.x;
        block.draws.push(Draw::Text {
            x,
            baseline,
            text: text.to_string(),
            font: style.font(),
            size: style.size,
            color: style.color,
        });
        if style.underline {
            let y = baseline + style.size * 0.1;
            block.draws.push(Draw::Line {
                x1: x,
                y1: y,
                x2: x + style.width_of(text),
                y2: y,
                width: style.size / 20.0,
                color: style.color,
            });
        }
    }
    block
}
