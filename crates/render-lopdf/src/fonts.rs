//! Font selection: embedded TrueType families first, then the base-14 fonts.
//!
//! Base-14 widths come from the Adobe AFM files and cover printable ASCII; everything else
//! is measured as an average glyph. Oblique variants share the upright widths. Base-14
//! text is encoded as WinAnsi, so only that repertoire prints there; embedded faces print
//! whatever they cover.

use crate::truetype::TrueTypeFace;
use lopdf::{Dictionary, Object, StringFormat, dictionary};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Family {
    Helvetica,
    Courier,
    Times,
    Embedded(Arc<EmbeddedFamily>),
}

impl Family {
    /// Maps a document font name onto a base-14 family. Unknown names use `fallback`.
    pub fn for_name(name: &str, fallback: &Family) -> Family {
        let lower = name.to_ascii_lowercase();
        if lower.contains("courier") || lower.contains("mono") {
            Family::Courier
        } else if lower.contains("times") {
            Family::Times
        } else if lower.contains("helvetica") || lower.contains("arial") {
            Family::Helvetica
        } else {
            fallback.clone()
        }
    }

    fn base_font(&self, bold: bool, italics: bool) -> &'static str {
        match (self, bold, italics) {
            (Family::Courier, false, false) => "Courier",
            (Family::Courier, true, false) => "Courier-Bold",
            (Family::Courier, false, true) => "Courier-Oblique",
            (Family::Courier, true, true) => "Courier-BoldOblique",
            (Family::Times, false, false) => "Times-Roman",
            (Family::Times, true, false) => "Times-Bold",
            (Family::Times, false, true) => "Times-Italic",
            (Family::Times, true, true) => "Times-BoldItalic",
            (_, false, false) => "Helvetica",
            (_, true, false) => "Helvetica-Bold",
            (_, false, true) => "Helvetica-Oblique",
            (_, true, true) => "Helvetica-BoldOblique",
        }
    }

    fn index(&self) -> u8 {
        match self {
            Family::Courier => 1,
            Family::Times => 2,
            _ => 0,
        }
    }
}

/// The faces loaded for one family name.
#[derive(Debug)]
pub struct EmbeddedFamily {
    name: String,
    faces: Vec<Arc<TrueTypeFace>>,
}

impl PartialEq for EmbeddedFamily {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl EmbeddedFamily {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The closest face: exact weight and slant, then matching slant, then matching
    /// weight, then the first face loaded.
    pub fn face(&self, bold: bool, italics: bool) -> &Arc<TrueTypeFace> {
        let score = |face: &&Arc<TrueTypeFace>| {
            2 * (face.is_italic() == italics) as u8 + (face.is_bold() == bold) as u8
        };
        // `faces` is never empty; `max_by_key` keeps the last of equal scores, so the
        // list is walked in reverse to prefer the first loaded face.
        self.faces
            .iter()
            .rev()
            .max_by_key(score)
            .unwrap_or(&self.faces[0])
    }
}

/// The embeddable families available to a render, plus the family used when a document
/// names none or names one that is unavailable.
#[derive(Debug, Clone)]
pub struct FontBook {
    families: Vec<Arc<EmbeddedFamily>>,
    fallback: Family,
}

impl Default for FontBook {
    fn default() -> Self {
        Self {
            families: Vec::new(),
            fallback: Family::Helvetica,
        }
    }
}

impl FontBook {
    /// Loads every `.ttf`/`.otf` file found under `paths` (files or directories, walked
    /// recursively). Unreadable files and faces without TrueType outlines are skipped.
    pub fn load(paths: &[PathBuf], default_font: &str) -> Self {
        let mut files = Vec::new();
        for path in paths {
            collect_font_files(path, &mut files);
        }
        files.sort();

        let faces = files
            .iter()
            .filter_map(|path| {
                let data = std::fs::read(path)
                    .map_err(|e| log::warn!("Cannot read font {}: {}", path.display(), e))
                    .ok()?;
                TrueTypeFace::parse(data)
                    .map_err(|e| log::warn!("Skipping font {}: {}", path.display(), e))
                    .ok()
            })
            .collect();
        let book = Self::from_faces(faces, default_font);
        log::debug!(
            "Loaded {} embeddable font famil{}",
            book.families.len(),
            if book.families.len() == 1 { "y" } else { "ies" }
        );
        book
    }

    /// Groups faces by family name, case-insensitively, keeping their order.
    pub fn from_faces(faces: Vec<TrueTypeFace>, default_font: &str) -> Self {
        let mut grouped: Vec<(String, Vec<Arc<TrueTypeFace>>)> = Vec::new();
        for (id, mut face) in faces.into_iter().enumerate() {
            face.id = id;
            let key = face.family().to_lowercase();
            match grouped.iter_mut().find(|(name, _)| *name == key) {
                Some((_, group)) => group.push(Arc::new(face)),
                None => grouped.push((key, vec![Arc::new(face)])),
            }
        }
        let families = grouped
            .into_iter()
            .map(|(_, faces)| {
                Arc::new(EmbeddedFamily {
                    name: faces[0].family().to_string(),
                    faces,
                })
            })
            .collect();

        let mut book = Self {
            families,
            fallback: Family::Helvetica,
        };
        book.fallback = book.resolve(default_font, &Family::Helvetica);
        if !default_font.is_empty() && !matches!(book.fallback, Family::Embedded(_)) {
            log::debug!(
                "Default font '{}' is not embedded, using {}",
                default_font,
                book.fallback.base_font(false, false)
            );
        }
        book
    }

    pub fn fallback(&self) -> &Family {
        &self.fallback
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// An embedded family with exactly this name (ignoring case), else a base-14 family
    /// the name suggests, else `fallback`.
    pub fn resolve(&self, name: &str, fallback: &Family) -> Family {
        self.families
            .iter()
            .find(|family| family.name.eq_ignore_ascii_case(name.trim()))
            .map(|family| Family::Embedded(Arc::clone(family)))
            .unwrap_or_else(|| Family::for_name(name, fallback))
    }
}

fn collect_font_files(path: &Path, out: &mut Vec<PathBuf>) {
    if path.is_file() {
        out.push(path.to_path_buf());
        return;
    }
    let Ok(entries) = std::fs::read_dir(path) else {
        log::debug!("Font path {} is not readable", path.display());
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_font_files(&path, out);
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
        {
            out.push(path);
        }
    }
}

/// A concrete face: family plus weight and slant.
#[derive(Debug, Clone, PartialEq)]
pub struct FontKey {
    pub family: Family,
    pub bold: bool,
    pub italics: bool,
}

impl FontKey {
    pub fn new(family: Family, bold: bool, italics: bool) -> Self {
        Self {
            family,
            bold,
            italics,
        }
    }

    /// The embedded face this key draws with, if any.
    pub fn embedded(&self) -> Option<&Arc<TrueTypeFace>> {
        match &self.family {
            Family::Embedded(family) => Some(family.face(self.bold, self.italics)),
            _ => None,
        }
    }

    /// Name of the font in the page resource dictionary: `F0`..`F11` for base-14 faces,
    /// `E<n>` for embedded ones.
    pub fn resource_name(&self) -> String {
        match self.embedded() {
            Some(face) => format!("E{}", face.id),
            None => {
                let variant = self.bold as u8 + 2 * self.italics as u8;
                format!("F{}", self.family.index() * 4 + variant)
            }
        }
    }

    pub fn base_font(&self) -> &str {
        match self.embedded() {
            Some(face) => face.postscript_name(),
            None => self.family.base_font(self.bold, self.italics),
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        if let Some(face) = self.embedded() {
            return face.text_width(text, size);
        }
        let units: u32 = text.chars().map(|c| self.glyph_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }

    /// Resource entry for a base-14 face.
    pub fn type1_dictionary(&self) -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Object::Name(self.base_font().as_bytes().to_vec()),
            "Encoding" => "WinAnsiEncoding",
        }
    }

    /// The string operand that shows `text` in this font.
    pub fn show(&self, text: &str) -> Object {
        match self.embedded() {
            Some(face) => face.show(text),
            None => Object::String(to_win_ansi(text), StringFormat::Literal),
        }
    }

    /// Characters of `text` this font prints as a placeholder.
    pub fn missing_chars<'a>(&'a self, text: &'a str) -> impl Iterator<Item = char> + 'a {
        text.chars().filter(move |&c| match self.embedded() {
            Some(face) => !face.covers(c),
            None => win_ansi_byte(c).is_none(),
        })
    }

    fn glyph_width(&self, c: char) -> u16 {
        if self.family == Family::Courier {
            return 600;
        }
        let table = if self.bold {
            &HELVETICA_BOLD
        } else {
            &HELVETICA
        };
        match c as u32 {
            code @ 32..=126 => table[(code - 32) as usize],
            _ => 556,
        }
    }
}

/// Encodes text for a WinAnsi font. Characters outside the encoding become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

/// The WinAnsiEncoding (CP1252) byte for `c`.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(unicode, _)| *unicode == code)
            .map(|(_, byte)| *byte),
    }
}

/// The 0x80..=0x9F block, where CP1252 departs from Latin-1.
const WIN_ANSI_HIGH: [(u32, u8); 27] = [
    (0x20AC, 0x80),
    (0x201A, 0x82),
    (0x0192, 0x83),
    (0x201E, 0x84),
    (0x2026, 0x85),
    (0x2020, 0x86),
    (0x2021, 0x87),
    (0x02C6, 0x88),
    (0x2030, 0x89),
    (0x0160, 0x8A),
    (0x2039, 0x8B),
    (0x0152, 0x8C),
    (0x017D, 0x8E),
    (0x2018, 0x91),
    (0x2019, 0x92),
    (0x201C, 0x93),
    (0x201D, 0x94),
    (0x2022, 0x95),
    (0x2013, 0x96),
    (0x2014, 0x97),
    (0x02DC, 0x98),
    (0x2122, 0x99),
    (0x0161, 0x9A),
    (0x203A, 0x9B),
    (0x0153, 0x9C),
    (0x017E, 0x9E),
    (0x0178, 0x9F),
];

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
