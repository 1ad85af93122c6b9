//! TrueType faces embedded as composite (Type0 / CIDFontType2) fonts.
//!
//! Text shown with an embedded face is written as big-endian glyph ids under
//! `Identity-H`, so any character the face covers prints, not only the WinAnsi range.
//! A `ToUnicode` map keeps the text extractable.

use crate::writer::StreamingPdfWriter;
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use ttf_parser::{Face, GlyphId, name_id};

/// `bfchar` entries per block; the CMap format allows at most 100.
const TO_UNICODE_CHUNK: usize = 100;

/// One parsed TrueType face with the metrics needed for layout and embedding.
pub struct TrueTypeFace {
    pub(crate) id: usize,
    family: String,
    postscript_name: String,
    bold: bool,
    italic: bool,
    data: Arc<Vec<u8>>,
    units_per_em: u16,
    glyphs: HashMap<char, u16>,
    advances: Vec<u16>,
    ascender: i16,
    descender: i16,
    cap_height: i16,
    bbox: [i16; 4],
    italic_angle: f32,
}

impl fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("id", &self.id)
            .field("postscript_name", &self.postscript_name)
            .field("bold", &self.bold)
            .field("italic", &self.italic)
            .field("glyphs", &self.glyphs.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FaceError {
    Parse(String),
    NoOutlines,
    NoFamilyName,
}

impl fmt::Display for FaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceError::Parse(e) => write!(f, "not a readable font: {}", e),
            FaceError::NoOutlines => f.write_str("no TrueType outlines (glyf table)"),
            FaceError::NoFamilyName => f.write_str("no family name"),
        }
    }
}

impl std::error::Error for FaceError {}

impl TrueTypeFace {
    pub fn parse(data: Vec<u8>) -> Result<Self, FaceError> {
        let face = Face::parse(&data, 0).map_err(|e| FaceError::Parse(e.to_string()))?;
        if face.tables().glyf.is_none() {
            return Err(FaceError::NoOutlines);
        }
        let family = name(&face, name_id::TYPOGRAPHIC_FAMILY)
            .or_else(|| name(&face, name_id::FAMILY))
            .ok_or(FaceError::NoFamilyName)?;
        let postscript_name = name(&face, name_id::POST_SCRIPT_NAME)
            .unwrap_or_else(|| family.replace(' ', ""));

        let mut glyphs = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|code| {
                    if let (Some(c), Some(glyph)) = (char::from_u32(code), subtable.glyph_index(code)) {
                        glyphs.entry(c).or_insert(glyph.0);
                    }
                });
            }
        }
        let advances = (0..face.number_of_glyphs())
            .map(|g| face.glyph_hor_advance(GlyphId(g)).unwrap_or(0))
            .collect();
        let bbox = face.global_bounding_box();

        Ok(Self {
            id: 0,
            bold: face.is_bold(),
            italic: face.is_italic() || face.is_oblique(),
            units_per_em: face.units_per_em().max(1),
            ascender: face.ascender(),
            descender: face.descender(),
            cap_height: face.capital_height().unwrap_or_else(|| face.ascender()),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            italic_angle: face.italic_angle(),
            family,
            postscript_name,
            glyphs,
            advances,
            data: Arc::new(data),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Glyph id for `c`; `None` when the face does not cover it.
    pub fn glyph(&self, c: char) -> Option<u16> {
        self.glyphs.get(&c).copied()
    }

    pub fn covers(&self, c: char) -> bool {
        self.glyphs.contains_key(&c)
    }

    /// Width of `text` at `size` points. Uncovered characters take the `.notdef` advance.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| self.advance(self.glyph(c).unwrap_or(0)) as u32)
            .sum();
        units as f32 * size / self.units_per_em as f32
    }

    /// Two bytes per character, the glyph id under `Identity-H`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|c| self.glyph(c).unwrap_or(0).to_be_bytes())
            .collect()
    }

    fn advance(&self, glyph: u16) -> u16 {
        self.advances.get(glyph as usize).copied().unwrap_or(0)
    }

    /// Font units scaled to the 1000-unit text space of PDF font metrics.
    fn scaled(&self, units: i32) -> i64 {
        (units as f32 * 1000.0 / self.units_per_em as f32).round() as i64
    }

    /// Writes the font program and its dictionaries, returning the Type0 font's id.
    ///
    /// `used` maps each glyph shown in the document to the character it stands for; only
    /// those glyphs get width and `ToUnicode` entries.
    pub fn write_objects<W: Write>(
        &self,
        writer: &mut StreamingPdfWriter<W>,
        used: &BTreeMap<u16, char>,
    ) -> io::Result<ObjectId> {
        let program = Stream::new(
            dictionary! {
                "Length1" => self.data.len() as i64,
                "Filter" => "FlateDecode",
            },
            miniz_oxide::deflate::compress_to_vec_zlib(&self.data, 6),
        );
        let program_id = writer.write_object(Object::Stream(program))?;

        let [x_min, y_min, x_max, y_max] = self.bbox.map(|v| self.scaled(v as i32));
        // Nonsymbolic, plus Italic when slanted.
        let flags = 32 + if self.italic { 64 } else { 0 };
        let descriptor = dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(self.postscript_name.clone().into_bytes()),
            "Flags" => flags,
            "FontBBox" => vec![x_min.into(), y_min.into(), x_max.into(), y_max.into()],
            "ItalicAngle" => self.italic_angle,
            "Ascent" => self.scaled(self.ascender as i32),
            "Descent" => self.scaled(self.descender as i32),
            "CapHeight" => self.scaled(self.cap_height as i32),
            "StemV" => if self.bold { 120 } else { 80 },
            "FontFile2" => program_id,
        };
        let descriptor_id = writer.write_object(Object::Dictionary(descriptor))?;

        let widths: Vec<Object> = used
            .keys()
            .flat_map(|&glyph| {
                let width = self.scaled(self.advance(glyph) as i32);
                [Object::Integer(glyph as i64), Object::Array(vec![width.into()])]
            })
            .collect();
        let cid_font = dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => Object::Name(self.postscript_name.clone().into_bytes()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "DW" => self.scaled(self.advance(0) as i32),
            "W" => widths,
            "CIDToGIDMap" => "Identity",
        };
        let cid_font_id = writer.write_object(Object::Dictionary(cid_font))?;

        let to_unicode = Stream::new(Dictionary::new(), to_unicode_cmap(used).into_bytes());
        let to_unicode_id = writer.write_object(Object::Stream(to_unicode))?;

        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(self.postscript_name.clone().into_bytes()),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![cid_font_id.into()],
            "ToUnicode" => to_unicode_id,
        };
        writer.write_object(Object::Dictionary(font))
    }

    /// The string object `text` is shown with.
    pub fn show(&self, text: &str) -> Object {
        Object::String(self.encode(text), StringFormat::Hexadecimal)
    }
}

fn name(face: &Face<'_>, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|n| n.name_id == id && n.is_unicode())
        .find_map(|n| n.to_string())
        .filter(|n| !n.is_empty())
}

fn to_unicode_cmap(used: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );
    let entries: Vec<_> = used.iter().collect();
    for chunk in entries.chunks(TO_UNICODE_CHUNK) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (glyph, c) in chunk {
            let mut units = [0u16; 2];
            let utf16: String = c
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{:04X}", u))
                .collect();
            cmap.push_str(&format!("<{:04X}> <{}>\n", glyph, utf16));
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}
