//! Whole-document rendering: layout, pagination, decorations and PDF output.

use crate::fonts::{FontBook, FontKey};
use crate::layout::{Draw, Frame, Layouter, flatten, paginate};
use crate::paint::PagePainter;
use crate::writer::StreamingPdfWriter;
use folio_render_core::{EngineConfig, RenderError};
use folio_types::{AssembledDocument, Margins, PageContext, PageSize, Size};
use lopdf::{Dictionary, Object, StringFormat, dictionary};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

const PDF_VERSION: &str = "1.7";
const DEFAULT_MARGIN: f32 = 40.0;

/// Lays out `document` and writes it as PDF to `out`, returning the writer when done.
pub fn render_document<W: Write>(
    document: &AssembledDocument,
    config: &EngineConfig,
    fonts: &FontBook,
    out: W,
) -> Result<W, RenderError> {
    let page = page_size(document);
    let margins = document
        .get("pageMargins")
        .and_then(Margins::from_value)
        .unwrap_or(Margins::uniform(DEFAULT_MARGIN));
    let mut layouter = Layouter::new(document, fonts, config.compress_images);
    let root = layouter.root_style(document.default_style());
    let body_width = (page.width - margins.horizontal()).max(0.0);
    let items = document
        .content()
        .iter()
        .flat_map(|node| layouter.layout(node, &root, body_width))
        .collect();
    let frame = Frame {
        x: margins.left,
        top: margins.top,
        bottom: page.height - margins.bottom,
    };
    let mut pages = paginate(items, frame);

    let page_count = pages.len();
    for (i, body) in pages.iter_mut().enumerate() {
        let ctx = PageContext {
            current_page: i + 1,
            page_count,
        };
        if let Some(node) = document.header().and_then(|h| h.for_page(&ctx)) {
            body.add(flatten(layouter.layout(&node, &root, page.width)), 0.0, 0.0);
        }
        if let Some(node) = document.footer().and_then(|f| f.for_page(&ctx)) {
            let footer = flatten(layouter.layout(&node, &root, page.width));
            body.add(footer, 0.0, page.height - margins.bottom);
        }
    }
    log::debug!(
        "Laid out {} page(s) of {}x{}pt",
        page_count,
        page.width,
        page.height
    );

    let mut writer = StreamingPdfWriter::new(out, PDF_VERSION)?;

    let mut xobjects = Dictionary::new();
    for encoded in layouter.into_images().into_encoded() {
        let mut image = encoded.image;
        if let Some(mask) = encoded.mask {
            let mask_id = writer.write_object(Object::Stream(mask))?;
            image.dict.set("SMask", mask_id);
        }
        let id = writer.write_object(Object::Stream(image))?;
        xobjects.set(encoded.name, id);
    }

    let mut used_fonts: BTreeMap<String, FontKey> = BTreeMap::new();
    let mut used_glyphs: BTreeMap<String, BTreeMap<u16, char>> = BTreeMap::new();
    let mut missing = BTreeSet::new();
    for draw in pages.iter().flat_map(|p| &p.draws) {
        if let Draw::Text { font, text, .. } = draw {
            let name = font.resource_name();
            if let Some(face) = font.embedded() {
                let glyphs = used_glyphs.entry(name.clone()).or_default();
                for c in text.chars() {
                    if let Some(glyph) = face.glyph(c) {
                        glyphs.entry(glyph).or_insert(c);
                    }
                }
            }
            missing.extend(font.missing_chars(text));
            used_fonts.entry(name).or_insert_with(|| font.clone());
        }
    }
    if !missing.is_empty() {
        log::warn!(
            "{} character(s) have no glyph in the selected fonts and print as placeholders: {:?}",
            missing.len(),
            missing.iter().collect::<String>()
        );
    }

    let mut page_ids = Vec::with_capacity(page_count);
    for body in &pages {
        let mut painter = PagePainter::new(page.height);
        for draw in &body.draws {
            painter.draw(draw);
        }
        let content_id = writer.write_content_stream(painter.finish())?;
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
            "Contents" => content_id,
            "Resources" => writer.resources_id,
        };
        page_ids.push(writer.write_object(page_dict.into())?);
    }

    let mut font_resources = Dictionary::new();
    for (name, font) in &used_fonts {
        match font.embedded() {
            Some(face) => {
                let glyphs = used_glyphs.remove(name).unwrap_or_default();
                let id = face.write_objects(&mut writer, &glyphs)?;
                log::debug!("Embedded {} with {} glyph(s)", face.postscript_name(), glyphs.len());
                font_resources.set(name.as_str(), id);
            }
            None => font_resources.set(name.as_str(), font.type1_dictionary()),
        }
    }

    let mut resources = dictionary! { "Font" => font_resources };
    if !xobjects.is_empty() {
        resources.set("XObject", xobjects);
    }
    writer.set_resources(resources);
    writer.set_info(info_dictionary(document));

    Ok(writer.finish(&page_ids)?)
}

/// Renders into memory.
///
/// Fonts under `config.font_paths` are loaded for this call only; keep a
/// [`LopdfLayoutEngine`](crate::LopdfLayoutEngine) around to load them once.
pub fn render_to_vec(document: &AssembledDocument, config: &EngineConfig) -> Result<Vec<u8>, RenderError> {
    let fonts = FontBook::load(&config.font_paths, &config.default_font);
    render_document(document, config, &fonts, Vec::new())
}

fn page_size(document: &AssembledDocument) -> Size {
    let size = document
        .get("pageSize")
        .and_then(PageSize::resolve)
        .unwrap_or_else(|| PageSize::A4.size());
    match document.get("pageOrientation").and_then(Value::as_str) {
        Some("landscape") => size.landscape(),
        _ => size,
    }
}

fn info_dictionary(document: &AssembledDocument) -> Dictionary {
    let mut info = Dictionary::new();
    if let Some(fields) = document.info() {
        for (key, name) in [
            ("title", "Title"),
            ("author", "Author"),
            ("subject", "Subject"),
            ("keywords", "Keywords"),
            ("creator", "Creator"),
        ] {
            if let Some(value) = fields.get(key).and_then(Value::as_str) {
                info.set(name, text_string(value));
            }
        }
    }
    info.set(
        "Producer",
        text_string(&format!("folio {}", env!("CARGO_PKG_VERSION"))),
    );
    info.set("CreationDate", Object::string_literal(pdf_date(chrono::Local::now())));
    info
}

/// PDF text string: plain bytes for ASCII, UTF-16BE with a byte order mark otherwise.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn pdf_date<Tz: chrono::TimeZone>(time: chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let offset = time.format("%:z").to_string().replacen(':', "'", 1);
    format!("D:{}{}'", time.format("%Y%m%d%H%M%S"), offset)
}
