//! Flow layout engine for folio documents.
//!
//! Documents are laid out top to bottom, paginated, and written object by object with a
//! streaming writer whose output is pushed over the render channel in chunks. Font names
//! resolve to TrueType families found under the configured font paths, which are embedded
//! as Type0 fonts and measured with `ttf-parser`; other names fall back to the PDF base-14
//! fonts with WinAnsi encoding. Use [`LopdfLayoutEngine`] through the `LayoutEngine` trait, or
//! [`render_to_vec`] when a synchronous in-memory render is enough.

mod document;
mod engine;
mod fonts;
mod images;
mod layout;
mod paint;
mod sink;
mod style;
mod truetype;
mod writer;

pub use document::{render_document, render_to_vec};
pub use engine::LopdfLayoutEngine;
pub use fonts::FontBook;
pub use truetype::{FaceError, TrueTypeFace};
pub use writer::StreamingPdfWriter;
