//! Style packs for folio documents.
//!
//! A [`StylePack`] maps style names to flat attribute sets. Every document starts from the
//! shared base pack; a template may register a pack of its own whose entries replace base
//! entries of the same name. See [`compose`].

pub mod compose;
pub mod error;
pub mod packs;
pub mod stylesheet;
pub mod text;

pub use compose::{StyleRegistry, compose};
pub use error::StyleError;
pub use stylesheet::{Spacing, Style, StylePack};
pub use text::TextAlign;
