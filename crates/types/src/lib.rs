pub mod color;
pub mod document;
pub mod geometry;

pub use color::Color;
pub use document::{
    AssembledDocument, DecorationFn, DefinitionError, DocumentDefinition, Node, PageContext,
    PageDecoration,
};
pub use geometry::{Margins, PageSize, Size};
