//! Asset access for the folio pipeline.
//!
//! - [`FilesystemResourceProvider`]: reads assets below a root directory
//! - [`ImageResolver`]: turns image references into `data:` URLs
//!
//! The in-memory provider from `folio-traits` is re-exported for convenience.

mod filesystem;
pub mod image;
pub mod mime;

pub use filesystem::FilesystemResourceProvider;
pub use image::{FetchOptions, ImageResolver};
pub use mime::{mime_for_path, to_data_url};

pub use folio_traits::InMemoryResourceProvider;
