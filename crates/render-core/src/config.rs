use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings fixed when an engine is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineConfig {
    /// Font family used for every document font the engine cannot map directly.
    pub default_font: String,
    /// TrueType files, or directories searched recursively, whose families documents may
    /// name and which are embedded when used. Empty means base-14 fonts only.
    pub font_paths: Vec<PathBuf>,
    /// Size of the `Data` chunks pushed to the render stream, in bytes.
    pub chunk_size: usize,
    /// Bound of the render channel, in chunks.
    pub channel_capacity: usize,
    /// Flate-compress decoded image data.
    pub compress_images: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_font: "Helvetica".to_string(),
            font_paths: Vec::new(),
            chunk_size: 64 * 1024,
            channel_capacity: 16,
            compress_images: true,
        }
    }
}
