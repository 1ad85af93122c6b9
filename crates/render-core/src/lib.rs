//! The boundary between document assembly and a concrete layout engine.
//!
//! This crate provides:
//! - the `LayoutEngine` trait, which turns an `AssembledDocument` into a stream of events
//! - `RenderEvent` and `collect` for consuming that stream
//! - `EngineConfig`, injected into an engine at construction
//! - the `RenderError` type shared by engines

mod config;
mod error;
mod traits;

pub use config::EngineConfig;
pub use error::RenderError;
pub use traits::{LayoutEngine, RenderEvent, RenderStream, collect};
