use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("Failed to parse style pack: {0}")]
    Parse(String),

    #[error("Failed to read style pack '{path}': {message}")]
    Io { path: String, message: String },
}
