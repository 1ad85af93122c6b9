use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JPathError {
    #[error("path expression is empty")]
    EmptyPath,

    #[error("path '{path}' has an empty segment at position {position}")]
    EmptySegment { path: String, position: usize },
}
