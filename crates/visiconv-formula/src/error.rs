//! Formula error types

use thiserror::Error;

/// Result type for formula parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// The cell text matched no grammar alternative
///
/// `offset` is the furthest byte offset the parser reached across all
/// backtracked alternatives, which is usually where the actual problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell text does not match the formula grammar (offset {offset})")]
pub struct ParseError {
    /// Furthest byte offset reached before the parse failed
    pub offset: usize,
}
