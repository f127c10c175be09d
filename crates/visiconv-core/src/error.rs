//! Error types for visiconv-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in visiconv-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid column letter sequence
    #[error("Invalid column letters: {0}")]
    InvalidColumn(String),

    /// Invalid row number
    #[error("Invalid row number: {0}")]
    InvalidRow(String),
}
