//! Error types for visiconv-doc

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or replaying a worksheet dump
///
/// Both are fatal: command ordering is stateful (the cursor), so a skipped
/// or misapplied command would corrupt every subsequent cell placement.
#[derive(Debug, Error)]
pub enum Error {
    /// The dump matched no command grammar alternative
    #[error("dump does not match the command grammar (offset {offset})")]
    Dump {
        /// Byte offset of the first unrecognized input
        offset: usize,
    },

    /// A navigation command referenced an undecodable coordinate
    #[error(transparent)]
    Coord(#[from] visiconv_core::Error),
}
