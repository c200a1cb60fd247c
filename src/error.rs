//! Error types for docweave.

use thiserror::Error;

/// Result type alias for docweave operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by document operations.
///
/// Malformed numeric fields (page sizes, margins, font sizes) are never
/// errors; they fall back to defaults where they are consumed.
#[derive(Error, Debug)]
pub enum Error {
    /// A table of contents was requested but no heading up to the
    /// configured level exists in the document.
    #[error("no headings found up to level {0}")]
    NoHeadings(u8),

    /// Body XML serialization failed.
    #[error("xml serialization error: {0}")]
    Xml(String),
}
