//! Error types for the dcr-core library.

use thiserror::Error;

/// Main error type for the dcr library.
#[derive(Error, Debug)]
pub enum DcrError {
    /// Line-type classification error.
    #[error("line type error: {0}")]
    LineType(#[from] LineTypeError),

    /// Document or configuration file (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when a classifier is handed a document it cannot work on.
///
/// These are precondition violations on the caller's side; data irregularities
/// inside a well-formed document never surface as errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LineTypeError {
    /// The document has no pages.
    #[error("document has no pages")]
    NoPages,

    /// A line number does not match the position of the line on its page.
    #[error("page {page_no}: expected line number {expected}, found {found}")]
    LineNumber {
        page_no: u32,
        expected: u32,
        found: u32,
    },
}

/// Result type for the dcr library.
pub type Result<T> = std::result::Result<T, DcrError>;
