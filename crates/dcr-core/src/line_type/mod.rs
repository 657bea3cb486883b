//! Line-type classification of parsed documents.

pub mod header_footer;

use crate::error::LineTypeError;
use crate::models::document::Document;

/// Result type for line-type classification.
pub type Result<T> = std::result::Result<T, LineTypeError>;

/// Trait for classifiers that annotate the lines of a document in place.
pub trait LineClassifier {
    /// Summary produced by one run over a document.
    type Output;

    /// Classify the lines of the document, updating their types.
    fn classify(&self, document: &mut Document) -> Result<Self::Output>;
}
