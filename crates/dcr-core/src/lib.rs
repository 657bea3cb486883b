//! Core library for document content recognition.
//!
//! This crate provides:
//! - The per-line document model shared by the line-type classifiers
//! - Header/footer detection across the pages of a parsed document
//! - Configuration for the line-type classifiers

pub mod error;
pub mod line_type;
pub mod models;

pub use error::{DcrError, Result};
pub use line_type::header_footer::{process, HeaderFooterCounts, HeaderFooterDetector};
pub use line_type::LineClassifier;
pub use models::config::{DcrConfig, LineTypeConfig};
pub use models::document::{Document, Line, LineType, Page};
