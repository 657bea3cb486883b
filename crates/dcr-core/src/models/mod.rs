//! Data models for the dcr library.

pub mod config;
pub mod document;
