//! Line-oriented document model produced by the line parser.
//!
//! A [`Document`] is a sequence of pages, each holding its text lines in
//! reading order. Classifiers annotate lines in place through [`LineType`].

use serde::{Deserialize, Serialize};

use crate::error::{DcrError, LineTypeError};

/// Structural role of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    /// Regular body text.
    #[default]
    Body,
    /// Recurring line at the top of the page.
    Header,
    /// Recurring line at the bottom of the page.
    Footer,
    /// Section heading.
    Heading,
    /// Bulleted list entry.
    ListBullet,
    /// Numbered list entry.
    ListNumber,
    /// Table row.
    Table,
    /// Table-of-contents entry.
    Toc,
}

impl LineType {
    /// Short lowercase name, as used in the JSON representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Body => "body",
            LineType::Header => "header",
            LineType::Footer => "footer",
            LineType::Heading => "heading",
            LineType::ListBullet => "list_bullet",
            LineType::ListNumber => "list_number",
            LineType::Table => "table",
            LineType::Toc => "toc",
        }
    }
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single text line on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Line number within the page (1-indexed).
    pub line_no_page: u32,

    /// Literal text content.
    pub text: String,

    /// Classification of the line.
    #[serde(default)]
    pub line_type: LineType,
}

impl Line {
    /// Create a body line.
    pub fn new(line_no_page: u32, text: impl Into<String>) -> Self {
        Self {
            line_no_page,
            text: text.into(),
            line_type: LineType::Body,
        }
    }

    /// Set the line type.
    pub fn with_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }
}

/// A page of text lines in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed).
    pub page_no: u32,

    /// Lines in reading order.
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Page {
    /// Create a page from line texts, numbering the lines from 1.
    pub fn from_texts<S: AsRef<str>>(page_no: u32, texts: &[S]) -> Self {
        let lines = texts
            .iter()
            .enumerate()
            .map(|(idx, text)| Line::new(idx as u32 + 1, text.as_ref()))
            .collect();

        Self { page_no, lines }
    }

    /// Check that line numbers follow the reading order.
    fn validate(&self) -> Result<(), LineTypeError> {
        for (idx, line) in self.lines.iter().enumerate() {
            let expected = idx as u32 + 1;
            if line.line_no_page != expected {
                return Err(LineTypeError::LineNumber {
                    page_no: self.page_no,
                    expected,
                    found: line.line_no_page,
                });
            }
        }
        Ok(())
    }
}

/// A parsed document: pages of classified text lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Source file name, used for diagnostics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Pages in document order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a document from its pages.
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            file_name: None,
            pages,
        }
    }

    /// Create a document from per-page line texts, numbering pages and lines from 1.
    pub fn from_page_texts<S: AsRef<str>>(pages: &[Vec<S>]) -> Self {
        Self::new(
            pages
                .iter()
                .enumerate()
                .map(|(idx, texts)| Page::from_texts(idx as u32 + 1, texts))
                .collect(),
        )
    }

    /// Set the source file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Parse a document from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, DcrError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    ///
    /// The file name is recorded when the JSON does not carry one.
    pub fn from_file(path: &std::path::Path) -> Result<Self, DcrError> {
        let content = std::fs::read_to_string(path)?;
        let mut document = Self::from_json(&content)?;
        if document.file_name.is_none() {
            document.file_name = Some(path.display().to_string());
        }
        Ok(document)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, DcrError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of lines of the given type over all pages.
    pub fn count_lines(&self, line_type: LineType) -> usize {
        self.pages
            .iter()
            .flat_map(|page| page.lines.iter())
            .filter(|line| line.line_type == line_type)
            .count()
    }

    /// Check the preconditions every line-type classifier relies on.
    pub fn validate(&self) -> Result<(), LineTypeError> {
        if self.pages.is_empty() {
            return Err(LineTypeError::NoPages);
        }
        self.pages.iter().try_for_each(Page::validate)
    }
}
