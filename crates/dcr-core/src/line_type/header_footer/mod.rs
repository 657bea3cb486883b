//! Header and footer detection.
//!
//! Works on line text and position only. The first and last lines of every
//! page are compared with the lines at the same position on the next page:
//! a slot whose text stays (nearly) the same throughout the document is a
//! running header or footer. Slots whose text changes on every page are
//! still recognised when they end in a page counter.
//!
//! ```
//! use dcr_core::{Document, LineType, LineTypeConfig, process};
//!
//! let mut document = Document::from_page_texts(&[
//!     vec!["ACME Handbook", "Welcome to the handbook", "1"],
//!     vec!["ACME Handbook", "Scope of this document", "2"],
//!     vec!["ACME Handbook", "Terms and definitions", "3"],
//! ]);
//! let config = LineTypeConfig {
//!     header_max_lines: 1,
//!     footer_max_lines: 1,
//!     ..LineTypeConfig::default()
//! };
//!
//! let counts = process(&mut document, &config).unwrap();
//!
//! assert_eq!((counts.header_lines, counts.footer_lines), (1, 1));
//! assert_eq!(document.pages[2].lines[0].line_type, LineType::Header);
//! assert_eq!(document.pages[2].lines[2].line_type, LineType::Footer);
//! ```

mod apply;
mod classifier;
mod distance;
mod irregular;
mod slots;

pub use classifier::{ResultMap, SlotClassifier};
pub use distance::edit_distance;
pub use irregular::{Candidate, IrregularDetector};
pub use slots::{DistanceTable, SlotBuffer, SlotDistance, SlotKind, SlotLine};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{LineClassifier, Result};
use crate::models::config::LineTypeConfig;
use crate::models::document::Document;

/// Number of header and footer lines found in a document.
///
/// Distance-based lines are counted from the third page on; the first two
/// pages are tagged but treated as title pages. A page counter found through
/// its ascending numbers adds one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFooterCounts {
    /// Header lines per page.
    pub header_lines: usize,
    /// Footer lines per page.
    pub footer_lines: usize,
}

/// Header/footer detector.
#[derive(Debug, Clone, Copy)]
pub struct HeaderFooterDetector {
    config: LineTypeConfig,
}

impl HeaderFooterDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: LineTypeConfig) -> Self {
        Self { config }
    }

    /// Tag the header and footer lines of a document and count them.
    pub fn process(&self, document: &mut Document) -> Result<HeaderFooterCounts> {
        let config = &self.config;
        let file_name = document
            .file_name
            .clone()
            .unwrap_or_else(|| "<unnamed>".to_string());

        debug!(
            "{}: header_max_lines={} footer_max_lines={}",
            file_name, config.header_max_lines, config.footer_max_lines
        );

        if !config.is_enabled() {
            return Ok(HeaderFooterCounts::default());
        }

        document.validate()?;

        let page_count = document.page_count();
        let mut header_counter = IrregularDetector::new(SlotKind::Header);
        let mut footer_counter = IrregularDetector::new(SlotKind::Footer);

        let table = {
            let mut buffer =
                SlotBuffer::new(config.header_max_lines, config.footer_max_lines, page_count);

            for (page_idx, page) in document.pages.iter().enumerate() {
                buffer.load_page(&page.lines);

                if config.header_max_lines > 0 {
                    header_counter.observe(page_idx, buffer.current(SlotKind::Header));
                }
                if config.footer_max_lines > 0 {
                    footer_counter.observe(page_idx, buffer.current(SlotKind::Footer));
                }

                buffer.finish_page(page_idx);
            }

            buffer.into_table()
        };

        let results = SlotClassifier::new(config).classify(&table);
        debug!("{}: {} lines resolved by distance", file_name, results.len());

        let mut counts = apply::apply_results(document, &results);

        for counter in [&header_counter, &footer_counter] {
            let kind = counter.kind();
            let line_type = kind.line_type();

            if results.values().any(|t| *t == line_type) {
                continue;
            }

            if let Some(sequence) = counter.sequence(page_count) {
                let found = apply::apply_irregular(document, sequence, kind);
                match kind {
                    SlotKind::Header => counts.header_lines += found,
                    SlotKind::Footer => counts.footer_lines += found,
                }
            }
        }

        info!(
            "{}: {} header lines, {} footer lines",
            file_name, counts.header_lines, counts.footer_lines
        );

        Ok(counts)
    }
}

impl Default for HeaderFooterDetector {
    fn default() -> Self {
        Self::new(LineTypeConfig::default())
    }
}

impl LineClassifier for HeaderFooterDetector {
    type Output = HeaderFooterCounts;

    fn classify(&self, document: &mut Document) -> Result<Self::Output> {
        self.process(document)
    }
}

/// Tag the header and footer lines of a document using `config`.
pub fn process(document: &mut Document, config: &LineTypeConfig) -> Result<HeaderFooterCounts> {
    HeaderFooterDetector::new(*config).process(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineTypeError;
    use crate::models::document::LineType;
    use pretty_assertions::assert_eq;

    fn config(header_max_lines: usize, footer_max_lines: usize, max_distance: usize) -> LineTypeConfig {
        LineTypeConfig {
            header_max_lines,
            footer_max_lines,
            header_max_distance: max_distance,
            footer_max_distance: max_distance,
        }
    }

    fn types(document: &Document, page_idx: usize) -> Vec<LineType> {
        document.pages[page_idx]
            .lines
            .iter()
            .map(|line| line.line_type)
            .collect()
    }

    const SENTENCES: [&str; 12] = [
        "The quick brown fox jumps over the lazy dog",
        "Revenue figures are summarised in the table below",
        "Our staff worked hard throughout a difficult year",
        "Several new markets opened across northern Europe",
        "Outlook remains cautious given rising energy prices",
        "Appendix material lists every subsidiary by country",
        "Shareholders approved the dividend at the meeting",
        "Board members are elected for terms of three years",
        "Research spending doubled compared with last year",
        "Customer satisfaction improved in every region",
        "Supply chain delays eased during the second half",
        "We thank all partners for their continued trust",
    ];

    /// Pages of six lines: a fixed title, four changing body lines, a fixed footer.
    fn report(pages: usize) -> Document {
        Document::from_page_texts(
            &(0..pages)
                .map(|page| {
                    let mut lines = vec!["ACME Corp. Annual Report 2022"];
                    lines.extend((0..4).map(|j| SENTENCES[(4 * page + j) % SENTENCES.len()]));
                    lines.push("Confidential - internal use only");
                    lines
                })
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut document = report(4);
        let before = document.clone();

        let counts = process(&mut document, &config(0, 0, 3)).unwrap();

        assert_eq!(counts, HeaderFooterCounts::default());
        assert_eq!(document, before);
    }

    #[test]
    fn test_disabled_accepts_empty_document() {
        let mut document = Document::default();
        assert!(process(&mut document, &config(0, 0, 3)).is_ok());
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let mut document = Document::default();
        assert_eq!(
            process(&mut document, &LineTypeConfig::default()),
            Err(LineTypeError::NoPages)
        );
    }

    #[test]
    fn test_running_header_and_footer() {
        let mut document = report(5);

        let counts = process(&mut document, &config(1, 1, 3)).unwrap();

        assert_eq!(
            counts,
            HeaderFooterCounts {
                header_lines: 3,
                footer_lines: 3
            }
        );
        for page_idx in 0..5 {
            let mut expected = vec![LineType::Body; 6];
            expected[0] = LineType::Header;
            expected[5] = LineType::Footer;
            assert_eq!(types(&document, page_idx), expected);
        }
    }

    #[test]
    fn test_counts_skip_first_two_pages() {
        let mut document = Document::from_page_texts(
            &(0..5)
                .map(|page| vec!["ACME Handbook", SENTENCES[2 * page], SENTENCES[2 * page + 1]])
                .collect::<Vec<_>>(),
        );

        let counts = process(&mut document, &config(1, 0, 0)).unwrap();

        assert_eq!(counts.header_lines, 3);
        assert_eq!(document.count_lines(LineType::Header), 5);
        assert_eq!(types(&document, 0)[0], LineType::Header);
        assert_eq!(types(&document, 1)[0], LineType::Header);
    }

    #[test]
    fn test_identical_slot_found_at_zero_threshold() {
        let mut document = report(6);

        let counts = process(&mut document, &config(1, 0, 0)).unwrap();

        assert_eq!(counts.header_lines, 4);
        assert_eq!(document.count_lines(LineType::Header), 6);
    }

    #[test]
    fn test_changing_body_lines_are_not_headers() {
        let mut document = report(6);

        process(&mut document, &config(3, 0, 3)).unwrap();

        for page_idx in 0..6 {
            assert_eq!(types(&document, page_idx)[1], LineType::Body);
            assert_eq!(types(&document, page_idx)[2], LineType::Body);
        }
    }

    #[test]
    fn test_cover_page_is_tolerated() {
        let mut document = Document::from_page_texts(&[
            vec!["Quarterly Review", "Prepared for the board", "March", "Welcome"],
            vec!["ACME Corp.", "Finance", "Q1 2022", "Revenue grew"],
            vec!["ACME Corp.", "Finance", "Q1 2022", "Costs fell"],
            vec!["ACME Corp.", "Finance", "Q1 2022", "Outlook"],
        ]);

        let counts = process(&mut document, &config(3, 0, 3)).unwrap();

        assert_eq!(counts.header_lines, 6);
        for page_idx in 1..4 {
            assert_eq!(
                types(&document, page_idx),
                vec![LineType::Header, LineType::Header, LineType::Header, LineType::Body]
            );
        }
        assert_eq!(types(&document, 0), vec![LineType::Body; 4]);
    }

    #[test]
    fn test_dissimilar_slot_inside_document_is_rejected() {
        let mut document = Document::from_page_texts(&[
            vec!["Alpha", "x"],
            vec!["Bravo", "y"],
            vec!["Charlie", "z"],
            vec!["Delta", "w"],
            vec!["Echo", "v"],
        ]);

        let counts = process(&mut document, &config(1, 0, 3)).unwrap();

        assert_eq!(counts, HeaderFooterCounts::default());
        assert_eq!(document.count_lines(LineType::Header), 0);
    }

    #[test]
    fn test_page_counter_footer() {
        let mut document = Document::from_page_texts(
            &(1..=5)
                .map(|n| {
                    vec![
                        format!("Chapter {n}: something entirely new"),
                        format!("Paragraph {n} has unrelated content of its own"),
                        format!("Page {n}"),
                    ]
                })
                .collect::<Vec<_>>(),
        );

        let counts = process(&mut document, &config(0, 1, 0)).unwrap();

        assert_eq!(
            counts,
            HeaderFooterCounts {
                header_lines: 0,
                footer_lines: 1
            }
        );
        for page_idx in 0..5 {
            assert_eq!(types(&document, page_idx)[2], LineType::Footer);
        }
        assert_eq!(document.count_lines(LineType::Footer), 5);
    }

    #[test]
    fn test_page_counter_within_threshold_is_counted_per_page() {
        let mut document = Document::from_page_texts(
            &(1..=5)
                .map(|n| vec![format!("Text of page number {n} is unique, truly {n}"), format!("Page {n}")])
                .collect::<Vec<_>>(),
        );

        let counts = process(&mut document, &config(0, 1, 3)).unwrap();

        assert_eq!(counts.footer_lines, 3);
        assert_eq!(document.count_lines(LineType::Footer), 5);
    }

    #[test]
    fn test_broken_counter_is_not_a_footer() {
        let mut document = Document::from_page_texts(&[
            vec!["Introduction to the topic", "1"],
            vec!["A wholly different paragraph", "2"],
            vec!["Closing remarks and thanks", "4"],
        ]);

        let counts = process(&mut document, &config(0, 1, 0)).unwrap();

        assert_eq!(counts, HeaderFooterCounts::default());
        assert_eq!(document.count_lines(LineType::Footer), 0);
    }

    #[test]
    fn test_idempotent() {
        let mut document = report(5);
        document.pages[2].lines[5].line_type = LineType::Toc;
        let config = LineTypeConfig::default();

        let first = process(&mut document, &config).unwrap();
        let after_first = document.clone();
        let second = process(&mut document, &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(document, after_first);
        assert_eq!(document.pages[2].lines[5].line_type, LineType::Toc);
        assert_eq!(document.count_lines(LineType::Footer), 4);
    }

    #[test]
    fn test_idempotent_page_counter() {
        let mut document = Document::from_page_texts(
            &(1..=4)
                .map(|n| vec![format!("Content block {n} is never repeated"), format!("Report page {n}")])
                .collect::<Vec<_>>(),
        );
        let config = config(0, 1, 0);

        let first = process(&mut document, &config).unwrap();
        let second = process(&mut document, &config).unwrap();

        assert_eq!(first.footer_lines, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_short_pages_leave_slots_empty() {
        let mut document = Document::from_page_texts(&[
            vec!["Header", "a", "b", "c"],
            vec!["Header"],
            vec!["Header", "d", "e", "f"],
        ]);

        let counts = process(&mut document, &config(3, 0, 3)).unwrap();

        assert_eq!(counts.header_lines, 1);
        assert_eq!(document.pages[1].lines[0].line_type, LineType::Header);
    }

    #[test]
    fn test_single_page_document() {
        let mut document = Document::from_page_texts(&[vec!["Title", "Body", "1"]]);

        let counts = process(&mut document, &LineTypeConfig::default()).unwrap();

        assert_eq!(counts, HeaderFooterCounts::default());
        assert_eq!(document.count_lines(LineType::Body), 3);
    }

    #[test]
    fn test_misnumbered_lines_are_rejected() {
        let mut document = report(3);
        document.pages[1].lines[0].line_no_page = 0;

        assert!(matches!(
            process(&mut document, &LineTypeConfig::default()),
            Err(LineTypeError::LineNumber { page_no: 2, .. })
        ));
    }

    #[test]
    fn test_named_document_keeps_its_name() {
        let mut document = report(4).with_file_name("annual-report.json");

        let counts = process(&mut document, &config(1, 1, 3)).unwrap();

        assert_eq!(counts.header_lines, 2);
        assert_eq!(document.file_name.as_deref(), Some("annual-report.json"));
    }

    #[test]
    fn test_line_classifier_trait() {
        let detector = HeaderFooterDetector::default();
        let mut document = report(3);

        let counts = detector.classify(&mut document).unwrap();

        assert_eq!(counts.header_lines, 1);
    }
}
