//! Writing resolved header/footer lines back into the document.

use tracing::{debug, trace};

use super::classifier::ResultMap;
use super::irregular::Candidate;
use super::slots::SlotKind;
use super::HeaderFooterCounts;
use crate::models::document::{Document, Line, LineType};

/// First page whose lines are counted. The pages before it are usually title
/// or cover pages; their lines are tagged but not counted.
const FIRST_COUNTED_PAGE_INDEX: usize = 2;

/// Give `line` the type `line_type` unless another classifier already claimed it.
///
/// Returns whether the line ends up with `line_type`.
fn upgrade(line: &mut Line, line_type: LineType) -> bool {
    if line.line_type == LineType::Body {
        line.line_type = line_type;
    }
    line.line_type == line_type
}

/// Apply the distance-based results and count the lines from the third page on.
pub fn apply_results(document: &mut Document, results: &ResultMap) -> HeaderFooterCounts {
    let mut counts = HeaderFooterCounts::default();

    for (&(page_idx, line_idx), &line_type) in results {
        let Some(line) = document
            .pages
            .get_mut(page_idx)
            .and_then(|page| page.lines.get_mut(line_idx))
        else {
            continue;
        };

        if !upgrade(line, line_type) {
            trace!(
                "page {} line {} keeps type {}",
                page_idx + 1,
                line_idx + 1,
                line.line_type
            );
            continue;
        }

        if page_idx >= FIRST_COUNTED_PAGE_INDEX {
            match line_type {
                LineType::Header => counts.header_lines += 1,
                LineType::Footer => counts.footer_lines += 1,
                _ => {}
            }
        }
    }

    debug!(
        "distance-based result: {} header lines, {} footer lines",
        counts.header_lines, counts.footer_lines
    );

    counts
}

/// Apply a page-counter sequence, one candidate per page.
///
/// Returns 1 if every counter line could be tagged, 0 if any of them was
/// already claimed by another line type. Unclaimed lines are tagged either way.
pub fn apply_irregular(document: &mut Document, sequence: &[Candidate], kind: SlotKind) -> usize {
    let line_type = kind.line_type();
    let mut count = 1;

    for (page, candidate) in document.pages.iter_mut().zip(sequence) {
        let tagged = page
            .lines
            .get_mut(candidate.line_index)
            .is_some_and(|line| upgrade(line, line_type));

        if !tagged {
            debug!(
                "page {} line {}: counter line already classified",
                page.page_no,
                candidate.line_index + 1
            );
            count = 0;
        }
    }

    debug!("irregular {:?} lines: {}", kind, count);

    count
}
