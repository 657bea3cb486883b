//! Per-slot line history and the page-to-page distance table.
//!
//! A slot is a fixed line position counted from the top (header slots) or
//! from the bottom (footer slots) of every page. While the document is
//! scanned, each slot keeps the line it held on the current and on the
//! previous page so the two can be compared.

use tracing::trace;

use super::distance::edit_distance;
use crate::models::document::{Line, LineType};

/// Whether a slot counts from the top or from the bottom of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Header,
    Footer,
}

impl SlotKind {
    /// Line type assigned to lines recognised in a slot of this kind.
    pub fn line_type(self) -> LineType {
        match self {
            SlotKind::Header => LineType::Header,
            SlotKind::Footer => LineType::Footer,
        }
    }
}

/// A line occupying a slot on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLine<'a> {
    /// 0-based index of the line on its page.
    pub line_index: usize,
    /// Line text.
    pub text: &'a str,
}

#[derive(Debug, Default)]
struct SlotPair<'a> {
    current: Option<SlotLine<'a>>,
    previous: Option<SlotLine<'a>>,
}

/// Comparison of one slot between two consecutive pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDistance {
    /// Line index on the earlier page.
    pub prev_line: usize,
    /// Line index on the later page.
    pub curr_line: usize,
    /// Edit distance between the two texts.
    pub distance: usize,
}

/// Distances per slot and page transition.
///
/// Transition `t` compares page `t` with page `t + 1`. `None` means the slot
/// was empty on at least one of the two pages.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    header_slots: usize,
    rows: Vec<Vec<Option<SlotDistance>>>,
}

impl DistanceTable {
    /// Create an empty table for a document with `page_count` pages.
    pub fn new(header_slots: usize, footer_slots: usize, page_count: usize) -> Self {
        Self {
            header_slots,
            rows: vec![vec![None; page_count.saturating_sub(1)]; header_slots + footer_slots],
        }
    }

    /// Total number of slots, header slots first.
    pub fn slot_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of page transitions.
    pub fn transition_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Kind of the slot at the given row.
    pub fn slot_kind(&self, slot: usize) -> SlotKind {
        if slot < self.header_slots {
            SlotKind::Header
        } else {
            SlotKind::Footer
        }
    }

    /// Distances of one slot over all transitions.
    pub fn row(&self, slot: usize) -> &[Option<SlotDistance>] {
        &self.rows[slot]
    }

    /// Record the comparison of a slot for a transition.
    pub fn record(&mut self, slot: usize, transition: usize, entry: SlotDistance) {
        self.rows[slot][transition] = Some(entry);
    }
}

/// Current/previous line history of every slot, plus the distance table it feeds.
#[derive(Debug)]
pub struct SlotBuffer<'a> {
    header_slots: usize,
    footer_slots: usize,
    slots: Vec<SlotPair<'a>>,
    table: DistanceTable,
}

impl<'a> SlotBuffer<'a> {
    /// Create an empty buffer for a document with `page_count` pages.
    pub fn new(header_slots: usize, footer_slots: usize, page_count: usize) -> Self {
        Self {
            header_slots,
            footer_slots,
            slots: (0..header_slots + footer_slots)
                .map(|_| SlotPair::default())
                .collect(),
            table: DistanceTable::new(header_slots, footer_slots, page_count),
        }
    }

    /// Fill the current-page side of every slot from the lines of a page.
    ///
    /// Slots reaching past the number of lines on the page stay empty.
    pub fn load_page(&mut self, lines: &'a [Line]) {
        let line_count = lines.len();

        for k in 0..self.header_slots.min(line_count) {
            self.slots[k].current = Some(SlotLine {
                line_index: k,
                text: &lines[k].text,
            });
        }

        for k in 0..self.footer_slots.min(line_count) {
            let line_index = line_count - 1 - k;
            self.slots[self.header_slots + k].current = Some(SlotLine {
                line_index,
                text: &lines[line_index].text,
            });
        }
    }

    /// Filled slots of one kind on the current page, nearest to the page edge first.
    pub fn current(&self, kind: SlotKind) -> impl Iterator<Item = SlotLine<'a>> + '_ {
        let range = match kind {
            SlotKind::Header => 0..self.header_slots,
            SlotKind::Footer => self.header_slots..self.header_slots + self.footer_slots,
        };
        self.slots[range].iter().filter_map(|pair| pair.current)
    }

    /// Compare the current page with the previous one and rotate the history.
    pub fn finish_page(&mut self, page_idx: usize) {
        if page_idx > 0 {
            let transition = page_idx - 1;
            for (slot, pair) in self.slots.iter().enumerate() {
                if let (Some(prev), Some(curr)) = (pair.previous, pair.current) {
                    let distance = edit_distance(prev.text, curr.text);
                    trace!(
                        "slot {} transition {}: {:?} -> {:?} distance={}",
                        slot, transition, prev.text, curr.text, distance
                    );
                    self.table.record(
                        slot,
                        transition,
                        SlotDistance {
                            prev_line: prev.line_index,
                            curr_line: curr.line_index,
                            distance,
                        },
                    );
                }
            }
        }

        for pair in &mut self.slots {
            pair.previous = pair.current.take();
        }
    }

    /// Consume the buffer, returning the completed distance table.
    pub fn into_table(self) -> DistanceTable {
        self.table
    }
}
