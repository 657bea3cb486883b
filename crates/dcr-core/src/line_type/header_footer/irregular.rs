//! Detection of page counters in header and footer slots.
//!
//! A running page number ("Page 7", "Report 2022 - 7") changes on every
//! page, so the edit-distance comparison may reject it. Such a slot is
//! recognised instead by its trailing number growing by exactly one from one
//! page to the next.

use tracing::debug;

use super::slots::{SlotKind, SlotLine};

/// A hypothesised page-counter line on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// 0-based index of the line on its page.
    pub line_index: usize,
    /// Value of the trailing number.
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CounterState {
    /// Numbered lines of the first page, waiting for the second page.
    Collecting(Vec<Candidate>),
    /// One candidate per page so far, values ascending by one.
    Confirmed(Vec<Candidate>),
    /// The counter sequence broke; never re-enabled for this document.
    Disabled,
}

/// Tracks the page-counter hypothesis of one slot kind across a document.
#[derive(Debug, Clone)]
pub struct IrregularDetector {
    kind: SlotKind,
    state: CounterState,
}

impl IrregularDetector {
    /// Create a detector for the header or the footer slots.
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            state: CounterState::Collecting(Vec::new()),
        }
    }

    /// Slot kind watched by this detector.
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Whether the counter hypothesis is still alive.
    pub fn is_active(&self) -> bool {
        self.state != CounterState::Disabled
    }

    /// Feed the filled slots of a page, nearest to the page edge first.
    pub fn observe<'a, I>(&mut self, page_idx: usize, slots: I)
    where
        I: IntoIterator<Item = SlotLine<'a>>,
    {
        let numbered: Vec<Candidate> = slots
            .into_iter()
            .filter_map(|slot| {
                counter_value(slot.text).map(|value| Candidate {
                    line_index: slot.line_index,
                    value,
                })
            })
            .collect();

        self.state = match std::mem::replace(&mut self.state, CounterState::Disabled) {
            CounterState::Disabled => CounterState::Disabled,
            CounterState::Collecting(_) if page_idx == 0 => {
                if numbered.is_empty() {
                    self.disable(page_idx, "no numbered line on the first page");
                    CounterState::Disabled
                } else {
                    CounterState::Collecting(numbered)
                }
            }
            CounterState::Collecting(first_page) => {
                let matched = numbered.iter().find_map(|current| {
                    first_page
                        .iter()
                        .find(|first| first.value.checked_add(1) == Some(current.value))
                        .map(|first| (*first, *current))
                });

                match matched {
                    Some((first, current)) => CounterState::Confirmed(vec![first, current]),
                    None => {
                        self.disable(page_idx, "no number continues the first page");
                        CounterState::Disabled
                    }
                }
            }
            CounterState::Confirmed(mut sequence) => {
                if numbered.is_empty() {
                    // No counter on this page; the sequence is left as it is.
                    CounterState::Confirmed(sequence)
                } else {
                    let expected = sequence.last().and_then(|last| last.value.checked_add(1));
                    match numbered.iter().find(|c| Some(c.value) == expected) {
                        Some(current) => {
                            sequence.push(*current);
                            CounterState::Confirmed(sequence)
                        }
                        None => {
                            self.disable(page_idx, "counter sequence broken");
                            CounterState::Disabled
                        }
                    }
                }
            }
        };
    }

    /// The confirmed counter lines, one per page, if every page of the document has one.
    pub fn sequence(&self, page_count: usize) -> Option<&[Candidate]> {
        match &self.state {
            CounterState::Confirmed(sequence) if sequence.len() == page_count => Some(sequence),
            _ => None,
        }
    }

    fn disable(&self, page_idx: usize, reason: &str) {
        debug!(
            "irregular {:?} detection disabled on page {}: {}",
            self.kind,
            page_idx + 1,
            reason
        );
    }
}

/// Value of the last whitespace-separated token, if it is an integer.
fn counter_value(text: &str) -> Option<i64> {
    text.split_whitespace().last()?.parse().ok()
}
