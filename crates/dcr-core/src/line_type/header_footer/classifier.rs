//! Slot classification over the completed distance table.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::slots::{DistanceTable, SlotDistance, SlotKind};
use crate::models::config::LineTypeConfig;
use crate::models::document::LineType;

/// Line types resolved by the classifier, keyed by `(page_index, line_index)`.
pub type ResultMap = BTreeMap<(usize, usize), LineType>;

/// Decides which slots hold recurring headers or footers.
#[derive(Debug, Clone, Copy)]
pub struct SlotClassifier {
    header_max_distance: usize,
    footer_max_distance: usize,
}

impl SlotClassifier {
    /// Create a classifier using the distance thresholds of the configuration.
    pub fn new(config: &LineTypeConfig) -> Self {
        Self {
            header_max_distance: config.header_max_distance,
            footer_max_distance: config.footer_max_distance,
        }
    }

    /// Inclusive distance threshold for a slot kind.
    pub fn max_distance(&self, kind: SlotKind) -> usize {
        match kind {
            SlotKind::Header => self.header_max_distance,
            SlotKind::Footer => self.footer_max_distance,
        }
    }

    /// Whether a slot recurs on every page closely enough to be a header or footer.
    ///
    /// The first transition (cover page to page 2) and the last transition may
    /// lack a comparison. On documents with more than two pages they may also
    /// exceed the threshold. A slot without any comparison is empty.
    pub fn is_special(row: &[Option<SlotDistance>], max_distance: usize) -> bool {
        let transitions = row.len();
        let page_count = transitions + 1;
        let mut has_data = false;

        for (transition, entry) in row.iter().enumerate() {
            let at_boundary = transition == 0 || transition + 1 == transitions;

            match entry {
                None if at_boundary => {}
                None => return false,
                Some(entry) => {
                    has_data = true;
                    if entry.distance > max_distance && !(at_boundary && page_count > 2) {
                        return false;
                    }
                }
            }
        }

        has_data
    }

    /// Resolve every accepted slot into line coordinates.
    ///
    /// Header slots are resolved before footer slots, so a line reached by
    /// both ends up as a footer.
    pub fn classify(&self, table: &DistanceTable) -> ResultMap {
        let mut results = ResultMap::new();

        for slot in 0..table.slot_count() {
            let kind = table.slot_kind(slot);
            let max_distance = self.max_distance(kind);
            let row = table.row(slot);

            if !Self::is_special(row, max_distance) {
                trace!("slot {} ({:?}) rejected", slot, kind);
                continue;
            }

            debug!("slot {} accepted as {:?}", slot, kind);

            let line_type = kind.line_type();
            for (transition, entry) in row.iter().enumerate() {
                if let Some(entry) = entry {
                    if entry.distance <= max_distance {
                        results.insert((transition, entry.prev_line), line_type);
                        results.insert((transition + 1, entry.curr_line), line_type);
                    }
                }
            }
        }

        results
    }
}
