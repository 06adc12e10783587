//! Anchor segmentation.
//!
//! Walks normalized text line by line, looking only for the next title in
//! catalog order. A title that shows up early or late is ordinary body text
//! of whatever section is open; there is no backtracking.

use log::trace;

use crate::catalog::{Anchor, AnchorCatalog};

/// The text under one matched anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'c> {
    pub anchor: &'c Anchor,
    /// The title line and every following line up to the next anchor's
    /// title line, each prefixed with `\n`.
    pub text: String,
}

/// Scan position within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No anchor matched yet; waiting for this index.
    Seeking(usize),
    /// Section at this index is open; waiting for the next index.
    Accumulating(usize),
    /// Terminal anchor matched or nothing to look for.
    Done,
}

impl ScanState {
    fn expected(self) -> Option<usize> {
        match self {
            ScanState::Seeking(i) => Some(i),
            ScanState::Accumulating(i) => Some(i + 1),
            ScanState::Done => None,
        }
    }
}

/// Split text into sections keyed by the catalog's titles, in catalog order.
///
/// Matching the catalog's last entry closes the open section and stops the
/// scan; the last entry never gets a section of its own. A section still open
/// at the end of the text is kept.
pub fn segment<'c>(text: &str, catalog: &'c AnchorCatalog) -> Vec<Section<'c>> {
    let anchors = catalog.anchors();
    let last = anchors.len().saturating_sub(1);

    let mut sections = Vec::new();
    let mut chunk = String::new();
    let mut state = if anchors.is_empty() {
        ScanState::Done
    } else {
        ScanState::Seeking(0)
    };

    for line in text.lines() {
        let Some(expected) = state.expected() else {
            break;
        };

        if line.contains(anchors[expected].title.as_str()) {
            if let ScanState::Accumulating(open) = state {
                sections.push(Section {
                    anchor: &anchors[open],
                    text: std::mem::take(&mut chunk),
                });
            }

            state = if expected == last {
                ScanState::Done
            } else {
                ScanState::Accumulating(expected)
            };
            trace!("anchor {:?} matched, now {:?}", anchors[expected].title, state);
        }

        if let ScanState::Accumulating(_) = state {
            chunk.push('\n');
            chunk.push_str(line);
        }
    }

    if let ScanState::Accumulating(open) = state {
        sections.push(Section {
            anchor: &anchors[open],
            text: chunk,
        });
    }

    sections
}
