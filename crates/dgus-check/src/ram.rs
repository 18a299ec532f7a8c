// crates/dgus-check/src/ram.rs
//! Global model of the VP register RAM: every bound region of every record,
//! ordered by address.

use std::fmt;

use dgus_core::{DisplayRecord, Firmware, RecordKind, RecordRef, VpRegion};

/// Record kinds allowed to share one VP region.
static EXEMPT_PAIRS: &[(RecordKind, RecordKind)] = &[
    // increment buttons next to the value they change
    (RecordKind::Increment, RecordKind::Numeric),
    // min/max buttons of a slider
    (RecordKind::TouchSlider, RecordKind::Button),
    // track icon of a slider
    (RecordKind::DisplaySlider, RecordKind::Icon),
];

pub fn is_exempt_pair(a: RecordKind, b: RecordKind) -> bool {
    EXEMPT_PAIRS
        .iter()
        .any(|&(x, y)| (a, b) == (x, y) || (a, b) == (y, x))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RamOwner<'a> {
    Record(RecordRef<'a>),
    /// Auxiliary pointer block of a bit icon.
    AuxPointer(&'a DisplayRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamEntry<'a> {
    pub vp: VpRegion,
    pub owner: RamOwner<'a>,
}

impl RamEntry<'_> {
    pub fn kind(&self) -> RecordKind {
        match self.owner {
            RamOwner::Record(record) => record.kind(),
            RamOwner::AuxPointer(_) => RecordKind::AuxPointer,
        }
    }

    pub fn is_aux_pointer(&self) -> bool {
        matches!(self.owner, RamOwner::AuxPointer(_))
    }
}

impl fmt::Display for RamEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            RamOwner::Record(record) => fmt::Display::fmt(&record, f),
            RamOwner::AuxPointer(record) => write!(f, "AUX_PTR of [{}]", record),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RamModel<'a> {
    entries: Vec<RamEntry<'a>>,
}

impl<'a> RamModel<'a> {
    pub fn build(firmware: &'a Firmware) -> Self {
        let aux_pointers = firmware.display.iter().filter_map(|record| {
            record.aux_pointer().map(|vp| RamEntry {
                vp,
                owner: RamOwner::AuxPointer(record),
            })
        });
        let mut entries: Vec<RamEntry<'a>> = firmware
            .records()
            .map(|record| RamEntry {
                vp: record.vp(),
                owner: RamOwner::Record(record),
            })
            .chain(aux_pointers)
            .filter(|entry| entry.vp.is_bound())
            .collect();
        // stable: equal addresses keep display, touch, aux order
        entries.sort_by_key(|entry| entry.vp.addr);
        Self { entries }
    }

    pub fn entries(&self) -> &[RamEntry<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adjacent `(previous, current)` pairs in address order.
    pub fn adjacent(&self) -> impl Iterator<Item = (&RamEntry<'a>, &RamEntry<'a>)> {
        self.entries.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_pairs_are_unordered() {
        assert!(is_exempt_pair(RecordKind::Numeric, RecordKind::Increment));
        assert!(is_exempt_pair(RecordKind::Button, RecordKind::TouchSlider));
        assert!(is_exempt_pair(RecordKind::DisplaySlider, RecordKind::Icon));
        assert!(!is_exempt_pair(RecordKind::TouchSlider, RecordKind::Icon));
        assert!(!is_exempt_pair(RecordKind::Button, RecordKind::Button));
    }
}
