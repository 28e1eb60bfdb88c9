//! Insertion-sorted queue of tree nodes used while building a Huffman tree.
//!
//! Entries are ranked by `(frequency, symbol)`. An internal node carries the
//! symbol it inherited from one of its children, so the same ranking applies
//! to leaves and internal nodes alike. Encoder and decoder both depend on this
//! order to rebuild the same tree from the same frequencies.

use std::cmp::Ordering;

use log::trace;

use crate::huffman::NodeId;

/// A queued reference to a node in the tree arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub freq: u64,
    pub symbol: u8,
    pub node: NodeId,
}

impl Entry {
    fn rank(&self, other: &Self) -> Ordering {
        self.freq
            .cmp(&other.freq)
            .then(self.symbol.cmp(&other.symbol))
    }
}

#[derive(Debug, Default)]
pub struct PriorityList {
    entries: Vec<Entry>,
}

impl PriorityList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts `entry` in front of the first entry that ranks above it.
    ///
    /// Linear scan; the alphabet holds at most 256 symbols.
    pub fn insert(&mut self, entry: Entry) {
        let position = self
            .entries
            .iter()
            .position(|queued| queued.rank(&entry) == Ordering::Greater)
            .unwrap_or(self.entries.len());
        trace!(
            "Queueing node {:?} (freq {}, symbol {:#04x}) at position {}",
            entry.node, entry.freq, entry.symbol, position
        );
        self.entries.insert(position, entry);
    }

    /// Removes the lowest-ranked entry.
    pub fn pop_min(&mut self) -> Option<Entry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from lowest to highest rank.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}
