//! Min-cost frontier with FIFO tie-breaking and lazy deletion.
//!
//! Relaxation does not search the heap for the old entry. It pushes a new
//! entry and leaves the old one behind; the engine recognises leftovers on
//! pop because their key no longer matches the node's current key.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::{FrontierKey, NodeId};

/// `BinaryHeap` is a max-heap, so entries are wrapped in `Reverse` to pop
/// the lowest key first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    key: FrontierKey,
    node: NodeId,
}

#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    high_water: u64,
    pushed: u64,
}

impl Frontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: FrontierKey, node: NodeId) {
        self.heap.push(Reverse(FrontierEntry { key, node }));
        self.pushed += 1;
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the lowest `(cost, creation_order)` entry. May be stale.
    pub fn pop(&mut self) -> Option<(FrontierKey, NodeId)> {
        self.heap.pop().map(|Reverse(e)| (e.key, e.node))
    }

    /// Entries currently held, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest `len()` ever observed.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Total entries ever pushed.
    #[must_use]
    pub fn pushed(&self) -> u64 {
        self.pushed
    }
}
