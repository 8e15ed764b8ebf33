//! Search nodes and the frontier ordering key.

use std::fmt;

use gridwalk_kernel::carrier::state::{Cost, PuzzleState};
use gridwalk_kernel::operators::action::Action;

/// Index of a node in its [`PredecessorTable`](crate::table::PredecessorTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// How a node was reached: from `parent` by taking `action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredecessorLink {
    pub parent: NodeId,
    pub action: Action,
}

/// Engine bookkeeping for one distinct state identity.
///
/// `state.cost()` is the best cost seen so far; relaxation replaces `state`
/// and `predecessor` together.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: PuzzleState,
    /// `None` only for the root.
    pub predecessor: Option<PredecessorLink>,
    /// Expanded at its current best cost.
    pub closed: bool,
    /// Creation order of the frontier entry that carries the current best cost.
    pub creation_order: u64,
}

impl SearchNode {
    #[must_use]
    pub fn best_cost(&self) -> Cost {
        self.state.cost()
    }

    /// The frontier key for this node's current best cost.
    #[must_use]
    pub fn frontier_key(&self) -> FrontierKey {
        FrontierKey {
            cost: self.best_cost(),
            creation_order: self.creation_order,
        }
    }
}

/// The frontier ordering key: `(cost, creation_order)`.
///
/// Lower cost first; equal costs leave in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrontierKey {
    pub cost: Cost,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cost
            .cmp(&other.cost)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
