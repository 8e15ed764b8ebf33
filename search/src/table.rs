//! The node table: one [`SearchNode`] per distinct state identity.
//!
//! Nodes live in an arena addressed by [`NodeId`]; a `HashMap` keyed by
//! [`StateKey`] finds a state's node. Keying by value rather than by
//! reference is what turns the cyclic state graph into a finite table.

use std::collections::HashMap;

use gridwalk_kernel::carrier::state::{Cost, PuzzleState, StateKey};
use gridwalk_kernel::operators::apply::KnownCosts;

use crate::node::{NodeId, PredecessorLink, SearchNode};

/// What [`PredecessorTable::record`] did with a successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// First time this identity was seen.
    Inserted(NodeId),
    /// Strictly cheaper than the recorded cost; cost and predecessor replaced.
    Relaxed(NodeId),
    /// Recorded cost was equal or lower; nothing changed.
    Dominated(NodeId),
}

#[derive(Debug, Default)]
pub struct PredecessorTable {
    nodes: Vec<SearchNode>,
    index: HashMap<StateKey, NodeId>,
    root: Option<NodeId>,
}

impl PredecessorTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the search root. Its predecessor is `None`.
    pub fn insert_root(&mut self, state: PuzzleState, creation_order: u64) -> NodeId {
        let id = self.push_node(SearchNode {
            state,
            predecessor: None,
            closed: false,
            creation_order,
        });
        self.root = Some(id);
        id
    }

    /// Offer a successor reached via `link`.
    pub fn record(
        &mut self,
        state: PuzzleState,
        link: PredecessorLink,
        creation_order: u64,
    ) -> Record {
        let Some(&id) = self.index.get(&state.key()) else {
            return Record::Inserted(self.push_node(SearchNode {
                state,
                predecessor: Some(link),
                closed: false,
                creation_order,
            }));
        };
        let node = &mut self.nodes[id.index()];
        if state.cost() < node.best_cost() {
            node.state = state;
            node.predecessor = Some(link);
            node.closed = false;
            node.creation_order = creation_order;
            Record::Relaxed(id)
        } else {
            Record::Dominated(id)
        }
    }

    /// Append a node as-is and index it by its state key.
    pub(crate) fn push_node(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index.insert(node.state.key(), id);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut SearchNode> {
        self.nodes.get_mut(id.index())
    }

    #[must_use]
    pub fn lookup(&self, key: &StateKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of distinct state identities seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

impl KnownCosts for PredecessorTable {
    fn known_cost(&self, key: &StateKey) -> Option<Cost> {
        self.lookup(key)
            .and_then(|id| self.get(id))
            .map(SearchNode::best_cost)
    }
}
