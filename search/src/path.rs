//! Path reconstruction: predecessor links back to an ordered solution.

use std::fmt;

use serde_json::{json, Value};

use gridwalk_kernel::carrier::state::{Cost, PuzzleState};
use gridwalk_kernel::operators::action::Action;
use gridwalk_kernel::proof::canon::{canonical_json_bytes, canonical_json_hash, CanonError};
use gridwalk_kernel::proof::hash::{ContentHash, HashDomain};

use crate::node::NodeId;
use crate::table::PredecessorTable;

/// A predecessor chain that does not lead back to the root.
///
/// Always an engine bug; never caused by user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokenChainError {
    /// A non-root node has no recorded predecessor.
    MissingPredecessor { node: NodeId },
    /// A link points at a node the table does not hold.
    UnknownNode { node: NodeId },
    /// The walk visited more nodes than the table holds.
    Cycle { node: NodeId, walked: usize },
}

impl fmt::Display for BrokenChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPredecessor { node } => {
                write!(f, "node {node} is not the root but has no predecessor")
            }
            Self::UnknownNode { node } => write!(f, "node {node} is not in the table"),
            Self::Cycle { node, walked } => {
                write!(f, "predecessor chain loops at {node} after {walked} links")
            }
        }
    }
}

impl std::error::Error for BrokenChainError {}

/// One step of a solution: the action taken and the state it led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionStep {
    pub action: Action,
    pub state: PuzzleState,
}

/// An ordered path from the initial state to a goal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub initial: PuzzleState,
    pub steps: Vec<SolutionStep>,
}

impl Solution {
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.steps.iter().map(|s| s.action)
    }

    /// Every state on the path, initial first.
    pub fn states(&self) -> impl Iterator<Item = PuzzleState> + '_ {
        std::iter::once(self.initial).chain(self.steps.iter().map(|s| s.state))
    }

    #[must_use]
    pub fn final_state(&self) -> PuzzleState {
        self.steps.last().map_or(self.initial, |s| s.state)
    }

    #[must_use]
    pub fn total_cost(&self) -> Cost {
        self.final_state().cost()
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "initial": state_to_json(&self.initial),
            "steps": self.steps.iter().map(|s| json!({
                "action": s.action.label(),
                "action_cost": s.action.cost,
                "state": state_to_json(&s.state),
            })).collect::<Vec<_>>(),
            "total_cost": self.total_cost(),
            "length": self.len(),
        })
    }

    /// # Errors
    ///
    /// Only if the JSON carries a float, which this type never produces.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical JSON; equal digests mean byte-identical solutions.
    ///
    /// # Errors
    ///
    /// See [`Solution::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        canonical_json_hash(HashDomain::Solution, &self.to_json_value())
    }
}

/// JSON form of one state, shared by solution and visual output.
#[must_use]
pub fn state_to_json(state: &PuzzleState) -> Value {
    json!({
        "row": state.position().row,
        "col": state.position().col,
        "keys": state.facts().key_letters(),
        "treasures": state.facts().treasure_bits(),
        "cost": state.cost(),
    })
}

/// Walk predecessor links from `goal` back to the root and return the path
/// in forward order.
///
/// # Errors
///
/// [`BrokenChainError`] when the chain is not a finite path to the root.
pub fn reconstruct(goal: NodeId, table: &PredecessorTable) -> Result<Solution, BrokenChainError> {
    let root = table.root();
    let mut steps = Vec::new();
    let mut current = goal;
    loop {
        let node = table
            .get(current)
            .ok_or(BrokenChainError::UnknownNode { node: current })?;
        if Some(current) == root {
            steps.reverse();
            return Ok(Solution {
                initial: node.state,
                steps,
            });
        }
        let link = node
            .predecessor
            .ok_or(BrokenChainError::MissingPredecessor { node: current })?;
        if steps.len() >= table.len() {
            return Err(BrokenChainError::Cycle {
                node: current,
                walked: steps.len(),
            });
        }
        steps.push(SolutionStep {
            action: link.action,
            state: node.state,
        });
        current = link.parent;
    }
}
