//! Search statistics and termination reasons, with canonical JSON output.

use std::fmt;

use serde_json::{json, Value};

use gridwalk_kernel::carrier::state::Cost;
use gridwalk_kernel::proof::canon::{canonical_json_bytes, canonical_json_hash, CanonError};
use gridwalk_kernel::proof::hash::{ContentHash, HashDomain};

use crate::node::NodeId;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A goal state was popped from the frontier.
    GoalReached { node: NodeId, cost: Cost },
    /// The frontier emptied without reaching a goal.
    FrontierExhausted,
    /// The expansion budget ran out first.
    ExpansionBudgetExceeded { budget: u64 },
}

impl TerminationReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded { .. } => "expansion_budget_exceeded",
        }
    }

    fn to_json(self) -> Value {
        match self {
            Self::GoalReached { node, cost } => {
                json!({"cost": cost, "node": node.index(), "type": self.as_str()})
            }
            Self::FrontierExhausted => json!({"type": self.as_str()}),
            Self::ExpansionBudgetExceeded { budget } => {
                json!({"budget": budget, "type": self.as_str()})
            }
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoalReached { node, cost } => write!(f, "goal reached at {node} (cost {cost})"),
            Self::FrontierExhausted => f.write_str("frontier exhausted"),
            Self::ExpansionBudgetExceeded { budget } => {
                write!(f, "expansion budget of {budget} exceeded")
            }
        }
    }
}

/// Counters for one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStats {
    pub world_id: String,
    pub expansions: u64,
    /// Distinct state identities recorded (root included).
    pub nodes_created: u64,
    /// Successors handed to the engine by the world.
    pub successors_generated: u64,
    /// Successors discarded because an equal-or-cheaper path was known.
    pub duplicates_suppressed: u64,
    /// Successors the move generator pruned before the engine saw them.
    pub successors_pruned: u64,
    /// Known states reached again more cheaply.
    pub relaxations: u64,
    /// Frontier entries skipped on pop because a relaxation superseded them.
    pub stale_entries_skipped: u64,
    pub frontier_high_water: u64,
    /// Frontier entries ever pushed: one per insertion plus one per relaxation.
    pub frontier_pushes: u64,
    pub termination: TerminationReason,
}

impl SearchStats {
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "world_id": self.world_id,
            "expansions": self.expansions,
            "nodes_created": self.nodes_created,
            "successors_generated": self.successors_generated,
            "duplicates_suppressed": self.duplicates_suppressed,
            "successors_pruned": self.successors_pruned,
            "relaxations": self.relaxations,
            "stale_entries_skipped": self.stale_entries_skipped,
            "frontier_high_water": self.frontier_high_water,
            "frontier_pushes": self.frontier_pushes,
            "termination": self.termination.to_json(),
        })
    }

    /// # Errors
    ///
    /// Only on a float in the JSON, which these counters never produce.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// # Errors
    ///
    /// See [`SearchStats::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        canonical_json_hash(HashDomain::SearchStats, &self.to_json_value())
    }
}
