//! Search world contract trait.

use gridwalk_kernel::carrier::state::PuzzleState;
use gridwalk_kernel::operators::action::{Action, DirectionOrder};
use gridwalk_kernel::operators::apply::KnownCosts;

/// Successors of one state, plus how many legal ones advisory pruning dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub successors: Vec<(Action, PuzzleState)>,
    pub pruned: u64,
}

/// Trait for worlds the engine can explore.
///
/// # Contract
///
/// - `expand` is deterministic: the same `(state, order)` yields the same
///   successors in the same order.
/// - A successor's cost is never below its parent's cost.
/// - When `known` is given, `expand` may drop successors whose identity has
///   a known cost no greater than theirs, and must count them in
///   [`Expansion::pruned`].
pub trait SearchWorld {
    /// Stable identifier, used in logs and reports.
    fn world_id(&self) -> &str;

    /// The designated starting state.
    fn initial_state(&self) -> PuzzleState;

    /// Whether `state` could occur in this world at all.
    fn validate_state(&self, state: &PuzzleState) -> bool;

    fn expand(
        &self,
        state: &PuzzleState,
        order: &DirectionOrder,
        known: Option<&dyn KnownCosts>,
    ) -> Expansion;

    fn is_goal(&self, state: &PuzzleState) -> bool;
}
