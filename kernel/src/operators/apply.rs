//! The move rules: how a state and an action become the next state.
//!
//! Each rule is its own function so it can be tested in isolation:
//!
//! 1. [`check_in_bounds`]: the destination lies inside the grid.
//! 2. [`check_not_wall`]: the destination is not a permanent wall.
//! 3. [`check_door`]: a door is entered only while holding its key.
//! 4. [`collect_effects`]: entering a key or treasure cell updates the facts.
//!
//! [`step`] runs them in that order for one direction; [`successors`] does it
//! for every direction of a [`DirectionOrder`], lazily. Nothing here mutates
//! its inputs.

use std::collections::HashMap;
use std::fmt;

use crate::carrier::grid::{CellKind, Grid, KeyId, Position};
use crate::carrier::state::{Cost, FactSet, PuzzleState, StateKey};
use crate::operators::action::{Action, ActionKind, Direction, DirectionOrder};

/// Why a move is not legal from a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfBounds {
        from: Position,
        direction: Direction,
    },
    Wall {
        at: Position,
    },
    DoorLocked {
        at: Position,
        door: KeyId,
    },
    /// The action carried a cost different from the destination's entry cost.
    CostMismatch {
        at: Position,
        expected: u32,
        found: u32,
    },
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { from, direction } => {
                write!(f, "moving {direction} from {from} leaves the grid")
            }
            Self::Wall { at } => write!(f, "{at} is a wall"),
            Self::DoorLocked { at, door } => {
                write!(f, "door {} at {at} is locked (needs key {door})", door.letter().to_ascii_uppercase())
            }
            Self::CostMismatch {
                at,
                expected,
                found,
            } => write!(f, "entering {at} costs {expected}, action says {found}"),
        }
    }
}

impl std::error::Error for MoveRejection {}

/// Rule 1: the cell one step in `direction` from `from`.
///
/// # Errors
///
/// [`MoveRejection::OutOfBounds`] at the edge of the grid.
pub fn check_in_bounds(
    grid: &Grid,
    from: Position,
    direction: Direction,
) -> Result<Position, MoveRejection> {
    let (d_row, d_col) = direction.delta();
    grid.offset(from, d_row, d_col)
        .ok_or(MoveRejection::OutOfBounds { from, direction })
}

/// Rule 2: the destination's kind and entry cost, unless it is a wall.
///
/// # Errors
///
/// [`MoveRejection::Wall`] for walls. A position outside the grid is also
/// reported as a wall; callers run [`check_in_bounds`] first.
pub fn check_not_wall(grid: &Grid, at: Position) -> Result<(CellKind, u32), MoveRejection> {
    grid.cell_kind(at)
        .and_then(|kind| kind.entry_cost().map(|cost| (kind, cost)))
        .ok_or(MoveRejection::Wall { at })
}

/// Rule 3: doors need their key.
///
/// # Errors
///
/// [`MoveRejection::DoorLocked`] when `kind` is a door and `facts` lacks its key.
pub fn check_door(kind: CellKind, facts: FactSet, at: Position) -> Result<(), MoveRejection> {
    match kind {
        CellKind::Door(door) if !facts.has_key(door) => {
            Err(MoveRejection::DoorLocked { at, door })
        }
        _ => Ok(()),
    }
}

/// Rule 4: the facts after entering `at`.
#[must_use]
pub fn collect_effects(grid: &Grid, kind: CellKind, at: Position, facts: FactSet) -> FactSet {
    match kind {
        CellKind::Key(key) => facts.with_key(key),
        CellKind::Treasure => grid
            .treasure_index(at)
            .map_or(facts, |index| facts.with_treasure(index)),
        CellKind::Open
        | CellKind::Wall
        | CellKind::Start
        | CellKind::Goal
        | CellKind::Restricted
        | CellKind::Door(_) => facts,
    }
}

/// Try one direction from `state`, producing the action and its result.
///
/// # Errors
///
/// The first rule that rejects the move.
pub fn step(
    grid: &Grid,
    state: &PuzzleState,
    direction: Direction,
) -> Result<(Action, PuzzleState), MoveRejection> {
    let to = check_in_bounds(grid, state.position(), direction)?;
    let (kind, cost) = check_not_wall(grid, to)?;
    check_door(kind, state.facts(), to)?;
    let facts = collect_effects(grid, kind, to, state.facts());
    let next = PuzzleState::from_parts(
        StateKey {
            position: to,
            facts,
        },
        state.cost() + Cost::from(cost),
    );
    Ok((Action::step(direction, cost), next))
}

/// Apply a previously recorded action, checking its cost as well as the rules.
///
/// # Errors
///
/// Any [`MoveRejection`], including [`MoveRejection::CostMismatch`] when
/// the action's cost is not the destination's entry cost.
pub fn apply_action(
    grid: &Grid,
    state: &PuzzleState,
    action: Action,
) -> Result<PuzzleState, MoveRejection> {
    match action.kind {
        ActionKind::Move(direction) => {
            let (taken, next) = step(grid, state, direction)?;
            if taken.cost != action.cost {
                return Err(MoveRejection::CostMismatch {
                    at: next.position(),
                    expected: taken.cost,
                    found: action.cost,
                });
            }
            Ok(next)
        }
    }
}

impl PuzzleState {
    /// The state `action` leads to from `self`.
    ///
    /// # Errors
    ///
    /// See [`apply_action`].
    pub fn successor(&self, action: Action, grid: &Grid) -> Result<Self, MoveRejection> {
        apply_action(grid, self, action)
    }
}

/// Best costs already known for state identities. Used only for advisory
/// pruning; the search engine's own table stays authoritative.
pub trait KnownCosts {
    fn known_cost(&self, key: &StateKey) -> Option<Cost>;
}

/// Knows nothing; prunes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKnownCosts;

impl KnownCosts for NoKnownCosts {
    fn known_cost(&self, _key: &StateKey) -> Option<Cost> {
        None
    }
}

impl KnownCosts for HashMap<StateKey, Cost> {
    fn known_cost(&self, key: &StateKey) -> Option<Cost> {
        self.get(key).copied()
    }
}

/// Lazy, deterministic successor sequence for one state.
///
/// Yields `(Action, PuzzleState)` in [`DirectionOrder`] order, skipping
/// illegal moves. With [`Successors::pruned_by`], also skips successors
/// whose identity already has a known cost no greater than theirs.
pub struct Successors<'a> {
    grid: &'a Grid,
    from: PuzzleState,
    order: [Direction; 4],
    next: usize,
    known: Option<&'a dyn KnownCosts>,
    rejected: u64,
    pruned: u64,
}

/// Successors of `state` in `order`.
#[must_use]
pub fn successors<'a>(
    grid: &'a Grid,
    state: &PuzzleState,
    order: &DirectionOrder,
) -> Successors<'a> {
    Successors {
        grid,
        from: *state,
        order: order.as_array(),
        next: 0,
        known: None,
        rejected: 0,
        pruned: 0,
    }
}

impl<'a> Successors<'a> {
    #[must_use]
    pub fn pruned_by(mut self, known: &'a dyn KnownCosts) -> Self {
        self.known = Some(known);
        self
    }

    /// Moves rejected by the rules so far.
    #[must_use]
    pub const fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Legal successors dropped by advisory pruning so far.
    #[must_use]
    pub const fn pruned(&self) -> u64 {
        self.pruned
    }
}

impl Iterator for Successors<'_> {
    type Item = (Action, PuzzleState);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&direction) = self.order.get(self.next) {
            self.next += 1;
            let Ok((action, state)) = step(self.grid, &self.from, direction) else {
                self.rejected += 1;
                continue;
            };
            let dominated = self
                .known
                .and_then(|known| known.known_cost(&state.key()))
                .is_some_and(|best| best <= state.cost());
            if dominated {
                self.pruned += 1;
                continue;
            }
            return Some((action, state));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len() - self.next))
    }
}
