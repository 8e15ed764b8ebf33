//! Replay: re-run recorded actions through the move rules.
//!
//! A solution is trustworthy only if its actions, applied from the initial
//! state, reproduce the states it claims. [`replay`] produces that state
//! sequence; [`verify_states`] compares it against a recorded one.

use std::fmt;

use crate::carrier::grid::Grid;
use crate::carrier::state::PuzzleState;
use crate::operators::action::Action;
use crate::operators::apply::{apply_action, MoveRejection};

/// The actions could not be replayed at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The starting state is off the grid, on a wall, or carries facts the
    /// grid cannot produce.
    InvalidInitialState { state: String },
    /// Action `step` (0-based) is illegal from the state before it.
    IllegalAction {
        step: usize,
        action: Action,
        rejection: MoveRejection,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInitialState { state } => {
                write!(f, "replay cannot start from invalid state {state}")
            }
            Self::IllegalAction {
                step,
                action,
                rejection,
            } => write!(f, "step {step}: {action} rejected: {rejection}"),
        }
    }
}

impl std::error::Error for ReplayError {}

/// Outcome of comparing a replay against a recorded state sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayVerdict {
    Match,
    /// First index where the replayed and recorded states differ in
    /// identity or cost.
    Divergence {
        index: usize,
        recorded: String,
        replayed: String,
    },
    LengthMismatch {
        recorded: usize,
        replayed: usize,
    },
}

/// States visited by applying `actions` from `initial`, `initial` first.
///
/// # Errors
///
/// [`ReplayError`] if `initial` is invalid for `grid` or any action is
/// rejected by the move rules (including a wrong recorded cost).
pub fn replay(
    grid: &Grid,
    initial: &PuzzleState,
    actions: &[Action],
) -> Result<Vec<PuzzleState>, ReplayError> {
    if !initial.is_valid_for(grid) {
        return Err(ReplayError::InvalidInitialState {
            state: initial.to_string(),
        });
    }
    let mut states = Vec::with_capacity(actions.len() + 1);
    let mut current = *initial;
    states.push(current);
    for (step, action) in actions.iter().enumerate() {
        current = apply_action(grid, &current, *action).map_err(|rejection| {
            ReplayError::IllegalAction {
                step,
                action: *action,
                rejection,
            }
        })?;
        states.push(current);
    }
    Ok(states)
}

/// Replay `actions` and compare with `recorded` (which includes the initial state).
///
/// # Errors
///
/// Same as [`replay`].
pub fn verify_states(
    grid: &Grid,
    initial: &PuzzleState,
    actions: &[Action],
    recorded: &[PuzzleState],
) -> Result<ReplayVerdict, ReplayError> {
    let replayed = replay(grid, initial, actions)?;
    for (index, (want, got)) in recorded.iter().zip(&replayed).enumerate() {
        if want.key() != got.key() || want.cost() != got.cost() {
            return Ok(ReplayVerdict::Divergence {
                index,
                recorded: want.to_string(),
                replayed: got.to_string(),
            });
        }
    }
    if recorded.len() != replayed.len() {
        return Ok(ReplayVerdict::LengthMismatch {
            recorded: recorded.len(),
            replayed: replayed.len(),
        });
    }
    Ok(ReplayVerdict::Match)
}
