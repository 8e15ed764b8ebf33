//! gridwalk kernel: the board, puzzle states, and the move rules.
//!
//! # API Surface
//!
//! - [`carrier::grid::Grid::load`]: validate a board
//! - [`carrier::state::PuzzleState::initial`]: the designated start state
//! - [`operators::apply::successors`]: legal moves from a state, lazily
//! - [`proof::replay::replay`]: re-apply recorded actions through the rules
//!
//! # Module Layout
//!
//! `carrier` holds data (grid, state), `operators` holds the move rules,
//! `proof` holds canonical hashing, canonical JSON and replay. `carrier`
//! uses `proof::hash` for fingerprints; nothing else points backwards.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod operators;
pub mod proof;
