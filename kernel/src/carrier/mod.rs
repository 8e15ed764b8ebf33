//! Carrier module: the static board and the state values searched over.

pub mod grid;
pub mod state;
