//! gridwalk search: deterministic uniform-cost search over puzzle states.
//!
//! Depends only on `gridwalk_kernel`; the harness depends on this crate,
//! never the other way round.
//!
//! ```text
//! gridwalk_kernel  ←  gridwalk_search  ←  gridwalk_harness
//! (grid, rules)       (engine, paths)     (maps, runner, CLI)
//! ```
//!
//! # Key types
//!
//! - [`SearchEngine`](search::SearchEngine): one search, run once
//! - [`SearchWorld`](contract::SearchWorld): what the engine explores
//! - [`SearchPolicy`](policy::SearchPolicy): budget, direction order, pruning
//! - [`PredecessorTable`](table::PredecessorTable): best cost and parent link per state
//! - [`Solution`](path::Solution): the reconstructed path
//! - [`SearchStats`](report::SearchStats): counters and termination reason

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod node;
pub mod path;
pub mod policy;
pub mod report;
pub mod search;
pub mod table;
