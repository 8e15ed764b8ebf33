//! Gridwalk harness: everything between a map file and a verified answer.
//!
//! Loads text maps into kernel grids, wraps them as a [`SearchWorld`]
//! (`worlds::grid_world`), runs the search engine and replays the solution
//! through the kernel move rules before reporting it.
//!
//! [`SearchWorld`]: gridwalk_search::contract::SearchWorld

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod map_text;
pub mod runner;
pub mod worlds;
