//! Search worlds built from loaded maps.

pub mod grid_world;
