//! Shared fixtures for the lock tests and the `solve_fixture` binary.

pub mod fixtures;
