//! Operators module: actions and the move rules that apply them.
//!
//! Depends on `carrier`.

pub mod action;
pub mod apply;
