//! Board representation and action types.
//!
//! Contains the grid with its fixed orthogonal adjacency, the per-cell
//! state, and the typed action intents the planner emits.

pub mod action;
pub mod cell;
pub mod grid;

pub use action::Action;
pub use cell::{Cell, Owner, Position};
pub use grid::Grid;
