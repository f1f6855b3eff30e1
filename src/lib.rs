//! Scrapline bot library.
//!
//! Exposes the board representation, pathfinding, threat evaluation,
//! turn planner, and protocol modules for use by integration tests and
//! the binary entry point.

pub mod agent;
pub mod board;
pub mod eval;
pub mod plan;
pub mod protocol;
pub mod search;
