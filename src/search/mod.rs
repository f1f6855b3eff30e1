//! Obstacle-aware shortest-path search.

pub mod astar;

pub use astar::{find_path, Routing};
