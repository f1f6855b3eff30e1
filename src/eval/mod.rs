//! Threat evaluation.
//!
//! Ranks opponent clusters by danger to the allied front line, with
//! per-turn memoization of path distances.

pub mod threat;

pub use threat::{most_dangerous, Threat, ThreatCache};
