//! Wire protocol handling.
//!
//! Parsing of the host's per-turn board snapshots and serialization of
//! the planner's action intents into the semicolon-joined command line.

pub mod emit;
pub mod snapshot;

pub use emit::{format_action, format_turn, EmitError};
pub use snapshot::{read_header, read_snapshot, SnapshotError, TurnSnapshot};
