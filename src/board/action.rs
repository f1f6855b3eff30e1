//! Action intents produced by the planner.
//!
//! Each variant maps one-to-one onto a wire command; serialization lives in
//! [`crate::protocol::emit`].

use super::cell::Position;

/// A single turn action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `MOVE amount fromX fromY toX toY`
    Move {
        amount: i32,
        from: Position,
        to: Position,
    },

    /// `BUILD x y`
    Build { pos: Position },

    /// `SPAWN amount x y`
    Spawn { amount: i32, pos: Position },

    /// `WAIT` -- emitted only when no other action was produced.
    Wait,

    /// `MESSAGE text` -- diagnostics shown by the viewer (e.g. elapsed ms).
    Message(String),
}
