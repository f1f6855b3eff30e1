//! Action serialization.
//!
//! Turns the planner's typed intents into the host's wire commands and
//! joins a turn's worth into one semicolon-separated line. Malformed
//! intents (sentinel positions, non-positive amounts) are rejected here
//! rather than sent to the host.

use thiserror::Error;

use crate::board::{Action, Position};

/// Errors raised for intents that have no legal wire form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmitError {
    #[error("{kind} references the absent position")]
    AbsentPosition { kind: &'static str },

    #[error("{kind} amount must be positive, got {amount}")]
    NonPositiveAmount { kind: &'static str, amount: i32 },

    #[error("MESSAGE text must not contain ';'")]
    MessageWithSeparator,
}

/// Formats a single action as its wire command.
pub fn format_action(action: &Action) -> Result<String, EmitError> {
    match action {
        Action::Move { amount, from, to } => {
            require_present("MOVE", *from)?;
            require_present("MOVE", *to)?;
            require_positive("MOVE", *amount)?;
            Ok(format!(
                "MOVE {} {} {} {} {}",
                amount, from.x, from.y, to.x, to.y
            ))
        }
        Action::Build { pos } => {
            require_present("BUILD", *pos)?;
            Ok(format!("BUILD {} {}", pos.x, pos.y))
        }
        Action::Spawn { amount, pos } => {
            require_present("SPAWN", *pos)?;
            require_positive("SPAWN", *amount)?;
            Ok(format!("SPAWN {} {} {}", amount, pos.x, pos.y))
        }
        Action::Wait => Ok("WAIT".to_string()),
        Action::Message(text) => {
            if text.contains(';') {
                return Err(EmitError::MessageWithSeparator);
            }
            Ok(format!("MESSAGE {}", text))
        }
    }
}

/// Formats a full turn as one semicolon-joined command line.
pub fn format_turn(actions: &[Action]) -> Result<String, EmitError> {
    let parts: Result<Vec<String>, EmitError> = actions.iter().map(format_action).collect();
    Ok(parts?.join(";"))
}

fn require_present(kind: &'static str, pos: Position) -> Result<(), EmitError> {
    if !pos.is_some() {
        return Err(EmitError::AbsentPosition { kind });
    }
    Ok(())
}

fn require_positive(kind: &'static str, amount: i32) -> Result<(), EmitError> {
    if amount <= 0 {
        return Err(EmitError::NonPositiveAmount { kind, amount });
    }
    Ok(())
}
