//! Match-level agent state.
//!
//! Holds the grid (whose adjacency is fixed for the whole match) and the
//! small cross-turn memory of the early recycler pass. Everything else is
//! rebuilt in a fresh [`TurnContext`] every turn, so no planner state can
//! leak from one turn into the next.

use std::time::Instant;

use crate::board::{Action, Grid};
use crate::plan::{run_passes, EarlyRecyclerState, TurnContext};
use crate::protocol::TurnSnapshot;

/// The playing agent for one match.
pub struct Agent {
    grid: Grid,
    early: EarlyRecyclerState,
}

impl Agent {
    /// Creates the agent for a `width` x `height` match.
    pub fn new(width: i32, height: i32) -> Self {
        Agent {
            grid: Grid::new(width, height),
            early: EarlyRecyclerState::default(),
        }
    }

    /// Computes one turn's actions from a snapshot.
    ///
    /// The returned list is ready for the emitter: builds, spawns, moves,
    /// a lone `WAIT` when nothing was planned, and a trailing `MESSAGE`
    /// with the elapsed planning time in milliseconds.
    pub fn play_turn(&mut self, snapshot: &TurnSnapshot) -> Vec<Action> {
        let started = Instant::now();

        self.grid.update(&snapshot.cells);
        let mut ctx = TurnContext::new(snapshot.my_matter);
        run_passes(&self.grid, &mut ctx, &mut self.early);

        debug_assert!(ctx.matter >= 0, "budget went negative");

        let mut actions = ctx.into_actions();
        let elapsed_ms = started.elapsed().as_millis();
        eprintln!("turn planned in {} ms", elapsed_ms);
        actions.push(Action::Message(elapsed_ms.to_string()));
        actions
    }
}
