//! The per-turn allocation planner.
//!
//! Runs a fixed sequence of heuristic passes over one [`TurnContext`]:
//! recycler placement, threat response, the spawn cascade, and capture
//! moves. Pass order is significant and never changes; every pass draws on
//! the same matter budget and the same exclusion set, so no unit origin is
//! ever committed twice and the budget can never go negative.

pub mod capture;
pub mod defense;
pub mod recycler;

use std::collections::BTreeSet;

use crate::board::{Action, Grid, Position};
use crate::eval::ThreatCache;

pub use capture::CaptureKind;
pub use defense::SpawnCase;

/// Outcome of one threat-response assignment: how many responders the
/// cluster still needs. Positive = shortfall, zero = exactly met,
/// negative = over-resourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatRecord {
    pub pos: Position,
    pub remaining: i32,
    /// Cluster-to-front-line path length, kept for diagnostics.
    pub dist: i32,
}

/// Cross-turn memory for the early recycler pass.
///
/// `over` latches permanently once enemy territory touches ours;
/// `matter_floor` remembers the matter level after the last early
/// placement so the pass waits for the economy to regrow by 20.
#[derive(Debug, Clone, Copy)]
pub struct EarlyRecyclerState {
    pub over: bool,
    pub matter_floor: i32,
}

impl Default for EarlyRecyclerState {
    fn default() -> Self {
        // A floor of -10 lets the very first turn qualify at matter 10.
        EarlyRecyclerState {
            over: false,
            matter_floor: -10,
        }
    }
}

/// All mutable state of one turn's planning: the matter budget, committed
/// unit origins, cells later pathing must dodge (planned builds), the
/// per-turn threat memo, and the collected intents.
#[derive(Debug)]
pub struct TurnContext {
    pub matter: i32,
    pub excluded: BTreeSet<Position>,
    pub avoid: BTreeSet<Position>,
    pub threats: Vec<ThreatRecord>,
    pub cache: ThreatCache,
    builds: Vec<Position>,
    spawns: Vec<(i32, Position)>,
    moves: Vec<(i32, Position, Position)>,
}

impl TurnContext {
    pub fn new(matter: i32) -> Self {
        TurnContext {
            matter,
            excluded: BTreeSet::new(),
            avoid: BTreeSet::new(),
            threats: Vec::new(),
            cache: ThreatCache::new(),
            builds: Vec::new(),
            spawns: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// Commits a recycler build: the cell becomes off-limits for the rest
    /// of this turn's pathing. Callers must have checked the budget.
    pub fn commit_build(&mut self, pos: Position) {
        debug_assert!(self.matter >= 10, "build committed without budget");
        self.builds.push(pos);
        self.avoid.insert(pos);
        self.matter -= 10;
    }

    /// Commits a one-unit spawn. Callers must have checked the budget.
    pub fn commit_spawn(&mut self, pos: Position) {
        debug_assert!(self.matter >= 10, "spawn committed without budget");
        self.spawns.push((1, pos));
        self.matter -= 10;
    }

    /// Commits a one-step move and retires the origin for this turn.
    pub fn commit_move(&mut self, from: Position, to: Position) {
        debug_assert!(!self.excluded.contains(&from), "origin committed twice");
        self.moves.push((1, from, to));
        self.excluded.insert(from);
    }

    /// Assembles the final intent list: builds, then spawns, then moves,
    /// with `WAIT` only when nothing else was produced.
    pub fn into_actions(self) -> Vec<Action> {
        let mut actions = Vec::new();
        for pos in self.builds {
            actions.push(Action::Build { pos });
        }
        for (amount, pos) in self.spawns {
            actions.push(Action::Spawn { amount, pos });
        }
        for (amount, from, to) in self.moves {
            actions.push(Action::Move { amount, from, to });
        }
        if actions.is_empty() {
            actions.push(Action::Wait);
        }
        actions
    }
}

/// Runs the full pass sequence for one turn, in the fixed order:
/// early recycler, defensive recyclers, threat response, shortfall spawns,
/// opportunistic spawns, enemy capture, neutral capture, final spawns.
pub fn run_passes(grid: &Grid, ctx: &mut TurnContext, early: &mut EarlyRecyclerState) {
    recycler::early_recycler(grid, ctx, early);
    recycler::defensive_recyclers(grid, ctx);
    defense::respond_to_threats(grid, ctx);
    defense::spawn_for_threats(grid, ctx, SpawnCase::Shortfall);
    defense::spawn_for_threats(grid, ctx, SpawnCase::Met);
    capture::capture_cells(grid, ctx, CaptureKind::Enemy);
    capture::capture_cells(grid, ctx, CaptureKind::Neutral);
    defense::spawn_for_threats(grid, ctx, SpawnCase::Overdrawn);
}
