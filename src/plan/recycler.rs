//! Recycler placement passes.
//!
//! Two flavors: an economy build in the opening (while the armies have not
//! met yet) on the cell with the best local scrap differential, and
//! reactive builds wherever enemy units stand directly on our border.

use crate::board::{Grid, Owner, Position};

use super::{EarlyRecyclerState, TurnContext};

const RECYCLER_COST: i32 = 10;
/// The economy pass waits for this much matter regrowth between builds.
const REGROWTH_GATE: i32 = 20;

/// Pass 1: opening economy recycler.
///
/// Runs only while no allied cell touches opponent territory; the first
/// contact latches the pass off for the rest of the match. At most one
/// build per qualifying turn, gated on matter having regrown by 20 since
/// the previous early build.
pub fn early_recycler(grid: &Grid, ctx: &mut TurnContext, early: &mut EarlyRecyclerState) {
    if early.over {
        return;
    }
    if grid.my_cells().iter().any(|&p| grid.enemy_adjacent(p)) {
        early.over = true;
        return;
    }
    if ctx.matter < RECYCLER_COST || ctx.matter - early.matter_floor < REGROWTH_GATE {
        return;
    }

    let mut best: Option<(i32, Position)> = None;
    for &pos in grid.my_cells() {
        let cell = grid.cell(pos);
        if cell.recycler || cell.units > 0 || cell.scrap <= 1 {
            continue;
        }
        let score = scrap_differential(grid, pos, cell.scrap);
        if best.map_or(true, |(b, _)| score > b) {
            best = Some((score, pos));
        }
    }

    if let Some((_, pos)) = best {
        ctx.commit_build(pos);
    }
    early.matter_floor = ctx.matter;
}

/// Scores a recycler site by how much scrap it would pull in relative to
/// its neighborhood: flat-rich neighborhoods score poorly (the recycler
/// would eat its own territory evenly), a local scrap peak scores well.
fn scrap_differential(grid: &Grid, pos: Position, own: i32) -> i32 {
    let mut score = own;
    for &n in grid.neighbors(pos) {
        if !n.is_some() {
            continue;
        }
        let nbr = grid.cell(n).scrap;
        if nbr == 0 {
            score -= own;
        } else if nbr > own {
            score -= nbr - own;
        } else if nbr < own {
            score += own - nbr;
        } else {
            score -= 4;
        }
    }
    score
}

/// Pass 2: defensive recyclers.
///
/// Builds on every buildable allied cell that has an opponent cell with
/// units directly on an orthogonal neighbor, budget permitting.
pub fn defensive_recyclers(grid: &Grid, ctx: &mut TurnContext) {
    for &pos in grid.my_cells() {
        if !grid.cell(pos).can_build || ctx.matter < RECYCLER_COST {
            continue;
        }
        let threatened = grid.neighbors(pos).iter().any(|&n| {
            n.is_some() && {
                let c = grid.cell(n);
                c.owner == Owner::Opponent && c.units > 0
            }
        });
        if threatened {
            ctx.commit_build(pos);
        }
    }
}
