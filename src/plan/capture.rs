//! Capture passes.
//!
//! Sends the units that were not needed for defense toward territory:
//! first undefended opponent cells, then neutral cells with scrap left.
//! Target choice is a cheap Manhattan-nearest prefilter over all
//! (available unit, candidate) pairs; the actual assignment then uses the
//! true path distance, so walled-off targets are dropped rather than
//! chased.

use std::collections::BTreeSet;

use crate::board::{Grid, Position};
use crate::search::{find_path, Routing};

use super::TurnContext;

/// What a capture invocation hunts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    /// Pass 6: opponent-owned cells without recyclers or units.
    Enemy,
    /// Pass 7: neutral cells with positive scrap.
    Neutral,
}

/// Passes 6 and 7: one-step moves toward capturable cells.
///
/// Loops: pick the candidate nearest (Manhattan) to any free unit, send
/// the unit with the shortest real path one step toward it, retire the
/// origin, and mark the candidate taken. Unreachable candidates are
/// dropped so the scan can move on. Ends when candidates or units run out.
pub fn capture_cells(grid: &Grid, ctx: &mut TurnContext, kind: CaptureKind) {
    let mut taken: BTreeSet<Position> = BTreeSet::new();

    while let Some(target) = nearest_target(grid, ctx, kind, &taken) {
        let mut best: Option<(i32, Position, Position)> = None;
        for &origin in grid.my_cells() {
            if grid.cell(origin).units == 0 || ctx.excluded.contains(&origin) {
                continue;
            }
            let path = find_path(grid, origin, target, &ctx.avoid, Routing::Allied);
            let dist = path.len() as i32;
            if dist == 0 {
                continue;
            }
            if best.map_or(true, |(d, _, _)| dist < d) {
                best = Some((dist, origin, path[0]));
            }
        }

        if let Some((_, origin, step)) = best {
            ctx.commit_move(origin, step);
        }
        // Reachable or not, this candidate is done.
        taken.insert(target);
    }
}

/// The candidate cell with minimum Manhattan distance to any free unit,
/// or `None` when either side of the pairing is exhausted.
fn nearest_target(
    grid: &Grid,
    ctx: &TurnContext,
    kind: CaptureKind,
    taken: &BTreeSet<Position>,
) -> Option<Position> {
    let candidates: Vec<Position> = match kind {
        CaptureKind::Enemy => grid
            .opponent_cells()
            .iter()
            .copied()
            .filter(|&p| {
                let c = grid.cell(p);
                !c.recycler && c.units == 0 && !taken.contains(&p)
            })
            .collect(),
        CaptureKind::Neutral => grid
            .neutral_cells()
            .iter()
            .copied()
            .filter(|&p| !taken.contains(&p))
            .collect(),
    };

    let mut best: Option<(i32, Position)> = None;
    for &target in &candidates {
        for &origin in grid.my_cells() {
            if grid.cell(origin).units == 0 || ctx.excluded.contains(&origin) {
                continue;
            }
            let dist = origin.manhattan(target);
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, target));
            }
        }
    }
    best.map(|(_, target)| target)
}
