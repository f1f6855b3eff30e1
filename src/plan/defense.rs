//! Threat response and the spawn cascade.
//!
//! Pass 3 marches existing units toward the most dangerous clusters, one
//! step per unit per turn. The three spawn passes (shortfall, met,
//! overdrawn) are one parameterized routine invoked at different points in
//! the turn sequence; they differ only in which threat records they match
//! and the matter gate they require.

use std::collections::BTreeMap;

use crate::board::{Grid, Position};
use crate::eval::most_dangerous;
use crate::search::{find_path, Routing};

use super::{ThreatRecord, TurnContext};

const SPAWN_COST: i32 = 10;

/// Pass 3: threat-response moves.
///
/// Repeatedly takes the most dangerous remaining cluster and assigns up to
/// its required responder count from the not-yet-committed unit origins,
/// nearest (by path) first. Each cluster leaves one [`ThreatRecord`] with
/// the unassigned remainder for the spawn cascade.
pub fn respond_to_threats(grid: &Grid, ctx: &mut TurnContext) {
    let mut handled = std::collections::BTreeSet::new();

    while let Some(threat) = most_dangerous(grid, &mut ctx.cache, &handled, &ctx.avoid) {
        handled.insert(threat.pos);

        // Unit origins are pathed at most once per cluster.
        let mut memo: BTreeMap<Position, (i32, Position)> = BTreeMap::new();
        let mut assigned = 0;

        for _ in 0..threat.required {
            let mut best: Option<(i32, Position, Position)> = None;
            for &origin in grid.my_cells() {
                if grid.cell(origin).units == 0 || ctx.excluded.contains(&origin) {
                    continue;
                }
                let (dist, step) = match memo.get(&origin) {
                    Some(&cached) => cached,
                    None => {
                        let path = find_path(grid, origin, threat.pos, &ctx.avoid, Routing::Allied);
                        let entry = (
                            path.len() as i32,
                            path.first().copied().unwrap_or(Position::NONE),
                        );
                        memo.insert(origin, entry);
                        entry
                    }
                };
                if dist == 0 {
                    continue;
                }
                if best.map_or(true, |(d, _, _)| dist < d) {
                    best = Some((dist, origin, step));
                }
            }

            match best {
                Some((_, origin, step)) => {
                    ctx.commit_move(origin, step);
                    assigned += 1;
                }
                None => break,
            }
        }

        ctx.threats.push(ThreatRecord {
            pos: threat.pos,
            remaining: threat.required - assigned,
            dist: threat.dist,
        });
    }
}

/// Which threat records a spawn invocation matches, and its matter gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCase {
    /// Pass 4: records still short of responders; spawn until covered.
    Shortfall,
    /// Pass 5: exactly-met records; one opportunistic extra each.
    Met,
    /// Pass 8: already over-resourced records; one more each, but only
    /// while the economy is comfortable (matter >= 20).
    Overdrawn,
}

impl SpawnCase {
    fn gate(self) -> i32 {
        match self {
            SpawnCase::Shortfall | SpawnCase::Met => SPAWN_COST,
            SpawnCase::Overdrawn => 2 * SPAWN_COST,
        }
    }

    fn matches(self, remaining: i32) -> bool {
        match self {
            SpawnCase::Shortfall => remaining > 0,
            SpawnCase::Met => remaining == 0,
            SpawnCase::Overdrawn => remaining < 0,
        }
    }
}

/// Passes 4, 5, and 8: the spawn cascade.
///
/// For every matching threat record, spawns at the front-line allied cell
/// nearest to the cluster (by path), decrementing the record's remainder
/// per spawn. Shortfall records spawn until covered; the other cases spawn
/// once per record. Every spawn re-checks the budget.
pub fn spawn_for_threats(grid: &Grid, ctx: &mut TurnContext, case: SpawnCase) {
    for i in 0..ctx.threats.len() {
        let target = ctx.threats[i].pos;
        loop {
            if !case.matches(ctx.threats[i].remaining) || ctx.matter < case.gate() {
                break;
            }
            let Some(site) = nearest_spawn_site(grid, ctx, target) else {
                break;
            };
            ctx.commit_spawn(site);
            ctx.threats[i].remaining -= 1;
            if case != SpawnCase::Shortfall {
                break;
            }
        }
    }
}

/// The allied cell nearest to `target` that can host responders: not a
/// recycler, on the front line, not committed to a build this turn, and
/// actually connected to the target.
fn nearest_spawn_site(grid: &Grid, ctx: &TurnContext, target: Position) -> Option<Position> {
    let mut best: Option<(i32, Position)> = None;
    for &pos in grid.my_cells() {
        if grid.cell(pos).recycler || !grid.front_line(pos) || ctx.avoid.contains(&pos) {
            continue;
        }
        let dist = find_path(grid, pos, target, &ctx.avoid, Routing::Allied).len() as i32;
        if dist == 0 {
            continue;
        }
        if best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, pos));
        }
    }
    best.map(|(_, pos)| pos)
}
