//! A* shortest-path search over the grid.
//!
//! Each query builds its own open/closed sets as locals, so independent
//! queries can never contaminate each other. Expansion is restricted to the
//! four orthogonal neighbors; step cost is uniform, the heuristic is
//! Manhattan distance to the destination (admissible and consistent, so the
//! returned path is optimal).

use std::collections::{BTreeMap, BTreeSet};

use crate::board::{Grid, Position};

/// Whose movement rules apply to a query.
///
/// Allied units must not step onto cells orthogonally adjacent to an
/// opponent recycler (the ground there is about to be eaten); opponent
/// routing has no such restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    Allied,
    Enemy,
}

/// Per-query search node.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g: i32,
    h: i32,
    f: i32,
    parent: Position,
    /// Manhattan distance to the board center. Defined as a secondary
    /// tie-break but deliberately not consulted in the comparison; equal-f
    /// ties resolve by the open set's (y, x) key order instead. Enabling it
    /// would change move selection across the whole planner.
    #[allow(dead_code)]
    center_dist: i32,
}

/// Finds the shortest path from `origin` to `dest`.
///
/// The returned sequence excludes `origin`; `dest` is the last element.
/// Returns an empty vector when `origin == dest` or when no path exists --
/// callers that care must compare the endpoints first to tell the two
/// apart.
pub fn find_path(
    grid: &Grid,
    origin: Position,
    dest: Position,
    avoid: &BTreeSet<Position>,
    routing: Routing,
) -> Vec<Position> {
    if origin == dest {
        return Vec::new();
    }

    let mut open: BTreeMap<Position, SearchNode> = BTreeMap::new();
    let mut closed: BTreeMap<Position, SearchNode> = BTreeMap::new();

    let start = SearchNode {
        g: 0,
        h: origin.manhattan(dest),
        f: origin.manhattan(dest),
        parent: origin,
        center_dist: origin.center_dist(grid.width(), grid.height()),
    };
    closed.insert(origin, start);

    let mut current = origin;
    expand(grid, current, dest, avoid, routing, &mut open, &mut closed);

    while current != dest {
        let Some((pos, node)) = pop_best(&mut open) else {
            break;
        };
        current = pos;
        closed.insert(current, node);
        expand(grid, current, dest, avoid, routing, &mut open, &mut closed);
    }

    if current != dest {
        return Vec::new();
    }

    // Walk parents back to the origin; the destination is pushed first so
    // reversing yields origin-excluded order ending at `dest`.
    let mut path = vec![dest];
    let mut prev = closed[&dest].parent;
    while prev != origin {
        path.push(prev);
        prev = closed[&prev].parent;
    }
    path.reverse();
    path
}

/// Removes and returns the open node with the strictly lowest f-cost, or
/// `None` when the open set is exhausted. Equal-f ties go to the first
/// node in (y, x) key order, which is stable across runs.
fn pop_best(open: &mut BTreeMap<Position, SearchNode>) -> Option<(Position, SearchNode)> {
    let mut best: Option<(Position, i32)> = None;
    for (&pos, node) in open.iter() {
        if best.map_or(true, |(_, f)| node.f < f) {
            best = Some((pos, node.f));
        }
    }
    let (pos, _) = best?;
    let node = open.remove(&pos)?;
    Some((pos, node))
}

/// Pushes the passable orthogonal neighbors of `from` into the open set,
/// keeping the cheaper node when one is already queued.
fn expand(
    grid: &Grid,
    from: Position,
    dest: Position,
    avoid: &BTreeSet<Position>,
    routing: Routing,
    open: &mut BTreeMap<Position, SearchNode>,
    closed: &mut BTreeMap<Position, SearchNode>,
) {
    let g = closed[&from].g + 1;
    for &next in grid.neighbors(from) {
        if !next.is_some() || closed.contains_key(&next) {
            continue;
        }
        if !passable(grid, next, avoid, routing) {
            continue;
        }

        let h = next.manhattan(dest);
        let node = SearchNode {
            g,
            h,
            f: g + h,
            parent: from,
            center_dist: next.center_dist(grid.width(), grid.height()),
        };
        match open.get_mut(&next) {
            Some(existing) => {
                if node.f < existing.f {
                    *existing = node;
                }
            }
            None => {
                open.insert(next, node);
            }
        }
    }
}

/// A cell can be expanded into unless it is grass, holds a recycler, was
/// excluded by the caller, or (allied routing only) sits next to an
/// opponent recycler.
fn passable(grid: &Grid, pos: Position, avoid: &BTreeSet<Position>, routing: Routing) -> bool {
    if avoid.contains(&pos) {
        return false;
    }
    let cell = grid.cell(pos);
    if cell.scrap == 0 || cell.recycler {
        return false;
    }
    if routing == Routing::Allied && grid.hazard_adjacent(pos) {
        return false;
    }
    true
}
