//! Enemy threat scoring.
//!
//! Ranks opponent-occupied cells (clusters) by how dangerous they are to
//! the allied front line. Danger is proximity-driven: the shortest path
//! from the cluster to any allied front-line cell, discounted by the
//! cluster's own size and by opponent units on its orthogonal neighbors.
//! Lower score = more dangerous.
//!
//! Path distances are memoized per enemy cell for the duration of a turn;
//! the cache is a per-turn value, rebuilt with the turn context.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::{Grid, Owner, Position};
use crate::search::{find_path, Routing};

/// The most dangerous cluster this turn, and how many responders it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threat {
    pub pos: Position,
    /// Cluster units plus opponent units on its orthogonal neighbors.
    pub required: i32,
    /// Shortest path length from the cluster to the allied front line.
    pub dist: i32,
}

/// Per-turn memo of cluster-to-allied-cell path lengths.
#[derive(Debug, Default)]
pub struct ThreatCache {
    dists: BTreeMap<Position, BTreeMap<Position, i32>>,
}

impl ThreatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized path length from `cluster` to `ally`, running
    /// the search on a miss. Unreachable pairs memoize as 0.
    fn distance(
        &mut self,
        grid: &Grid,
        cluster: Position,
        ally: Position,
        avoid: &BTreeSet<Position>,
    ) -> i32 {
        let per_cluster = self.dists.entry(cluster).or_default();
        if let Some(&d) = per_cluster.get(&ally) {
            return d;
        }
        let d = find_path(grid, cluster, ally, avoid, Routing::Enemy).len() as i32;
        per_cluster.insert(ally, d);
        d
    }
}

/// Picks the most dangerous opponent cluster not in `excluded`.
///
/// Clusters that cannot reach any allied front-line cell (every examined
/// distance is zero) are not feared and drop out of scoring for the turn.
/// Returns `None` when no qualifying cluster remains.
pub fn most_dangerous(
    grid: &Grid,
    cache: &mut ThreatCache,
    excluded: &BTreeSet<Position>,
    avoid: &BTreeSet<Position>,
) -> Option<Threat> {
    let mut best: Option<Threat> = None;
    let mut best_score = f32::INFINITY;

    for &cluster in grid.opponent_cells() {
        let cell = grid.cell(cluster);
        if cell.recycler || cell.units == 0 || excluded.contains(&cluster) {
            continue;
        }

        let mut min_dist = i32::MAX;
        for &ally in grid.my_cells() {
            if grid.cell(ally).recycler || !grid.front_line(ally) {
                continue;
            }
            let d = cache.distance(grid, cluster, ally, avoid);
            if d > 0 && d < min_dist {
                min_dist = d;
            }
        }
        if min_dist == i32::MAX {
            // Not feared: no allied front-line cell is reachable.
            continue;
        }

        let mut required = cell.units;
        let mut score = min_dist as f32 - cell.units as f32 / 2.0;
        for &n in grid.neighbors(cluster) {
            if !n.is_some() {
                continue;
            }
            let nc = grid.cell(n);
            if nc.owner == Owner::Opponent {
                required += nc.units;
                score -= nc.units as f32 / 4.0;
            }
        }

        if score < best_score {
            best_score = score;
            best = Some(Threat {
                pos: cluster,
                required,
                dist: min_dist,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn cell(scrap: i32, owner: Owner, units: i32, recycler: bool) -> Cell {
        Cell {
            scrap,
            owner,
            units,
            recycler,
            can_build: false,
            can_spawn: false,
            in_recycler_range: false,
        }
    }

    /// 5x1 strip: ally with a unit at x=0, enemies placed by the caller.
    fn strip(enemy: &[(usize, i32)]) -> Grid {
        let mut rows = vec![cell(3, Owner::Neutral, 0, false); 5];
        rows[0] = cell(3, Owner::Mine, 1, false);
        for &(x, units) in enemy {
            rows[x] = cell(3, Owner::Opponent, units, false);
        }
        let mut grid = Grid::new(5, 1);
        grid.update(&rows);
        grid
    }

    #[test]
    fn single_cluster_is_selected() {
        let grid = strip(&[(4, 2)]);
        let mut cache = ThreatCache::new();
        let t = most_dangerous(&grid, &mut cache, &BTreeSet::new(), &BTreeSet::new()).unwrap();
        assert_eq!(t.pos, Position::new(4, 0));
        assert_eq!(t.required, 2);
        assert_eq!(t.dist, 4);
    }

    #[test]
    fn closer_cluster_scores_more_dangerous() {
        // Same size, different distances: the nearer one must win.
        let mut rows = vec![cell(3, Owner::Neutral, 0, false); 7];
        rows[0] = cell(3, Owner::Mine, 1, false);
        rows[2] = cell(3, Owner::Opponent, 1, false);
        rows[6] = cell(3, Owner::Opponent, 1, false);
        let mut grid = Grid::new(7, 1);
        grid.update(&rows);

        let mut cache = ThreatCache::new();
        let t = most_dangerous(&grid, &mut cache, &BTreeSet::new(), &BTreeSet::new()).unwrap();
        assert_eq!(t.pos, Position::new(2, 0));
    }

    #[test]
    fn adjacent_support_raises_required_count() {
        // Cluster at x=3 with a supporting opponent cell at x=4.
        let grid = strip(&[(3, 2), (4, 3)]);
        let mut cache = ThreatCache::new();
        let t = most_dangerous(&grid, &mut cache, &BTreeSet::new(), &BTreeSet::new()).unwrap();
        assert_eq!(t.pos, Position::new(3, 0));
        assert_eq!(t.required, 5);
    }

    #[test]
    fn excluded_cluster_is_skipped() {
        let grid = strip(&[(4, 2)]);
        let mut cache = ThreatCache::new();
        let mut excluded = BTreeSet::new();
        excluded.insert(Position::new(4, 0));
        assert_eq!(
            most_dangerous(&grid, &mut cache, &excluded, &BTreeSet::new()),
            None
        );
    }

    #[test]
    fn walled_off_cluster_is_not_feared() {
        // Grass at x=2 cuts the strip; the cluster cannot reach us.
        let mut rows = vec![cell(3, Owner::Neutral, 0, false); 5];
        rows[0] = cell(3, Owner::Mine, 1, false);
        rows[2] = cell(0, Owner::Neutral, 0, false);
        rows[4] = cell(3, Owner::Opponent, 2, false);
        let mut grid = Grid::new(5, 1);
        grid.update(&rows);

        let mut cache = ThreatCache::new();
        assert_eq!(
            most_dangerous(&grid, &mut cache, &BTreeSet::new(), &BTreeSet::new()),
            None
        );
    }

    #[test]
    fn repeated_evaluation_hits_the_memo() {
        let grid = strip(&[(4, 2)]);
        let mut cache = ThreatCache::new();
        let a = most_dangerous(&grid, &mut cache, &BTreeSet::new(), &BTreeSet::new());
        let b = most_dangerous(&grid, &mut cache, &BTreeSet::new(), &BTreeSet::new());
        assert_eq!(a, b);
        assert!(cache.dists.contains_key(&Position::new(4, 0)));
    }
}
