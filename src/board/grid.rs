//! The match grid.
//!
//! Owns every cell plus the orthogonal adjacency table, which is computed
//! once when the grid is created and never touched again. Per-turn scalar
//! state and the three classification lists (ally / enemy / neutral-with-
//! scrap) are fully replaced by [`Grid::update`] each turn, never patched.

use super::cell::{Cell, Owner, Position};

/// Fixed-size game grid with precomputed orthogonal adjacency.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    /// Four orthogonal neighbor slots per cell; `Position::NONE` where the
    /// neighbor falls off the board. Built once, row-major.
    neighbors: Vec<[Position; 4]>,
    my_cells: Vec<Position>,
    opponent_cells: Vec<Position>,
    neutral_cells: Vec<Position>,
}

impl Grid {
    /// Creates a grid of grass cells and fixes the adjacency table.
    ///
    /// # Panics
    /// Panics if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");

        let n = (width * height) as usize;
        let mut neighbors = Vec::with_capacity(n);
        for y in 0..height {
            for x in 0..width {
                let mut slots = [Position::NONE; 4];
                let candidates = [(x, y - 1), (x - 1, y), (x + 1, y), (x, y + 1)];
                for (slot, &(nx, ny)) in slots.iter_mut().zip(candidates.iter()) {
                    if nx >= 0 && nx < width && ny >= 0 && ny < height {
                        *slot = Position::new(nx, ny);
                    }
                }
                neighbors.push(slots);
            }
        }

        Grid {
            width,
            height,
            cells: vec![Cell::grass(); n],
            neighbors,
            my_cells: Vec::new(),
            opponent_cells: Vec::new(),
            neutral_cells: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "cell access out of bounds: ({}, {})",
            pos.x,
            pos.y
        );
        (pos.y * self.width + pos.x) as usize
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Returns the cell at `pos`.
    ///
    /// # Panics
    /// Panics when `pos` is off the board; out-of-bounds access is a
    /// programming error, not a recoverable condition.
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    /// Returns the precomputed orthogonal neighbor slots of `pos`.
    /// Missing neighbors are `Position::NONE`.
    pub fn neighbors(&self, pos: Position) -> &[Position; 4] {
        &self.neighbors[self.index(pos)]
    }

    /// Overwrites every cell from a row-major snapshot and rebuilds the
    /// three classification lists in one pass.
    ///
    /// # Panics
    /// Panics if the snapshot length does not match the grid size.
    pub fn update(&mut self, rows: &[Cell]) {
        assert_eq!(
            rows.len(),
            self.cells.len(),
            "snapshot size does not match grid"
        );
        self.cells.copy_from_slice(rows);

        self.my_cells.clear();
        self.opponent_cells.clear();
        self.neutral_cells.clear();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let cell = &self.cells[(y * self.width + x) as usize];
                match cell.owner {
                    Owner::Mine => self.my_cells.push(pos),
                    Owner::Opponent => self.opponent_cells.push(pos),
                    Owner::Neutral => {
                        if cell.scrap > 0 {
                            self.neutral_cells.push(pos);
                        }
                    }
                }
            }
        }
    }

    /// Allied cells, rebuilt by the last `update`.
    pub fn my_cells(&self) -> &[Position] {
        &self.my_cells
    }

    /// Opponent cells, rebuilt by the last `update`.
    pub fn opponent_cells(&self) -> &[Position] {
        &self.opponent_cells
    }

    /// Neutral cells with positive scrap, rebuilt by the last `update`.
    pub fn neutral_cells(&self) -> &[Position] {
        &self.neutral_cells
    }

    /// True when an orthogonal neighbor holds an opponent-owned recycler.
    /// Such cells are deathtraps for allied routing: the recycler will eat
    /// the ground out from under anything standing next to it.
    pub fn hazard_adjacent(&self, pos: Position) -> bool {
        self.neighbors(pos).iter().any(|&n| {
            n.is_some() && {
                let c = self.cell(n);
                c.recycler && c.owner == Owner::Opponent
            }
        })
    }

    /// True when an orthogonal neighbor is an opponent cell without a
    /// recycler, i.e. enemy territory is directly adjacent.
    pub fn enemy_adjacent(&self, pos: Position) -> bool {
        self.neighbors(pos).iter().any(|&n| {
            n.is_some() && {
                let c = self.cell(n);
                c.owner == Owner::Opponent && !c.recycler
            }
        })
    }

    /// True for front-line cells: an orthogonal neighbor is either enemy
    /// territory (non-recycler) or unclaimed ground with scrap left.
    /// Threat scoring and spawn placement only consider these.
    pub fn front_line(&self, pos: Position) -> bool {
        self.neighbors(pos).iter().any(|&n| {
            n.is_some() && {
                let c = self.cell(n);
                (c.owner == Owner::Opponent && !c.recycler)
                    || (c.owner == Owner::Neutral && c.scrap > 0)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    /// 3x3 board, all neutral scrap-1 unless overridden.
    fn neutral_rows() -> Vec<Cell> {
        vec![cell(1, Owner::Neutral, 0, false); 9]
    }

    #[test]
    fn corner_has_two_neighbors() {
        let grid = Grid::new(3, 3);
        let n = grid.neighbors(Position::new(0, 0));
        let existing: Vec<_> = n.iter().filter(|p| p.is_some()).collect();
        assert_eq!(existing.len(), 2);
        assert!(n.contains(&Position::new(1, 0)));
        assert!(n.contains(&Position::new(0, 1)));
    }

    #[test]
    fn interior_has_four_neighbors() {
        let grid = Grid::new(3, 3);
        let n = grid.neighbors(Position::new(1, 1));
        assert!(n.iter().all(|p| p.is_some()));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_access_panics() {
        let grid = Grid::new(3, 3);
        grid.cell(Position::new(3, 0));
    }

    #[test]
    fn update_rebuilds_classification_lists() {
        let mut grid = Grid::new(3, 3);
        let mut rows = neutral_rows();
        rows[0] = cell(5, Owner::Mine, 1, false);
        rows[8] = cell(5, Owner::Opponent, 2, false);
        rows[4] = cell(0, Owner::Neutral, 0, false); // grass, not listed
        grid.update(&rows);

        assert_eq!(grid.my_cells(), &[Position::new(0, 0)]);
        assert_eq!(grid.opponent_cells(), &[Position::new(2, 2)]);
        assert_eq!(grid.neutral_cells().len(), 6);

        // A second update fully replaces the lists.
        grid.update(&neutral_rows());
        assert!(grid.my_cells().is_empty());
        assert!(grid.opponent_cells().is_empty());
        assert_eq!(grid.neutral_cells().len(), 9);
    }

    #[test]
    fn hazard_adjacent_counts_only_opponent_recyclers() {
        let mut grid = Grid::new(3, 3);
        let mut rows = neutral_rows();
        rows[1] = cell(4, Owner::Opponent, 0, true); // (1, 0)
        rows[3] = cell(4, Owner::Mine, 0, true); // (0, 1)
        grid.update(&rows);

        assert!(grid.hazard_adjacent(Position::new(0, 0)));
        assert!(grid.hazard_adjacent(Position::new(2, 0)));
        // (0, 2) neighbors the allied recycler only.
        assert!(!grid.hazard_adjacent(Position::new(0, 2)));
    }

    #[test]
    fn front_line_requires_enemy_or_scrap_neighbor() {
        let mut grid = Grid::new(3, 3);
        let mut rows = neutral_rows();
        rows[0] = cell(5, Owner::Mine, 0, false); // (0, 0)
        rows[1] = cell(5, Owner::Mine, 0, false); // (1, 0)
        rows[2] = cell(5, Owner::Opponent, 0, false); // (2, 0)
        rows[3] = cell(0, Owner::Neutral, 0, false); // (0, 1) grass
        rows[4] = cell(0, Owner::Neutral, 0, false); // (1, 1) grass
        grid.update(&rows);

        // (1, 0) touches the opponent cell at (2, 0).
        assert!(grid.front_line(Position::new(1, 0)));
        // (0, 0) touches only allied and grass cells.
        assert!(!grid.front_line(Position::new(0, 0)));
        // Neutral scrap neighbors count too.
        assert!(grid.front_line(Position::new(0, 2)));
    }

    #[test]
    fn enemy_adjacent_ignores_recyclers() {
        let mut grid = Grid::new(3, 3);
        let mut rows = neutral_rows();
        rows[1] = cell(4, Owner::Opponent, 0, true); // recycler at (1, 0)
        grid.update(&rows);
        assert!(!grid.enemy_adjacent(Position::new(0, 0)));

        let mut rows = neutral_rows();
        rows[1] = cell(4, Owner::Opponent, 0, false);
        grid.update(&rows);
        assert!(grid.enemy_adjacent(Position::new(0, 0)));
    }
}
