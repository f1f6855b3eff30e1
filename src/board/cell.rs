//! Cell-level board types.
//!
//! Positions are plain integer pairs with a `(-1, -1)` sentinel for
//! "absent"; cells carry the seven per-turn scalar fields the host reports
//! for every grid square.

/// An integer coordinate on the grid. `(-1, -1)` means "no position".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Sentinel for "absent": no target, no neighbor, no assignment.
    pub const NONE: Position = Position { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Returns true unless this is the `NONE` sentinel.
    pub const fn is_some(self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    /// Manhattan distance to another position.
    pub const fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Manhattan distance to the board center `(width / 2, height / 2)`.
    pub const fn center_dist(self, width: i32, height: i32) -> i32 {
        (width / 2 - self.x).abs() + (height / 2 - self.y).abs()
    }
}

// Row-major ordering so BTree collections scan the board top-to-bottom,
// left-to-right. Equal-f A* ties resolve in this order.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Who controls a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Mine,
    Opponent,
    Neutral,
}

impl Owner {
    /// Parses the wire encoding: 1 = mine, 0 = opponent, -1 = neutral.
    pub fn from_wire(v: i32) -> Option<Owner> {
        match v {
            1 => Some(Owner::Mine),
            0 => Some(Owner::Opponent),
            -1 => Some(Owner::Neutral),
            _ => None,
        }
    }
}

/// One grid square's per-turn state.
///
/// A cell with zero scrap is grass: permanently impassable and unusable.
/// `in_recycler_range` is the host-reported hazard flag; the planner's own
/// hazard test ([`super::grid::Grid::hazard_adjacent`]) only counts
/// opponent-owned recyclers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub scrap: i32,
    pub owner: Owner,
    pub units: i32,
    pub recycler: bool,
    pub can_build: bool,
    pub can_spawn: bool,
    pub in_recycler_range: bool,
}

impl Cell {
    /// A neutral grass cell, the pre-update placeholder.
    pub const fn grass() -> Self {
        Cell {
            scrap: 0,
            owner: Owner::Neutral,
            units: 0,
            recycler: false,
            can_build: false,
            can_spawn: false,
            in_recycler_range: false,
        }
    }
}
