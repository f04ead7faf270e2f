//! Value-type tile coordinates.
//!
//! Every map lookup keyed by a position uses [`TilePos`]. Coordinates are
//! signed so that neighbours of edge tiles can be expressed (and then
//! rejected by a bounds check) without underflow gymnastics.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Cardinal offsets in north, south, west, east order.
const CARDINAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// All eight offsets surrounding a tile, row by row.
const SURROUNDING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A tile coordinate on the world grid.
///
/// Ordered row-major (`y` first, then `x`) so that ordered collections of
/// positions iterate the way the grid is stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct TilePos {
    /// Column, growing eastwards.
    pub x: i32,
    /// Row, growing southwards.
    pub y: i32,
}

impl TilePos {
    /// Create a position from its column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the position shifted by `(dx, dy)`, saturating at the `i32`
    /// range so the result is always representable.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// The four cardinal neighbours (north, south, west, east).
    pub fn cardinal_neighbors(self) -> [Self; 4] {
        CARDINAL.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// The eight surrounding neighbours, diagonals included.
    pub fn surrounding(self) -> [Self; 8] {
        SURROUNDING.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// Manhattan distance to another position.
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

impl PartialOrd for TilePos {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TilePos {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl core::fmt::Display for TilePos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
