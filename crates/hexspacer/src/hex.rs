//! Offset-row hexagonal grid.
//!
//! Cells are addressed by `(column, row)`. Odd rows are shifted right by
//! `row_offset` columns, which gives each cell six neighbours: two in its
//! own row and two in each adjacent row. Which diagonal pair applies
//! depends on the parity of the row.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::config::PlateConfig;
use crate::geometry::Vector;

/// Integer address of a grid cell.
///
/// Ordered row-major so that iterating a `BTreeSet<GridCoord>` walks the
/// grid bottom to top, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub column: i32,
    pub row: i32,
}

impl GridCoord {
    #[inline]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// True for rows shifted by the row offset. Negative rows follow the
    /// same alternation (`-1` is odd).
    #[inline]
    pub fn is_odd_row(&self) -> bool {
        self.row.rem_euclid(2) == 1
    }

    #[inline]
    pub fn right(&self) -> Self {
        Self::new(self.column + 1, self.row)
    }

    /// Upper neighbour on the right-hand diagonal.
    #[inline]
    pub fn up(&self) -> Self {
        let shift = if self.is_odd_row() { 1 } else { 0 };
        Self::new(self.column + shift, self.row + 1)
    }

    /// Lower neighbour on the right-hand diagonal.
    #[inline]
    pub fn down(&self) -> Self {
        let shift = if self.is_odd_row() { 1 } else { 0 };
        Self::new(self.column + shift, self.row - 1)
    }

    /// All six grid neighbours: left/right and the two straight row
    /// neighbours first, then the parity-dependent diagonals.
    pub fn neighbors(&self) -> [GridCoord; 6] {
        let Self { column, row } = *self;
        let diagonal = if self.is_odd_row() { column + 1 } else { column - 1 };
        [
            Self::new(column + 1, row),
            Self::new(column - 1, row),
            Self::new(column, row + 1),
            Self::new(column, row - 1),
            Self::new(diagonal, row + 1),
            Self::new(diagonal, row - 1),
        ]
    }

    pub fn is_adjacent(&self, other: &GridCoord) -> bool {
        self.neighbors().contains(other)
    }

    /// Cartesian position of the cell centre.
    pub fn position(&self, layout: &HexLayout) -> Vector {
        position(self.column, self.row, layout.pitch_x, layout.pitch_y, layout.row_offset)
    }
}

impl Ord for GridCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.column.cmp(&other.column))
    }
}

impl PartialOrd for GridCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((column, row): (i32, i32)) -> Self {
        Self::new(column, row)
    }
}

/// Scale and shift of the grid in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    pub pitch_x: f64,
    pub pitch_y: f64,
    pub row_offset: f64,
}

impl From<&PlateConfig> for HexLayout {
    fn from(config: &PlateConfig) -> Self {
        Self {
            pitch_x: config.pitch_x,
            pitch_y: config.pitch_y,
            row_offset: config.row_offset,
        }
    }
}

/// Map `(column, row)` to drawing coordinates.
pub fn position(column: i32, row: i32, scale_x: f64, scale_y: f64, row_offset: f64) -> Vector {
    let parity = row.rem_euclid(2) as f64;
    Vector::new(
        (column as f64 + parity * row_offset) * scale_x,
        row as f64 * scale_y,
    )
}

/// A grid cell together with its position under one layout.
///
/// Identity is the grid address alone; the position is derived data.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub coord: GridCoord,
    pub position: Vector,
}

impl Node {
    pub fn new(coord: GridCoord, layout: &HexLayout) -> Self {
        Self {
            coord,
            position: coord.position(layout),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.coord.cmp(&other.coord)
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
