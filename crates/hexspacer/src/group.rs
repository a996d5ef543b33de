//! Occupied-cell sets.
//!
//! A [`Group`] is the set of cells welded by one strip (or held by one
//! spacer layer). It is validated once at construction and never changes
//! afterwards.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::hex::GridCoord;

/// Inclusive column/row extents of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
}

impl GridBounds {
    fn of(coord: GridCoord) -> Self {
        Self {
            left: coord.column,
            right: coord.column,
            bottom: coord.row,
            top: coord.row,
        }
    }

    fn including(self, coord: GridCoord) -> Self {
        Self {
            left: self.left.min(coord.column),
            right: self.right.max(coord.column),
            bottom: self.bottom.min(coord.row),
            top: self.top.max(coord.row),
        }
    }
}

/// Triangle enumeration reaches two rows and columns past the group.
const GRID_MARGIN: i32 = 2;

fn in_range(coord: GridCoord) -> bool {
    let range = (i32::MIN + GRID_MARGIN)..=(i32::MAX - GRID_MARGIN);
    range.contains(&coord.column) && range.contains(&coord.row)
}

/// An immutable set of occupied cells plus its layer index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    cells: BTreeSet<GridCoord>,
    bounds: GridBounds,
    layer: usize,
}

impl Group {
    /// Build a group from `(column, row)` pairs.
    ///
    /// Rejects an empty list, repeated cells and cells within two steps of
    /// the `i32` limits before any geometry is computed.
    pub fn new<I, C>(cells: I, layer: usize) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<GridCoord>,
    {
        let mut set = BTreeSet::new();
        for cell in cells {
            let coord = cell.into();
            if !in_range(coord) {
                return Err(Error::CellOutOfRange {
                    column: coord.column,
                    row: coord.row,
                });
            }
            if !set.insert(coord) {
                return Err(Error::DuplicateCell {
                    column: coord.column,
                    row: coord.row,
                });
            }
        }
        Self::from_set(set, layer)
    }

    fn from_set(cells: BTreeSet<GridCoord>, layer: usize) -> Result<Self> {
        let mut iter = cells.iter().copied();
        let first = iter.next().ok_or(Error::EmptyGrid)?;
        let bounds = iter.fold(GridBounds::of(first), GridBounds::including);
        Ok(Self { cells, bounds, layer })
    }

    /// Build the strips of a series pack.
    ///
    /// For parallel groups `S0..Sn-1` the plates are
    /// `S0, S0∪S1, S1∪S2, …, Sn-2∪Sn-1, Sn-1`: every inner plate welds two
    /// neighbouring groups together, the outer two carry the terminals.
    /// Layer indices follow list order.
    pub fn stack<S, C>(cell_sets: &[S]) -> Result<Vec<Group>>
    where
        S: AsRef<[C]>,
        C: Into<GridCoord> + Copy,
    {
        let groups = cell_sets
            .iter()
            .map(|set| Group::new(set.as_ref().iter().copied(), 0))
            .collect::<Result<Vec<_>>>()?;

        let (Some(first), Some(last)) = (groups.first(), groups.last()) else {
            return Err(Error::EmptyGrid);
        };

        let mut stacked = Vec::with_capacity(groups.len() + 1);
        stacked.push(first.cells.clone());
        for pair in groups.windows(2) {
            stacked.push(pair[0].cells.union(&pair[1].cells).copied().collect());
        }
        stacked.push(last.cells.clone());

        stacked
            .into_iter()
            .enumerate()
            .map(|(layer, cells)| Self::from_set(cells, layer))
            .collect()
    }

    pub fn cells(&self) -> &BTreeSet<GridCoord> {
        &self.cells
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Grid-adjacency edges with both ends in the group, each listed once
    /// with the smaller coordinate first.
    pub fn internal_edges(&self) -> Vec<(GridCoord, GridCoord)> {
        self.cells
            .iter()
            .flat_map(|&a| {
                a.neighbors()
                    .into_iter()
                    .filter(move |b| a < *b)
                    .map(move |b| (a, b))
            })
            .filter(|(_, b)| self.cells.contains(b))
            .collect()
    }
}
