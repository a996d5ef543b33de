//! Error type for plate generation.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Every fallible operation returns `Result<T, Error>`. `thiserror` derives
//! `Display` and `std::error::Error` from the `#[error(...)]` attributes,
//! so callers can use `?` and still get readable messages.

use thiserror::Error;

use crate::hex::GridCoord;

/// Everything that can go wrong while turning a grid into cut geometry.
///
/// Errors abort the group being processed. Groups already handed to a
/// drawing sink are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("cell ({column}, {row}) appears more than once")]
    DuplicateCell { column: i32, row: i32 },

    /// Neighbour and triangle lookups step two cells past the group, so
    /// coordinates must stay that far inside the `i32` range.
    #[error("cell ({column}, {row}) is too close to the edge of the grid")]
    CellOutOfRange { column: i32, row: i32 },

    /// A direction was requested from a zero-length vector: coincident
    /// nodes, a zero-area triangle, or constants that collapse a hole.
    #[error("degenerate geometry at node ({column}, {row})")]
    DegenerateGeometry { column: i32, row: i32 },

    #[error("reference point at node ({column}, {row}) has {candidates} nearest neighbours, expected 2")]
    UnmatchedReferencePoint {
        column: i32,
        row: i32,
        candidates: usize,
    },

    #[error("configuration value `{field}` must be positive and finite, got {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("configuration value `{field}` = {value} closes the triangular hole (limit {limit})")]
    HoleTooSmall {
        field: &'static str,
        value: f64,
        limit: f64,
    },

    #[error("layer {layer} arrived after layer {previous}")]
    LayerOutOfOrder { layer: usize, previous: usize },
}

impl Error {
    pub(crate) fn degenerate_at(coord: GridCoord) -> Self {
        Error::DegenerateGeometry {
            column: coord.column,
            row: coord.row,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
