//! Reference points: which hole vertices sit around which cell.
//!
//! While triangles are drawn, each hole vertex is filed under the cell it
//! was shrunk from. The synthesizer then asks two kinds of question:
//! "which vertices around this cell are closest to this one?" (to stitch a
//! shared-edge fillet to its neighbour) and "which vertices are still
//! undrawn?" (to close open facets in the corner pass).
//!
//! The registry lives for one group only and is dropped afterwards.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::geometry::Vector;
use crate::hex::GridCoord;

/// Distances closer than this to the minimum count as a tie.
pub const TIE_TOLERANCE: f64 = 0.001;

/// Index of a reference point inside its registry.
pub type ReferenceId = usize;

/// One hole vertex and the cells of the triangle that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub node: GridCoord,
    pub vertex: Vector,
    pub touched: [GridCoord; 2],
}

/// Reference lists per cell plus consumed flags, both keyed by id.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    points: Vec<ReferencePoint>,
    consumed: Vec<bool>,
    by_node: BTreeMap<GridCoord, Vec<ReferenceId>>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, point: ReferencePoint) -> ReferenceId {
        let id = self.points.len();
        self.points.push(point);
        self.consumed.push(false);
        self.by_node.entry(point.node).or_default().push(id);
        id
    }

    pub fn get(&self, id: ReferenceId) -> &ReferencePoint {
        &self.points[id]
    }

    /// Ids registered for a cell, in registration order.
    pub fn at(&self, node: GridCoord) -> &[ReferenceId] {
        self.by_node.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mark a point as drawn. Returns false if it already was.
    pub fn consume(&mut self, id: ReferenceId) -> bool {
        !std::mem::replace(&mut self.consumed[id], true)
    }

    pub fn unconsumed_at(&self, node: GridCoord) -> impl Iterator<Item = ReferenceId> + '_ {
        self.at(node).iter().copied().filter(|&id| !self.consumed[id])
    }

    /// Other points around the same cell at the minimum distance from `id`.
    ///
    /// Distances within [`TIE_TOLERANCE`] of the minimum tie. Ties are
    /// ordered by distance from `secondary`, farthest first, then by exact
    /// coordinates so the order is total. Points coinciding with `id`'s
    /// vertex are ignored.
    pub fn nearest(&self, id: ReferenceId, secondary: Vector) -> Vec<ReferenceId> {
        let origin = self.points[id].vertex;
        let candidates: Vec<(ReferenceId, f64)> = self
            .at(self.points[id].node)
            .iter()
            .map(|&other| (other, self.points[other].vertex.distance(origin)))
            .filter(|&(_, distance)| distance != 0.0)
            .collect();

        let Some(shortest) = candidates.iter().map(|&(_, d)| d).min_by(f64::total_cmp) else {
            return Vec::new();
        };

        let mut tied: Vec<ReferenceId> = candidates
            .into_iter()
            .filter(|&(_, distance)| (distance - shortest).abs() < TIE_TOLERANCE)
            .map(|(other, _)| other)
            .collect();
        tied.sort_by(|&a, &b| self.secondary_order(a, b, secondary));
        tied
    }

    fn secondary_order(&self, a: ReferenceId, b: ReferenceId, secondary: Vector) -> Ordering {
        let va = self.points[a].vertex;
        let vb = self.points[b].vertex;
        vb.distance(secondary)
            .total_cmp(&va.distance(secondary))
            .then_with(|| va.total_cmp(&vb))
    }
}
