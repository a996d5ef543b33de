//! Grid triangles and their classification.
//!
//! Three mutually adjacent cells enclose one triangular hole. Every cell of
//! the scan window acts as the "left" corner of two triangles, one pointing
//! up and one pointing down, so each cell ends up touching six triangles.

use crate::config::PlateConfig;
use crate::error::{Error, Result};
use crate::geometry::{Vector, centroid};
use crate::group::Group;
use crate::hex::{GridCoord, HexLayout, Node};

/// Which side of the `left → right` edge the third corner sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Up,
    Down,
}

impl Orientation {
    /// `+1` for up, `-1` for down.
    pub fn sign(self) -> i8 {
        match self {
            Orientation::Up => 1,
            Orientation::Down => -1,
        }
    }
}

/// How many corners of a triangle are occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TriangleClass {
    Empty,
    Single,
    /// Two corners occupied; holds the indices of the present corners in
    /// drawing order and the sign that mirrors their fillets.
    Edge { first: usize, second: usize, third: usize, sign: i8 },
    Full,
}

impl TriangleClass {
    /// Number of occupied corners (0-3).
    pub fn count(&self) -> usize {
        match self {
            TriangleClass::Empty => 0,
            TriangleClass::Single => 1,
            TriangleClass::Edge { .. } => 2,
            TriangleClass::Full => 3,
        }
    }
}

/// Three pairwise adjacent nodes and the shrunken hole between them.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub nodes: [Node; 3],
    pub orientation: Orientation,
    /// Corners moved toward the centroid by the connection width.
    pub hole: [Vector; 3],
}

impl Triangle {
    pub fn new(nodes: [Node; 3], orientation: Orientation, connection_width: f64) -> Result<Self> {
        let positions = nodes.map(|n| n.position);
        let center = centroid(&positions).unwrap_or(Vector::ZERO);

        let mut hole = [Vector::ZERO; 3];
        for (slot, node) in hole.iter_mut().zip(&nodes) {
            let inward = (center - node.position)
                .normalize()
                .map_err(|_| Error::degenerate_at(node.coord))?;
            *slot = node.position + inward * connection_width;
        }

        Ok(Self { nodes, orientation, hole })
    }

    pub fn coords(&self) -> [GridCoord; 3] {
        self.nodes.map(|n| n.coord)
    }

    /// Classify against a group.
    ///
    /// For two occupied corners the present pair is ordered as
    /// (first, second), (first, third) or (third, second), and the
    /// orientation sign is negated for the last two so the fillets mirror
    /// correctly.
    pub fn classify(&self, group: &Group) -> TriangleClass {
        let present = self.coords().map(|c| group.contains(c));
        let sign = self.orientation.sign();
        match present {
            [true, true, true] => TriangleClass::Full,
            [true, true, false] => TriangleClass::Edge { first: 0, second: 1, third: 2, sign },
            [true, false, true] => TriangleClass::Edge { first: 0, second: 2, third: 1, sign: -sign },
            [false, true, true] => TriangleClass::Edge { first: 2, second: 1, third: 0, sign: -sign },
            [false, false, false] => TriangleClass::Empty,
            _ => TriangleClass::Single,
        }
    }
}

/// Every triangle touching the group, plus the ring around it.
///
/// The window spans rows `bottom-1 ..= top+1` and columns
/// `left-1 ..= right`; with each cell as a left corner this reaches all six
/// triangles of every occupied cell. Order is row-major, up before down.
pub fn enumerate(group: &Group, config: &PlateConfig) -> Result<Vec<Triangle>> {
    let layout = HexLayout::from(config);
    let bounds = group.bounds();
    let node = |coord: GridCoord| Node::new(coord, &layout);

    let mut triangles = Vec::new();
    for row in (bounds.bottom - 1)..=(bounds.top + 1) {
        for column in (bounds.left - 1)..=bounds.right {
            let left = GridCoord::new(column, row);
            let right = left.right();
            triangles.push(Triangle::new(
                [node(left), node(right), node(left.up())],
                Orientation::Up,
                config.connection_width,
            )?);
            triangles.push(Triangle::new(
                [node(left), node(right), node(left.down())],
                Orientation::Down,
                config.connection_width,
            )?);
        }
    }
    Ok(triangles)
}
