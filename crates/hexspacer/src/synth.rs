//! Boundary synthesis: turn a group into cut geometry.
//!
//! The plate is a web of strips along every grid edge between two occupied
//! cells, with a round pad around each cell. The cut path is assembled from
//! the triangles of the grid:
//!
//! - **Full triangles** (all three cells occupied) become a triangular hole
//!   with rounded corners.
//! - **Edge triangles** (two cells occupied) contribute the outer edge of
//!   one strip: two half lines meeting at the edge midpoint, each ending in
//!   a small reentrant fillet that turns toward the neighbouring hole vertex.
//! - **Single/empty triangles** draw nothing themselves. After all
//!   triangles are done, a corner pass walks every occupied cell and closes
//!   each still-open facet with an arc centred on the cell.
//!
//! Hole vertices are tracked in a [`ReferenceRegistry`] so that every
//! vertex of an occupied cell is drawn exactly once, either by its triangle
//! or by the corner pass.
//!
//! # Algorithm
//!
//! 1. Enumerate the triangles of the scan window (see [`triangle::enumerate`])
//! 2. Register all hole vertices under their cell
//! 3. Draw full and edge triangles, consuming their vertices
//! 4. Corner pass over occupied cells in row-major order
//! 5. Report one connection per occupied grid edge

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6, PI};

use log::{debug, trace, warn};
use serde::Serialize;

use crate::config::PlateConfig;
use crate::error::{Error, Result};
use crate::geometry::{Vector, normalize_angle};
use crate::group::Group;
use crate::hex::{GridCoord, HexLayout};
use crate::reference::{ReferenceId, ReferencePoint, ReferenceRegistry};
use crate::shape::Shape;
use crate::triangle::{self, Triangle, TriangleClass};

/// tan(15°): tangent length of a 30° fillet of unit radius.
const TAN_15: f64 = 0.267_949_192_431_122_7;

/// One strip between two occupied neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub a: GridCoord,
    pub b: GridCoord,
    /// Flanking triangles that drew a side of this strip.
    pub sides: u8,
}

/// Counters describing what one group produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutlineStats {
    pub triangles: usize,
    pub rounded_triangles: usize,
    pub rounded_lines: usize,
    pub corner_fillets: usize,
    /// Corners drawn although their vertex did not tie with exactly two
    /// neighbours. Non-zero only for off-regular pitches.
    pub irregular_corners: usize,
    pub skipped_corners: usize,
}

/// Cut geometry for one group, in grid coordinates (not yet placed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupOutline {
    pub layer: usize,
    pub shapes: Vec<Shape>,
    pub connections: Vec<Connection>,
    /// Hole vertices of occupied cells that nothing drew. Empty unless a
    /// corner was skipped.
    pub open_vertices: Vec<(GridCoord, Vector)>,
    pub stats: OutlineStats,
}

/// Synthesize the cut path of one group.
pub fn synthesize(group: &Group, config: &PlateConfig) -> Result<GroupOutline> {
    config.validate()?;
    let triangles = triangle::enumerate(group, config)?;

    let mut synth = Synthesizer::new(group, config);
    let ids: Vec<[ReferenceId; 3]> = triangles.iter().map(|t| synth.register(t)).collect();

    for (triangle, ids) in triangles.iter().zip(&ids) {
        match triangle.classify(group) {
            TriangleClass::Full => synth.rounded_triangle(triangle, *ids)?,
            TriangleClass::Edge { first, second, third, sign } => {
                synth.rounded_line(triangle, *ids, [first, second, third], sign)?
            }
            TriangleClass::Single | TriangleClass::Empty => {}
        }
    }

    for &coord in group.cells() {
        let open: Vec<ReferenceId> = synth.registry.unconsumed_at(coord).collect();
        for id in open {
            synth.corner(id)?;
        }
    }

    synth.stats.triangles = triangles.len();
    if synth.stats.irregular_corners > 0 {
        warn!(
            "layer {}: {} corners without a regular pair of neighbours; pitches are not equilateral",
            group.layer(),
            synth.stats.irregular_corners
        );
    }
    let outline = synth.finish();
    debug!(
        "layer {}: {} cells, {} triangles ({} full, {} edge), {} corners, {} shapes",
        outline.layer,
        group.len(),
        outline.stats.triangles,
        outline.stats.rounded_triangles,
        outline.stats.rounded_lines,
        outline.stats.corner_fillets,
        outline.shapes.len()
    );
    Ok(outline)
}

/// Per-group working state. Dropped once the outline is built.
struct Synthesizer<'a> {
    group: &'a Group,
    config: &'a PlateConfig,
    layout: HexLayout,
    registry: ReferenceRegistry,
    shapes: Vec<Shape>,
    sides: BTreeMap<(GridCoord, GridCoord), u8>,
    stats: OutlineStats,
}

impl<'a> Synthesizer<'a> {
    fn new(group: &'a Group, config: &'a PlateConfig) -> Self {
        Self {
            group,
            config,
            layout: HexLayout::from(config),
            registry: ReferenceRegistry::new(),
            shapes: Vec::new(),
            sides: BTreeMap::new(),
            stats: OutlineStats::default(),
        }
    }

    fn register(&mut self, triangle: &Triangle) -> [ReferenceId; 3] {
        let coords = triangle.coords();
        [0, 1, 2].map(|i| {
            self.registry.register(ReferencePoint {
                node: coords[i],
                vertex: triangle.hole[i],
                touched: [coords[(i + 1) % 3], coords[(i + 2) % 3]],
            })
        })
    }

    fn consume(&mut self, id: ReferenceId) {
        if !self.registry.consume(id) {
            let point = self.registry.get(id);
            warn!("hole vertex at {:?} drawn twice", point.node);
        }
    }

    fn record_side(&mut self, a: GridCoord, b: GridCoord) {
        let key = if a < b { (a, b) } else { (b, a) };
        *self.sides.entry(key).or_default() += 1;
    }

    fn rounded_triangle(&mut self, triangle: &Triangle, ids: [ReferenceId; 3]) -> Result<()> {
        for id in ids {
            self.consume(id);
        }
        let [c0, c1, c2] = triangle.coords();
        let [h0, h1, h2] = triangle.hole;
        let margin = 3.0_f64.sqrt() * self.config.fillet_radius;

        self.triangle_corner(c0, h0, h1, h2)?;
        self.triangle_corner(c2, h2, h0, h1)?;
        self.triangle_corner(c1, h1, h2, h0)?;
        self.line_with_margins(c0, h0, h1, margin)?;
        self.line_with_margins(c1, h1, h2, margin)?;
        self.line_with_margins(c2, h2, h0, margin)?;

        self.record_side(c0, c1);
        self.record_side(c1, c2);
        self.record_side(c2, c0);
        self.stats.rounded_triangles += 1;
        Ok(())
    }

    /// 120° arc inscribed in the hole corner at `vertex`.
    fn triangle_corner(&mut self, at: GridCoord, vertex: Vector, left: Vector, right: Vector) -> Result<()> {
        let radius = self.config.fillet_radius;
        let inward = (left.midpoint(right) - vertex)
            .normalize()
            .map_err(|_| Error::degenerate_at(at))?;
        let center = vertex + inward * (2.0 * radius);
        let start = normalize_angle((-inward).angle() - FRAC_PI_3);
        self.shapes.push(Shape::arc(center, radius, start, 2.0 * FRAC_PI_3));
        Ok(())
    }

    fn line_with_margins(&mut self, at: GridCoord, start: Vector, end: Vector, margin: f64) -> Result<()> {
        let step = (end - start)
            .normalize()
            .map_err(|_| Error::degenerate_at(at))?
            * margin;
        self.shapes.push(Shape::line(start + step, end - step));
        Ok(())
    }

    fn rounded_line(
        &mut self,
        triangle: &Triangle,
        ids: [ReferenceId; 3],
        [first, second, third]: [usize; 3],
        sign: i8,
    ) -> Result<()> {
        let coords = triangle.coords();
        let (a, b, c) = (triangle.hole[first], triangle.hole[second], triangle.hole[third]);
        self.round_corner(ids[first], coords[first], a, b, c, sign)?;
        self.round_corner(ids[second], coords[second], b, a, c, -sign)?;
        self.record_side(coords[first], coords[second]);
        self.stats.rounded_lines += 1;
        Ok(())
    }

    /// Half of a strip edge, from `a` toward the midpoint of `a`-`b`, plus
    /// the fillet and stub that join it to the neighbouring hole vertex.
    ///
    /// `c` is the vertex of the absent cell; the fillet centre sits on its
    /// side of the edge. `sign` is positive when `c` lies left of `a → b`.
    fn round_corner(
        &mut self,
        id: ReferenceId,
        at: GridCoord,
        a: Vector,
        b: Vector,
        c: Vector,
        sign: i8,
    ) -> Result<()> {
        self.consume(id);
        let radius = self.config.fillet_radius;
        let tangent = radius * TAN_15;
        let degenerate = |_| Error::degenerate_at(at);

        let along = (b - a).normalize().map_err(degenerate)?;
        // the absent corner mirrored through the edge: perpendicular to it
        let outward = ((c - a) * 2.0 - (b - a)).normalize().map_err(degenerate)?;
        let center = a + outward * radius + along * tangent;

        let mut start = along.angle() + FRAC_PI_2;
        if sign > 0 {
            start += 5.0 * PI / 6.0;
        }
        self.shapes.push(Shape::arc(center, radius, normalize_angle(start), FRAC_PI_6));
        self.shapes.push(Shape::line(a + along * tangent, a.midpoint(b)));

        let Some(&neighbor) = self.registry.nearest(id, b).first() else {
            return self.unmatched(id, 0);
        };
        let e = self.registry.get(neighbor).vertex;
        let toward = (e - a).normalize().map_err(degenerate)?;
        self.shapes.push(Shape::line(a + toward * tangent, a.midpoint(e)));
        Ok(())
    }

    /// Close an open facet of an occupied cell with an arc centred on it.
    ///
    /// The arc is aimed along the cell-to-vertex direction, which bisects
    /// the facet. On a regular grid the vertex ties with exactly two
    /// neighbours; anything else is counted but still drawn.
    fn corner(&mut self, id: ReferenceId) -> Result<()> {
        let point = *self.registry.get(id);
        let node = point.node.position(&self.layout);

        let candidates = self.registry.nearest(id, node).len();
        if candidates == 0 {
            return self.unmatched(id, candidates);
        }
        if candidates != 2 {
            debug!("corner at {:?} has {} nearest neighbours", point.node, candidates);
            self.stats.irregular_corners += 1;
        }
        self.consume(id);

        let facing = (point.vertex - node)
            .normalize()
            .map_err(|_| Error::degenerate_at(point.node))?;
        let start = normalize_angle(facing.angle() - FRAC_PI_6);
        let radius = self.config.corner_radius();
        trace!("corner at {:?} facing {:.3} rad", point.node, facing.angle());
        self.shapes.push(Shape::arc(node, radius, start, FRAC_PI_3));
        self.stats.corner_fillets += 1;
        Ok(())
    }

    /// A cell surrounded on all six sides.
    fn is_interior(&self, coord: GridCoord) -> bool {
        coord.neighbors().iter().all(|n| self.group.contains(*n))
    }

    /// Reference point without a partner.
    ///
    /// Boundary cells may legitimately leave a facet open and are skipped
    /// with a warning. An interior cell should never get here, so strict
    /// mode refuses it.
    fn unmatched(&mut self, id: ReferenceId, candidates: usize) -> Result<()> {
        let point = *self.registry.get(id);
        if self.config.strict_corners && self.is_interior(point.node) {
            return Err(Error::UnmatchedReferencePoint {
                column: point.node.column,
                row: point.node.row,
                candidates,
            });
        }
        warn!(
            "skipping corner at {:?} (triangle with {:?}): {} candidates",
            point.node, point.touched, candidates
        );
        self.stats.skipped_corners += 1;
        Ok(())
    }

    fn finish(self) -> GroupOutline {
        let connections = self
            .sides
            .iter()
            .map(|(&(a, b), &sides)| Connection { a, b, sides })
            .collect();

        let open_vertices = self
            .group
            .cells()
            .iter()
            .flat_map(|&coord| {
                self.registry
                    .unconsumed_at(coord)
                    .map(|id| (coord, self.registry.get(id).vertex))
                    .collect::<Vec<_>>()
            })
            .collect();

        GroupOutline {
            layer: self.group.layer(),
            shapes: self.shapes,
            connections,
            open_vertices,
            stats: self.stats,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn config() -> PlateConfig {
        PlateConfig::hexagonal(18.0, 5.0)
    }

    fn outline(cells: &[(i32, i32)]) -> GroupOutline {
        let group = Group::new(cells.iter().copied(), 0).unwrap();
        synthesize(&group, &config()).unwrap()
    }

    fn arcs(outline: &GroupOutline) -> Vec<Shape> {
        outline.shapes.iter().copied().filter(Shape::is_arc).collect()
    }

    fn lines(outline: &GroupOutline) -> usize {
        outline.shapes.iter().filter(|s| !s.is_arc()).count()
    }

    /// Every shape endpoint must meet an endpoint of another shape.
    fn assert_closed(outline: &GroupOutline) {
        let ends: Vec<(usize, Vector)> = outline
            .shapes
            .iter()
            .enumerate()
            .flat_map(|(i, s)| {
                let (from, to) = s.endpoints();
                [(i, from), (i, to)]
            })
            .collect();
        for &(i, p) in &ends {
            let joined = ends.iter().any(|&(j, q)| j != i && p.distance(q) < 1e-6);
            assert!(joined, "loose end at {p:?} of shape {:?}", outline.shapes[i]);
        }
    }

    #[test]
    fn single_cell_is_a_full_circle_of_six_fillets() {
        let outline = outline(&[(0, 0)]);
        assert_eq!(outline.shapes.len(), 6);
        assert_eq!(lines(&outline), 0);

        let mut starts = BTreeSet::new();
        for shape in arcs(&outline) {
            let Shape::Arc { center, radius, start_angle, sweep } = shape else { unreachable!() };
            assert_eq!(center, Vector::ZERO);
            assert_relative_eq!(radius, config().corner_radius());
            assert_relative_eq!(sweep, FRAC_PI_3);
            // starts land on multiples of 60°
            let sixth = start_angle / FRAC_PI_3;
            assert_relative_eq!(sixth, sixth.round(), epsilon = 1e-9);
            starts.insert(sixth.round() as i64 % 6);
        }
        assert_eq!(starts.len(), 6);
        assert!(outline.connections.is_empty());
        assert!(outline.open_vertices.is_empty());
        assert_closed(&outline);
    }

    #[test]
    fn neighbouring_pair_shares_one_strip() {
        let outline = outline(&[(0, 0), (1, 0)]);
        assert_eq!(
            outline.connections,
            vec![Connection { a: GridCoord::new(0, 0), b: GridCoord::new(1, 0), sides: 2 }]
        );
        assert_eq!(outline.stats.rounded_lines, 2);
        assert_eq!(outline.stats.rounded_triangles, 0);
        // four open facets per cell
        assert_eq!(outline.stats.corner_fillets, 8);
        assert_eq!(arcs(&outline).len(), 4 + 8);
        assert_eq!(lines(&outline), 8);
        assert_closed(&outline);
    }

    #[test]
    fn strip_half_lines_stop_short_of_the_hole_vertex() {
        let outline = outline(&[(0, 0), (1, 0)]);
        let margin = TAN_15 * config().fillet_radius;
        // the up-triangle strip edge runs parallel to the grid edge
        let y = 2.5;
        let strip: Vec<(Vector, Vector)> = outline
            .shapes
            .iter()
            .filter_map(|s| match *s {
                Shape::Line { start, end } if (start.y - y).abs() < 1e-9 && (end.y - y).abs() < 1e-9 => {
                    Some((start, end))
                }
                _ => None,
            })
            .collect();
        assert_eq!(strip.len(), 2);
        let hole_x = 5.0 * (FRAC_PI_6).cos();
        assert_relative_eq!(strip[0].0.x, hole_x + margin, epsilon = 1e-9);
        assert_relative_eq!(strip[0].1.x, 9.0, epsilon = 1e-9);
    }

    #[test]
    fn mutually_adjacent_triple_has_one_rounded_triangle() {
        let outline = outline(&[(0, 0), (1, 0), (0, 1)]);
        assert_eq!(outline.stats.rounded_triangles, 1);
        assert_eq!(outline.stats.rounded_lines, 3);
        assert_eq!(outline.stats.corner_fillets, 9);
        assert_eq!(arcs(&outline).len(), 3 + 6 + 9);
        assert_eq!(lines(&outline), 3 + 12);
        assert_eq!(outline.connections.len(), 3);
        assert!(outline.connections.iter().all(|c| c.sides == 2));

        // no corner fillet faces into the shared hole
        let hole_center = Vector::new(9.0, 18.0 * 3.0_f64.sqrt() / 6.0);
        for shape in arcs(&outline) {
            let Shape::Arc { center, radius, start_angle, sweep } = shape else { unreachable!() };
            if radius == config().corner_radius() {
                let facing = Vector::from_angle(start_angle + sweep / 2.0);
                let toward_hole = (hole_center - center).normalize().unwrap();
                let alignment = facing.x * toward_hole.x + facing.y * toward_hole.y;
                assert!(alignment < 0.9, "corner at {center:?} faces the hole");
            }
        }
        assert_closed(&outline);
    }

    #[test]
    fn interior_cell_is_fully_closed_without_corners() {
        let center = GridCoord::new(0, 0);
        let mut cells = vec![(0, 0)];
        cells.extend(center.neighbors().iter().map(|c| (c.column, c.row)));
        let outline = outline(&cells);

        let node = center.position(&HexLayout::from(&config()));
        let around_center = outline.shapes.iter().any(|s| match *s {
            Shape::Arc { center, .. } => center == node,
            _ => false,
        });
        assert!(!around_center, "interior cell must not get corner fillets");
        assert_eq!(outline.stats.rounded_triangles, 6);
        assert!(outline.open_vertices.is_empty());
        assert_closed(&outline);
    }

    #[test]
    fn irregular_pack_closes() {
        // irregular blob with concave notches
        let outline = outline(&[
            (0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2),
            (1, 3), (0, -1), (2, 1), (-1, 2), (2, 2),
        ]);
        assert!(outline.open_vertices.is_empty());
        assert_eq!(outline.stats.skipped_corners, 0);
        assert_closed(&outline);
    }

    #[test]
    fn strict_mode_is_satisfied_by_regular_groups() {
        let group = Group::new([(0, 0), (2, 0), (1, 1)], 0).unwrap();
        let strict = config().with_strict_corners(true);
        assert!(synthesize(&group, &strict).is_ok());
    }

    #[test]
    fn off_regular_row_pitch_still_closes_every_facet() {
        // 15.6 instead of 15.588…: vertex distances no longer tie
        let skewed = PlateConfig { pitch_y: 15.6, ..config() };
        let group = Group::new([(0, 0)], 0).unwrap();
        let outline = synthesize(&group, &skewed).unwrap();
        assert_eq!(outline.stats.corner_fillets, 6);
        assert_eq!(outline.stats.skipped_corners, 0);
        assert!(outline.stats.irregular_corners > 0);
        assert!(outline.open_vertices.is_empty());
        for shape in &outline.shapes {
            let Shape::Arc { center, sweep, .. } = *shape else { panic!("unexpected {shape:?}") };
            assert_eq!(center, Vector::ZERO);
            assert_relative_eq!(sweep, FRAC_PI_3);
        }

        let triple = Group::new([(0, 0), (1, 0), (0, 1)], 0).unwrap();
        let outline = synthesize(&triple, &skewed).unwrap();
        assert_eq!(outline.stats.corner_fillets, 9);
        assert_eq!(outline.stats.skipped_corners, 0);
        assert!(outline.open_vertices.is_empty());
    }

    #[test]
    fn corner_arc_is_centred_on_the_vertex_direction() {
        let skewed = PlateConfig { pitch_y: 15.6, ..config() };
        let group = Group::new([(0, 0)], 0).unwrap();
        let triangles = triangle::enumerate(&group, &skewed).unwrap();
        let vertices: Vec<Vector> = triangles
            .iter()
            .flat_map(|t| t.coords().into_iter().zip(t.hole))
            .filter(|(c, _)| *c == GridCoord::new(0, 0))
            .map(|(_, v)| v)
            .collect();
        let outline = synthesize(&group, &skewed).unwrap();
        for shape in &outline.shapes {
            let Shape::Arc { start_angle, sweep, .. } = *shape else { continue };
            let middle = Vector::from_angle(start_angle + sweep / 2.0);
            let aimed = vertices
                .iter()
                .any(|v| v.normalize().is_ok_and(|d| d.distance(middle) < 1e-9));
            assert!(aimed, "arc at {start_angle} is not aimed at a hole vertex");
        }
    }

    /// Run the corner pass on a cell whose registry holds one vertex only.
    fn close_lone_vertex(cells: &[(i32, i32)], config: &PlateConfig) -> (Result<()>, GroupOutline) {
        let group = Group::new(cells.iter().copied(), 0).unwrap();
        let mut synth = Synthesizer::new(&group, config);
        let node = GridCoord::new(0, 0);
        let id = synth.registry.register(ReferencePoint {
            node,
            vertex: Vector::new(0.0, 5.0),
            touched: [node.right(), node.up()],
        });
        let result = synth.corner(id);
        (result, synth.finish())
    }

    fn surrounded_cell() -> Vec<(i32, i32)> {
        let mut cells = vec![(0, 0)];
        cells.extend(GridCoord::new(0, 0).neighbors().iter().map(|c| (c.column, c.row)));
        cells
    }

    #[test]
    fn unmatched_boundary_corner_is_skipped() {
        let (result, outline) = close_lone_vertex(&[(0, 0), (1, 0)], &config());
        assert_eq!(result, Ok(()));
        assert_eq!(outline.stats.skipped_corners, 1);
        assert_eq!(outline.stats.corner_fillets, 0);
        assert!(outline.shapes.is_empty());
        assert_eq!(outline.open_vertices, vec![(GridCoord::new(0, 0), Vector::new(0.0, 5.0))]);
    }

    #[test]
    fn strict_mode_still_skips_boundary_corners() {
        let strict = config().with_strict_corners(true);
        let (result, outline) = close_lone_vertex(&[(0, 0), (1, 0)], &strict);
        assert_eq!(result, Ok(()));
        assert_eq!(outline.stats.skipped_corners, 1);
        assert_eq!(outline.open_vertices.len(), 1);
    }

    #[test]
    fn strict_mode_rejects_unmatched_interior_corner() {
        let strict = config().with_strict_corners(true);
        let (result, outline) = close_lone_vertex(&surrounded_cell(), &strict);
        assert_eq!(
            result,
            Err(Error::UnmatchedReferencePoint { column: 0, row: 0, candidates: 0 })
        );
        assert_eq!(outline.stats.skipped_corners, 0);

        let (result, outline) = close_lone_vertex(&surrounded_cell(), &config());
        assert_eq!(result, Ok(()));
        assert_eq!(outline.stats.skipped_corners, 1);
    }

    #[test]
    fn invalid_config_is_rejected_before_drawing() {
        let group = Group::new([(0, 0)], 0).unwrap();
        let config = config().with_fillet_radius(-1.0);
        assert!(matches!(synthesize(&group, &config), Err(Error::InvalidConfig { .. })));
    }

    fn small_group() -> impl Strategy<Value = Vec<(i32, i32)>> {
        prop::collection::btree_set((-3i32..4, -3i32..4), 1..14).prop_map(|s| s.into_iter().collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn one_connection_per_internal_edge(cells in small_group()) {
            let group = Group::new(cells.iter().copied(), 0).unwrap();
            let outline = synthesize(&group, &config()).unwrap();
            let edges = group.internal_edges();
            prop_assert_eq!(outline.connections.len(), edges.len());
            for connection in &outline.connections {
                prop_assert_eq!(connection.sides, 2);
                prop_assert!(edges.contains(&(connection.a, connection.b)));
            }
        }

        #[test]
        fn every_vertex_is_drawn_and_the_path_closes(cells in small_group()) {
            let group = Group::new(cells.iter().copied(), 0).unwrap();
            let outline = synthesize(&group, &config()).unwrap();
            prop_assert!(outline.open_vertices.is_empty());
            assert_closed(&outline);
        }

        #[test]
        fn output_is_deterministic_and_order_independent(cells in small_group()) {
            let forward = Group::new(cells.iter().copied(), 0).unwrap();
            let backward = Group::new(cells.iter().rev().copied(), 0).unwrap();
            let a = synthesize(&forward, &config()).unwrap();
            let b = synthesize(&forward, &config()).unwrap();
            let c = synthesize(&backward, &config()).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(&a, &c);
        }
    }
}
