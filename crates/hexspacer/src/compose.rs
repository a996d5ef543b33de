//! Layer compositing: place stacked plates on one sheet.
//!
//! A series pack needs `n + 1` plates for `n` parallel groups. Rather than
//! one drawing per plate, the layers are nested: every layer is pushed right
//! by `layer · d`, and odd layers are lifted by the height of the even
//! layers minus `d`, so they sit interleaved above them. `d` is the
//! compaction distance.
//!
//! The compositor owns the drawing sink for a whole run. Each group is
//! synthesized completely before anything reaches the sink, so a failing
//! group leaves earlier layers untouched.

use std::io::{self, Write};

use log::debug;
use serde::Serialize;

use crate::config::PlateConfig;
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Vector, merge_bounds};
use crate::group::Group;
use crate::hex::{GridCoord, HexLayout};
use crate::shape::{DrawingSink, PersistentSink, Shape, bounds_of};
use crate::synth::{OutlineStats, synthesize};

/// Where a layer ended up and what it contained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLayer {
    pub layer: usize,
    pub cells: usize,
    pub offset: Vector,
    /// Bounds after translation, dilatation marks included.
    pub bounds: Option<BoundingBox>,
    pub connections: usize,
    pub shapes: usize,
    pub stats: OutlineStats,
}

/// Drives synthesis group by group and emits the placed result.
pub struct LayerCompositor<S> {
    sink: S,
    config: PlateConfig,
    layout: HexLayout,
    previous: Option<usize>,
    even_bounds: Option<BoundingBox>,
}

impl<S: DrawingSink> LayerCompositor<S> {
    pub fn new(sink: S, config: PlateConfig) -> Result<Self> {
        config.validate()?;
        let layout = HexLayout::from(&config);
        Ok(Self {
            sink,
            config,
            layout,
            previous: None,
            even_bounds: None,
        })
    }

    /// Synthesize one group and emit it at its layer position.
    ///
    /// Layer indices must strictly increase from call to call.
    pub fn push_group(&mut self, group: &Group) -> Result<PlacedLayer> {
        let layer = group.layer();
        if let Some(previous) = self.previous.filter(|&previous| layer <= previous) {
            return Err(Error::LayerOutOfOrder { layer, previous });
        }

        let outline = synthesize(group, &self.config)?;
        let local_bounds = bounds_of(&outline.shapes);
        let offset = self.offset_for(layer);
        if layer % 2 == 0 {
            self.even_bounds = merge_bounds(self.even_bounds, local_bounds);
        }

        let mut shapes: Vec<Shape> = outline.shapes.iter().map(|s| s.translate(offset)).collect();
        shapes.extend(self.dilatation_marks(group, offset));

        debug!(
            "layer {}: placed {} shapes at ({:.3}, {:.3})",
            layer,
            shapes.len(),
            offset.x,
            offset.y
        );
        self.sink.begin_layer(layer);
        for shape in &shapes {
            self.sink.add_shape(shape);
        }
        self.previous = Some(layer);

        Ok(PlacedLayer {
            layer,
            cells: group.len(),
            offset,
            bounds: bounds_of(&shapes),
            connections: outline.connections.len(),
            shapes: shapes.len(),
            stats: outline.stats,
        })
    }

    /// Push every group in order, stopping at the first failure.
    pub fn push_all<'g, I>(&mut self, groups: I) -> Result<Vec<PlacedLayer>>
    where
        I: IntoIterator<Item = &'g Group>,
    {
        groups.into_iter().map(|group| self.push_group(group)).collect()
    }

    /// Translation for a layer given the even layers emitted so far.
    fn offset_for(&self, layer: usize) -> Vector {
        let d = self.config.compaction_distance;
        let x = layer as f64 * d;
        if layer % 2 == 0 {
            Vector::new(x, 0.0)
        } else {
            let height = self.even_bounds.map_or(0.0, |b| b.height());
            Vector::new(x, height - d)
        }
    }

    fn dilatation_marks(&self, group: &Group, offset: Vector) -> Vec<Shape> {
        let Some(marks) = self.config.dilatation else {
            return Vec::new();
        };
        let half = Vector::from_angle(marks.angle_degrees.to_radians()) * (marks.length / 2.0);
        group
            .cells()
            .iter()
            .map(|cell| {
                let center = cell.position(&self.layout) + offset;
                Shape::line(center - half, center + half)
            })
            .collect()
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: PersistentSink> LayerCompositor<S> {
    /// Write every layer emitted so far to `destination`.
    pub fn finalize<W: Write>(&self, destination: W) -> io::Result<()> {
        self.sink.finalize(destination)
    }
}

/// Build the stacked plates of a pack and emit them all into `sink`.
///
/// See [`Group::stack`] for how the layers are formed.
pub fn compose_stack<S, G, C>(sink: S, config: PlateConfig, cell_sets: &[G]) -> Result<(S, Vec<PlacedLayer>)>
where
    S: DrawingSink,
    G: AsRef<[C]>,
    C: Into<GridCoord> + Copy,
{
    let groups = Group::stack(cell_sets)?;
    let mut compositor = LayerCompositor::new(sink, config)?;
    let placed = compositor.push_all(&groups)?;
    Ok((compositor.into_sink(), placed))
}

// ============================================================================
// TESTS
// ============================================================================
