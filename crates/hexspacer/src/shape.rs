//! Cut primitives and the sink they are drawn into.
//!
//! The synthesizer only ever produces two kinds of primitive, straight
//! segments and circular arcs, so [`Shape`] is a closed enum. Sinks receive
//! them through [`DrawingSink`]; a format writer never has to guess what it
//! was handed.
//!
//! ## Rust Lesson #22: Pattern Matching on Enums with Data
//!
//! `match shape { Shape::Line { start, end } => ..., Shape::Arc { .. } => ... }`
//! must cover every variant. Adding a third primitive later would turn every
//! incomplete match into a compile error instead of a silently dropped shape.

use std::io::{self, Write};

use lyon_geom::{Angle, point, vector};
use serde::Serialize;

use crate::geometry::{BoundingBox, Vector, merge_bounds};

/// A cut primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Line {
        start: Vector,
        end: Vector,
    },
    /// Counter-clockwise arc; `sweep` is always positive.
    Arc {
        center: Vector,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
}

impl Shape {
    pub fn line(start: Vector, end: Vector) -> Self {
        Shape::Line { start, end }
    }

    pub fn arc(center: Vector, radius: f64, start_angle: f64, sweep: f64) -> Self {
        Shape::Arc {
            center,
            radius,
            start_angle,
            sweep,
        }
    }

    pub fn translate(self, offset: Vector) -> Self {
        match self {
            Shape::Line { start, end } => Shape::line(start + offset, end + offset),
            Shape::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Shape::arc(center + offset, radius, start_angle, sweep),
        }
    }

    /// First and last point along the cut direction.
    pub fn endpoints(&self) -> (Vector, Vector) {
        match *self {
            Shape::Line { start, end } => (start, end),
            Shape::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let arc = lyon_arc(center, radius, start_angle, sweep);
                let (from, to) = (arc.from(), arc.to());
                (Vector::new(from.x, from.y), Vector::new(to.x, to.y))
            }
        }
    }

    /// Tight bounding box; arcs contribute only the part of the circle they
    /// actually sweep.
    pub fn bounding_box(&self) -> BoundingBox {
        match *self {
            Shape::Line { start, end } => BoundingBox::from_point(start).including(end),
            Shape::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let b = lyon_arc(center, radius, start_angle, sweep).bounding_box();
                BoundingBox {
                    min: Vector::new(b.min.x, b.min.y),
                    max: Vector::new(b.max.x, b.max.y),
                }
            }
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Shape::Arc { .. })
    }
}

fn lyon_arc(center: Vector, radius: f64, start_angle: f64, sweep: f64) -> lyon_geom::Arc<f64> {
    lyon_geom::Arc {
        center: point(center.x, center.y),
        radii: vector(radius, radius),
        start_angle: Angle::radians(start_angle),
        sweep_angle: Angle::radians(sweep),
        x_rotation: Angle::radians(0.0),
    }
}

/// Merged bounding box of a shape list, `None` when empty.
pub fn bounds_of<'a, I: IntoIterator<Item = &'a Shape>>(shapes: I) -> Option<BoundingBox> {
    shapes
        .into_iter()
        .fold(None, |acc, shape| merge_bounds(acc, Some(shape.bounding_box())))
}

/// Receives finished primitives in emission order.
///
/// Angles are radians counter-clockwise from +x; sweeps are positive.
pub trait DrawingSink {
    /// Called before the shapes of each plate layer.
    fn begin_layer(&mut self, _layer: usize) {}

    fn add_line(&mut self, start: Vector, end: Vector);

    fn add_arc(&mut self, center: Vector, radius: f64, start_angle: f64, sweep: f64);

    fn add_shape(&mut self, shape: &Shape) {
        match *shape {
            Shape::Line { start, end } => self.add_line(start, end),
            Shape::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => self.add_arc(center, radius, start_angle, sweep),
        }
    }
}

/// A sink that turns what it received into a file.
///
/// `finalize` may be called more than once; each call writes the whole
/// drawing received so far.
pub trait PersistentSink: DrawingSink {
    fn finalize<W: Write>(&self, destination: W) -> io::Result<()>;
}

/// One recorded layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawingLayer {
    pub index: usize,
    pub shapes: Vec<Shape>,
}

/// In-memory sink that keeps every shape, grouped by layer.
///
/// Shapes added before the first `begin_layer` land in layer 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Drawing {
    pub layers: Vec<DrawingLayer>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&mut self) -> &mut DrawingLayer {
        if self.layers.is_empty() {
            self.layers.push(DrawingLayer::default());
        }
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.layers.iter().flat_map(|layer| layer.shapes.iter())
    }

    pub fn shape_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.shapes.len()).sum()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        bounds_of(self.shapes())
    }

    pub fn layer(&self, index: usize) -> Option<&DrawingLayer> {
        self.layers.iter().find(|layer| layer.index == index)
    }
}

impl DrawingSink for Drawing {
    fn begin_layer(&mut self, layer: usize) {
        self.layers.push(DrawingLayer {
            index: layer,
            shapes: Vec::new(),
        });
    }

    fn add_line(&mut self, start: Vector, end: Vector) {
        self.current().shapes.push(Shape::line(start, end));
    }

    fn add_arc(&mut self, center: Vector, radius: f64, start_angle: f64, sweep: f64) {
        self.current()
            .shapes
            .push(Shape::arc(center, radius, start_angle, sweep));
    }
}
