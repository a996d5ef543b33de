//! SVG output for previews and plotter checks.
//!
//! Geometry is in y-up drawing units; SVG is y-down. Rather than wrapping
//! everything in a flipping transform, coordinates are negated on the way
//! out so the file reads naturally in any viewer. Each plate layer becomes
//! one `<g>` holding one `<path>`; arcs use the `A` command so nothing is
//! flattened.
//!
//! ## Rust Lesson #24: Builders that own their output
//!
//! `quick_xml::Writer` wraps any `io::Write`. Passing `&mut Vec<u8>` in a
//! test and a `BufWriter<File>` in the CLI is the same code path.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::geometry::{BoundingBox, Vector};
use crate::shape::{Drawing, DrawingLayer, DrawingSink, PersistentSink, Shape};

/// Margin around the drawing, in drawing units.
const MARGIN: f64 = 5.0;

const STROKE_WIDTH: &str = "0.2";

/// Drawing sink that persists to SVG on [`finalize`](PersistentSink::finalize).
#[derive(Debug, Clone, Default)]
pub struct SvgWriter {
    drawing: Drawing,
}

impl SvgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_drawing(drawing: Drawing) -> Self {
        Self { drawing }
    }
}

impl PersistentSink for SvgWriter {
    fn finalize<W: Write>(&self, destination: W) -> io::Result<()> {
        let mut writer = Writer::new_with_indent(destination, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let bounds = self
            .drawing
            .bounding_box()
            .unwrap_or(BoundingBox::from_point(Vector::ZERO));
        let view_box = format!(
            "{} {} {} {}",
            number(bounds.min.x - MARGIN),
            number(-bounds.max.y - MARGIN),
            number(bounds.width() + 2.0 * MARGIN),
            number(bounds.height() + 2.0 * MARGIN),
        );
        let width = format!("{}mm", number(bounds.width() + 2.0 * MARGIN));
        let height = format!("{}mm", number(bounds.height() + 2.0 * MARGIN));

        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        svg.push_attribute(("width", width.as_str()));
        svg.push_attribute(("height", height.as_str()));
        svg.push_attribute(("viewBox", view_box.as_str()));
        writer.write_event(Event::Start(svg))?;

        for layer in &self.drawing.layers {
            if layer.shapes.is_empty() {
                continue;
            }
            let id = format!("layer-{}", layer.index);
            let mut group = BytesStart::new("g");
            group.push_attribute(("id", id.as_str()));
            group.push_attribute(("fill", "none"));
            group.push_attribute(("stroke", "black"));
            group.push_attribute(("stroke-width", STROKE_WIDTH));
            writer.write_event(Event::Start(group))?;

            let data = path_data(layer);
            let mut path = BytesStart::new("path");
            path.push_attribute(("d", data.as_str()));
            writer.write_event(Event::Empty(path))?;

            writer.write_event(Event::End(BytesEnd::new("g")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("svg")))?;
        writer.into_inner().flush()
    }
}

impl DrawingSink for SvgWriter {
    fn begin_layer(&mut self, layer: usize) {
        self.drawing.begin_layer(layer);
    }

    fn add_line(&mut self, start: Vector, end: Vector) {
        self.drawing.add_line(start, end);
    }

    fn add_arc(&mut self, center: Vector, radius: f64, start_angle: f64, sweep: f64) {
        self.drawing.add_arc(center, radius, start_angle, sweep);
    }
}

/// Trimmed decimal, enough for 0.1 µm at mm scale.
fn number(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn flip(point: Vector) -> Vector {
    Vector::new(point.x, -point.y)
}

fn path_data(layer: &DrawingLayer) -> String {
    let mut d = String::new();
    for shape in &layer.shapes {
        match *shape {
            Shape::Line { start, end } => {
                let (start, end) = (flip(start), flip(end));
                let _ = write!(
                    d,
                    "M{},{} L{},{} ",
                    number(start.x),
                    number(start.y),
                    number(end.x),
                    number(end.y)
                );
            }
            Shape::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let start = flip(center + Vector::from_angle(start_angle) * radius);
                let _ = write!(d, "M{},{} ", number(start.x), number(start.y));
                // an SVG arc cannot close on itself; long sweeps go in halves
                let steps = if sweep > PI { 2 } else { 1 };
                let step = sweep / steps as f64;
                for i in 1..=steps {
                    let to = flip(center + Vector::from_angle(start_angle + step * i as f64) * radius);
                    // counter-clockwise in y-up is the negative sweep direction once flipped
                    let _ = write!(
                        d,
                        "A{r},{r} 0 0 0 {},{} ",
                        number(to.x),
                        number(to.y),
                        r = number(radius)
                    );
                }
            }
        }
    }
    d.trim_end().to_string()
}
