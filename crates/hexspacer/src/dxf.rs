//! ASCII DXF output.
//!
//! Laser and waterjet shops take DXF. Only the entities a plate needs are
//! written: `LINE` and `ARC`, one DXF layer per plate layer (`LAYER_<i>`).
//! Arcs stay arcs; nothing is flattened.
//!
//! The file is AutoCAD R12 flavoured (`AC1009`), which every CAM package
//! still reads. R12 has no units header; coordinates are millimetres and
//! have to be imported as such. The `CONTINUOUS` line type the layers use is
//! declared in an `LTYPE` table ahead of them.

use std::io::{self, Write};

use crate::geometry::Vector;
use crate::shape::{Drawing, DrawingSink, PersistentSink, Shape};

/// Drawing sink that persists to DXF on [`finalize`](PersistentSink::finalize).
#[derive(Debug, Clone, Default)]
pub struct DxfWriter {
    drawing: Drawing,
}

impl DxfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an already recorded drawing.
    pub fn from_drawing(drawing: Drawing) -> Self {
        Self { drawing }
    }
}

impl PersistentSink for DxfWriter {
    fn finalize<W: Write>(&self, destination: W) -> io::Result<()> {
        let mut out = DxfOutput { out: destination };
        out.header()?;
        out.section("TABLES")?;
        out.line_type_table()?;
        out.layer_table(self.drawing.layers.iter().map(|layer| layer.index))?;

        out.section("ENTITIES")?;
        for layer in &self.drawing.layers {
            let name = layer_name(layer.index);
            for shape in &layer.shapes {
                out.entity(&name, shape)?;
            }
        }
        out.end_section()?;

        out.pair(0, "EOF")?;
        out.out.flush()
    }
}

impl DrawingSink for DxfWriter {
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

const LINE_TYPE: &str = "CONTINUOUS";

fn layer_name(index: usize) -> String {
    format!("LAYER_{index}")
}

/// Group-code/value pair writer.
struct DxfOutput<W> {
    out: W,
}

impl<W: Write> DxfOutput<W> {
    fn pair(&mut self, code: u16, value: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{code:>3}")?;
        writeln!(self.out, "{value}")
    }

    fn number(&mut self, code: u16, value: f64) -> io::Result<()> {
        self.pair(code, format_args!("{value:.6}"))
    }

    fn point(&mut self, code: u16, point: Vector) -> io::Result<()> {
        self.number(code, point.x)?;
        self.number(code + 10, point.y)?;
        self.number(code + 20, 0.0)
    }

    fn section(&mut self, name: &str) -> io::Result<()> {
        self.pair(0, "SECTION")?;
        self.pair(2, name)
    }

    fn end_section(&mut self) -> io::Result<()> {
        self.pair(0, "ENDSEC")
    }

    fn header(&mut self) -> io::Result<()> {
        self.section("HEADER")?;
        self.pair(9, "$ACADVER")?;
        self.pair(1, "AC1009")?;
        self.end_section()
    }

    fn line_type_table(&mut self) -> io::Result<()> {
        self.pair(0, "TABLE")?;
        self.pair(2, "LTYPE")?;
        self.pair(70, 1)?;
        self.pair(0, "LTYPE")?;
        self.pair(2, LINE_TYPE)?;
        self.pair(70, 0)?;
        self.pair(3, "Solid line")?;
        // alignment code, always 65 ('A')
        self.pair(72, 65)?;
        self.pair(73, 0)?;
        self.number(40, 0.0)?;
        self.pair(0, "ENDTAB")
    }

    /// Closes the `TABLES` section.
    fn layer_table(&mut self, layers: impl ExactSizeIterator<Item = usize>) -> io::Result<()> {
        self.pair(0, "TABLE")?;
        self.pair(2, "LAYER")?;
        self.pair(70, layers.len())?;
        for index in layers {
            self.pair(0, "LAYER")?;
            self.pair(2, layer_name(index))?;
            self.pair(70, 0)?;
            // cycle through the seven basic ACI colours
            self.pair(62, index % 7 + 1)?;
            self.pair(6, LINE_TYPE)?;
        }
        self.pair(0, "ENDTAB")?;
        self.end_section()
    }

    fn entity(&mut self, layer: &str, shape: &Shape) -> io::Result<()> {
        match *shape {
            Shape::Line { start, end } => {
                self.pair(0, "LINE")?;
                self.pair(8, layer)?;
                self.point(10, start)?;
                self.point(11, end)
            }
            Shape::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let (start, end) = arc_degrees(start_angle, sweep);
                self.pair(0, "ARC")?;
                self.pair(8, layer)?;
                self.point(10, center)?;
                self.number(40, radius)?;
                self.number(50, start)?;
                self.number(51, end)
            }
        }
    }
}

/// DXF arcs run counter-clockwise from start to end, both in `[0, 360)`.
fn arc_degrees(start_angle: f64, sweep: f64) -> (f64, f64) {
    let start = start_angle.to_degrees().rem_euclid(360.0);
    let end = (start + sweep.to_degrees()).rem_euclid(360.0);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn render(writer: &DxfWriter) -> String {
        let mut buffer = Vec::new();
        writer.finalize(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    /// The value lines that follow a given group code.
    fn values<'a>(dxf: &'a str, code: &str) -> Vec<&'a str> {
        let lines: Vec<&str> = dxf.lines().collect();
        lines
            .chunks(2)
            .filter(|pair| pair[0].trim() == code)
            .map(|pair| pair[1])
            .collect()
    }

    #[test]
    fn entities_land_on_their_layer() {
        let mut writer = DxfWriter::new();
        writer.begin_layer(0);
        writer.add_line(Vector::ZERO, Vector::new(10.0, 0.0));
        writer.begin_layer(1);
        writer.add_arc(Vector::new(5.0, 5.0), 2.0, 0.0, FRAC_PI_2);
        let dxf = render(&writer);

        let kinds = values(&dxf, "0");
        assert_eq!(kinds.iter().filter(|k| **k == "LINE").count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == "ARC").count(), 1);
        assert_eq!(kinds.last(), Some(&"EOF"));
        assert_eq!(values(&dxf, "8"), vec!["LAYER_0", "LAYER_1"]);
        assert!(values(&dxf, "2").contains(&"LAYER_1"));
    }

    #[test]
    fn arc_angles_are_degrees() {
        let mut writer = DxfWriter::new();
        writer.add_arc(Vector::ZERO, 1.0, 1.5 * PI, PI);
        let dxf = render(&writer);
        assert_eq!(values(&dxf, "50"), vec!["270.000000"]);
        assert_eq!(values(&dxf, "51"), vec!["90.000000"]);
        // the first 40 is the line type's pattern length
        assert_eq!(values(&dxf, "40"), vec!["0.000000", "1.000000"]);
    }

    #[test]
    fn arc_end_wraps_around() {
        let (start, end) = arc_degrees(-FRAC_PI_2, PI);
        assert_relative_eq!(start, 270.0, epsilon = 1e-9);
        assert_relative_eq!(end, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_drawing_is_still_a_valid_file() {
        let dxf = render(&DxfWriter::new());
        assert!(dxf.starts_with("  0\nSECTION\n  2\nHEADER\n"));
        assert!(dxf.ends_with("  0\nEOF\n"));
        // line type table of one, its entry, then an empty layer table
        assert_eq!(values(&dxf, "70"), vec!["1", "0", "0"]);
    }

    #[test]
    fn header_and_tables_stay_within_r12() {
        let mut writer = DxfWriter::new();
        writer.begin_layer(0);
        writer.add_line(Vector::ZERO, Vector::new(1.0, 0.0));
        let dxf = render(&writer);

        assert_eq!(values(&dxf, "9"), vec!["$ACADVER"]);
        assert!(!dxf.contains("$INSUNITS"));

        let names = values(&dxf, "2");
        let line_type = names.iter().position(|n| *n == "CONTINUOUS").unwrap();
        let layer = names.iter().position(|n| *n == "LAYER_0").unwrap();
        assert!(names[..line_type].contains(&"LTYPE"));
        assert!(line_type < layer);
        assert_eq!(values(&dxf, "6"), vec!["CONTINUOUS"]);
    }
}
