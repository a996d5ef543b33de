//! `render`, `check` and `preview` commands.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use hexspacer::{Drawing, DxfWriter, Error, LayerCompositor, PersistentSink, PlacedLayer, SvgWriter};
use log::{error, info};
use serde::Serialize;

use super::layout::Layout;

/// Output formats, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Dxf,
    Svg,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "dxf" => Ok(OutputFormat::Dxf),
            "svg" => Ok(OutputFormat::Svg),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unsupported output format `{other}` (expected dxf, svg or json)"),
        }
    }
}

/// Everything produced for one layout.
#[derive(Debug, Serialize)]
pub struct Rendered {
    pub name: String,
    pub drawing: Drawing,
    pub layers: Vec<PlacedLayer>,
    #[serde(skip)]
    pub failures: Vec<(usize, Error)>,
}

impl Rendered {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every plate of a layout through the compositor.
///
/// A plate that fails is logged and left out; the remaining plates are
/// still drawn.
pub fn render_layout(layout: &Layout) -> Result<Rendered> {
    let plates = layout.plates()?;
    let mut compositor = LayerCompositor::new(Drawing::new(), layout.config())?;

    let mut layers = Vec::with_capacity(plates.len());
    let mut failures = Vec::new();
    for plate in &plates {
        match compositor.push_group(plate) {
            Ok(placed) => layers.push(placed),
            Err(e) => {
                error!("layer {}: {}", plate.layer(), e);
                failures.push((plate.layer(), e));
            }
        }
    }

    Ok(Rendered {
        name: layout.name.clone(),
        drawing: compositor.into_sink(),
        layers,
        failures,
    })
}

/// Serialize a rendered layout in the given format.
pub fn write_output<W: Write>(rendered: &Rendered, format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Dxf => DxfWriter::from_drawing(rendered.drawing.clone()).finalize(out)?,
        OutputFormat::Svg => SvgWriter::from_drawing(rendered.drawing.clone()).finalize(out)?,
        OutputFormat::Json => serde_json::to_writer_pretty(out, rendered)?,
    }
    Ok(())
}

pub fn cmd_render(layout_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let layout = Layout::load(layout_path)?;
    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.dxf", layout.name)));
    let format = OutputFormat::from_path(&output)?;

    let rendered = render_layout(&layout)?;
    let file = File::create(&output).with_context(|| format!("failed to create {}", output.display()))?;
    write_output(&rendered, format, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "wrote {} ({} layers, {} shapes)",
        output.display(),
        rendered.layers.len(),
        rendered.drawing.shape_count()
    );
    ensure_complete(&rendered)
}

pub fn cmd_check(layout_path: &Path) -> Result<()> {
    let layout = Layout::load(layout_path)?;
    let rendered = render_layout(&layout)?;

    println!("{}: {} cells in {} groups", layout.name, layout.cell_count(), layout.groups.len());
    if let Some(description) = &layout.description {
        println!("  {description}");
    }
    println!();
    print!("{}", layer_table(&rendered));
    if let Some(bounds) = rendered.drawing.bounding_box() {
        println!();
        println!("sheet: {:.1} x {:.1}", bounds.width(), bounds.height());
    }
    ensure_complete(&rendered)
}

/// Rasterize a layout to PNG via its SVG rendering.
pub fn cmd_preview(layout_path: &Path, output: &Path, scale: f32) -> Result<()> {
    let layout = Layout::load(layout_path)?;
    let rendered = render_layout(&layout)?;

    let mut svg = Vec::new();
    write_output(&rendered, OutputFormat::Svg, &mut svg)?;
    let pixmap = rasterize(&svg, scale)?;
    pixmap
        .save_png(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!("wrote {} ({}x{})", output.display(), pixmap.width(), pixmap.height());
    ensure_complete(&rendered)
}

fn rasterize(svg: &[u8], scale: f32) -> Result<tiny_skia::Pixmap> {
    use resvg::usvg;

    let tree = usvg::Tree::from_data(svg, &usvg::Options::default()).context("generated SVG did not parse")?;
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let Some(mut pixmap) = tiny_skia::Pixmap::new(width, height) else {
        bail!("cannot allocate a {width}x{height} preview");
    };
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Ok(pixmap)
}

fn layer_table(rendered: &Rendered) -> String {
    let mut table = format!(
        "{:>5} {:>5} {:>6} {:>6} {:>6} {:>7} {:>7}\n",
        "layer", "cells", "slots", "holes", "edges", "corners", "shapes"
    );
    for layer in &rendered.layers {
        table.push_str(&format!(
            "{:>5} {:>5} {:>6} {:>6} {:>6} {:>7} {:>7}\n",
            layer.layer,
            layer.cells,
            layer.connections,
            layer.stats.rounded_triangles,
            layer.stats.rounded_lines,
            layer.stats.corner_fillets,
            layer.shapes
        ));
    }
    for (layer, e) in &rendered.failures {
        table.push_str(&format!("{layer:>5} failed: {e}\n"));
    }
    table
}

fn ensure_complete(rendered: &Rendered) -> Result<()> {
    if !rendered.is_complete() {
        bail!("{} of {} layers failed", rendered.failures.len(), rendered.failures.len() + rendered.layers.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Layout {
        Layout::parse("name: pair\ngroups:\n  - [[0, 0]]\n  - [[1, 0]]\n").unwrap()
    }

    #[test]
    fn format_follows_the_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.DXF")).unwrap(), OutputFormat::Dxf);
        assert_eq!(OutputFormat::from_path(Path::new("b.svg")).unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("b.json")).unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_path(Path::new("b.pdf")).is_err());
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn renders_every_plate() {
        let rendered = render_layout(&pair()).unwrap();
        assert!(rendered.is_complete());
        assert_eq!(rendered.layers.len(), 3);
        assert_eq!(rendered.drawing.layers.len(), 3);
        assert_eq!(rendered.layers[1].connections, 1);
        let table = layer_table(&rendered);
        assert_eq!(table.lines().count(), 4);
    }

    #[test]
    fn writes_each_format() {
        let rendered = render_layout(&pair()).unwrap();

        let mut dxf = Vec::new();
        write_output(&rendered, OutputFormat::Dxf, &mut dxf).unwrap();
        let dxf = String::from_utf8(dxf).unwrap();
        assert!(dxf.contains("LAYER_2"));
        assert!(dxf.trim_end().ends_with("EOF"));

        let mut svg = Vec::new();
        write_output(&rendered, OutputFormat::Svg, &mut svg).unwrap();
        assert!(String::from_utf8(svg).unwrap().contains("<svg"));

        let mut json = Vec::new();
        write_output(&rendered, OutputFormat::Json, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["name"], "pair");
        assert_eq!(value["layers"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["drawing"]["layers"][0]["shapes"][0]["kind"], "arc");
    }

    #[test]
    fn preview_rasterizes() {
        let rendered = render_layout(&pair()).unwrap();
        let mut svg = Vec::new();
        write_output(&rendered, OutputFormat::Svg, &mut svg).unwrap();
        let pixmap = rasterize(&svg, 2.0).unwrap();
        assert!(pixmap.width() > 0 && pixmap.height() > 0);
        // something dark was drawn on the white background
        assert!(pixmap.pixels().iter().any(|p| p.red() < 200));
    }
}
