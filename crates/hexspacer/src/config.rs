//! Plate constants.
//!
//! All lengths share one unit (millimetres in practice). The defaults match
//! an 18650 nickel strip: 18 mm pitch, 5 mm webs, 1 mm fillets.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::centroid;
use crate::hex::{GridCoord, HexLayout};

const SQRT_3_HALF: f64 = 0.866_025_403_784_438_6;

/// Constants that shape every plate generated from a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    /// Horizontal distance between neighbouring cells in a row.
    pub pitch_x: f64,
    /// Vertical distance between rows (normally `pitch_x * √3 / 2`).
    pub pitch_y: f64,
    /// Shift of odd rows, in columns.
    pub row_offset: f64,
    /// Width of the web left between neighbouring holes.
    pub connection_width: f64,
    /// Radius of the fillets rounding hole corners.
    pub fillet_radius: f64,
    /// How far stacked layers are pulled together when nested on one sheet.
    pub compaction_distance: f64,
    /// Fail instead of skipping a corner whose reference point has no
    /// pair, when the cell is surrounded on all six sides. Corners of
    /// boundary cells are always skipped with a warning.
    pub strict_corners: bool,
    /// Optional kerf check marks drawn at every occupied node.
    pub dilatation: Option<DilatationConfig>,
}

/// Short marks centred on each cell, measured after cutting to verify kerf
/// compensation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DilatationConfig {
    pub length: f64,
    #[serde(default)]
    pub angle_degrees: f64,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self::hexagonal(18.0, 5.0)
    }
}

impl PlateConfig {
    /// Regular hexagonal packing: rows are `pitch * √3 / 2` apart and odd
    /// rows shift by half a cell.
    pub fn hexagonal(pitch: f64, connection_width: f64) -> Self {
        Self {
            pitch_x: pitch,
            pitch_y: pitch * SQRT_3_HALF,
            row_offset: 0.5,
            connection_width,
            fillet_radius: 1.0,
            compaction_distance: 1.0,
            strict_corners: false,
            dilatation: None,
        }
    }

    pub fn with_fillet_radius(mut self, radius: f64) -> Self {
        self.fillet_radius = radius;
        self
    }

    pub fn with_compaction_distance(mut self, distance: f64) -> Self {
        self.compaction_distance = distance;
        self
    }

    pub fn with_strict_corners(mut self, strict: bool) -> Self {
        self.strict_corners = strict;
        self
    }

    pub fn with_dilatation(mut self, length: f64, angle_degrees: f64) -> Self {
        self.dilatation = Some(DilatationConfig { length, angle_degrees });
        self
    }

    /// Reject constants that cannot describe a plate.
    pub fn validate(&self) -> Result<()> {
        positive("pitch_x", self.pitch_x)?;
        positive("pitch_y", self.pitch_y)?;
        positive("connection_width", self.connection_width)?;
        positive("fillet_radius", self.fillet_radius)?;
        positive("compaction_distance", self.compaction_distance)?;
        if !self.row_offset.is_finite() || self.row_offset < 0.0 {
            return Err(Error::InvalidConfig {
                field: "row_offset",
                value: self.row_offset,
            });
        }
        if let Some(dilatation) = &self.dilatation {
            positive("dilatation.length", dilatation.length)?;
            if !dilatation.angle_degrees.is_finite() {
                return Err(Error::InvalidConfig {
                    field: "dilatation.angle_degrees",
                    value: dilatation.angle_degrees,
                });
            }
        }
        self.check_hole()
    }

    /// The web must leave a hole, and the hole must fit its three fillets.
    ///
    /// Every grid triangle is congruent (up and down ones mirror each
    /// other), so the one at the origin stands for all of them.
    fn check_hole(&self) -> Result<()> {
        let layout = HexLayout::from(self);
        let origin = GridCoord::new(0, 0);
        let nodes = [origin, origin.right(), origin.up()].map(|c| c.position(&layout));
        let Some(center) = centroid(&nodes) else {
            return Ok(());
        };

        let reach = nodes.iter().map(|n| n.distance(center)).fold(f64::INFINITY, f64::min);
        if self.connection_width >= reach {
            return Err(Error::HoleTooSmall {
                field: "connection_width",
                value: self.connection_width,
                limit: reach,
            });
        }

        let hole = nodes.map(|n| n + (center - n) * (self.connection_width / n.distance(center)));
        let shortest = (0..3)
            .map(|i| hole[i].distance(hole[(i + 1) % 3]))
            .fold(f64::INFINITY, f64::min);
        // each fillet eats √3·r of the two sides it touches
        let limit = shortest / 2.0 / 3.0_f64.sqrt();
        if self.fillet_radius > limit {
            return Err(Error::HoleTooSmall {
                field: "fillet_radius",
                value: self.fillet_radius,
                limit,
            });
        }
        Ok(())
    }

    /// Radius of the arcs closing a cell's open facets.
    pub fn corner_radius(&self) -> f64 {
        self.connection_width / 2.0 * 3.0_f64.sqrt()
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig { field, value })
    }
}
