//! Layout files.
//!
//! A layout is a YAML file naming a pack, its plate constants and the cell
//! groups in series order:
//!
//! ```yaml
//! name: test_2s1p
//! plate:
//!   pitch: 18.0
//!   connection_width: 5.0
//! groups:
//!   - [[0, 0]]
//!   - [[1, 0]]
//! ```
//!
//! By default the groups are stacked (every inner plate welds two
//! neighbouring groups). Set `stacked: false` to cut each group as its own
//! layer.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use hexspacer::{DilatationConfig, Group, PlateConfig};
use serde::{Deserialize, Serialize};

/// A complete pack description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Pack name, also the default output file stem
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Plate constants; anything left out keeps its default
    #[serde(default)]
    pub plate: PlateSection,

    /// Whether to stack the groups into welded plates
    #[serde(default = "default_stacked")]
    pub stacked: bool,

    /// Cell groups in series order
    pub groups: Vec<Vec<(i32, i32)>>,
}

fn default_stacked() -> bool {
    true
}

/// The `plate:` section. Every field is optional.
///
/// `pitch` sets both pitches for a regular hexagonal packing; `pitch_x` and
/// `pitch_y` override it individually.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlateSection {
    #[serde(default)]
    pub pitch: Option<f64>,
    #[serde(default)]
    pub pitch_x: Option<f64>,
    #[serde(default)]
    pub pitch_y: Option<f64>,
    #[serde(default)]
    pub row_offset: Option<f64>,
    #[serde(default)]
    pub connection_width: Option<f64>,
    #[serde(default)]
    pub fillet_radius: Option<f64>,
    #[serde(default)]
    pub compaction_distance: Option<f64>,
    #[serde(default)]
    pub strict_corners: Option<bool>,
    #[serde(default)]
    pub dilatation: Option<DilatationConfig>,
}

impl PlateSection {
    pub fn to_config(&self) -> PlateConfig {
        let defaults = PlateConfig::default();
        let pitch = self.pitch.unwrap_or(defaults.pitch_x);
        let width = self.connection_width.unwrap_or(defaults.connection_width);

        let mut config = PlateConfig::hexagonal(pitch, width);
        if let Some(pitch_x) = self.pitch_x {
            config.pitch_x = pitch_x;
        }
        if let Some(pitch_y) = self.pitch_y {
            config.pitch_y = pitch_y;
        }
        if let Some(row_offset) = self.row_offset {
            config.row_offset = row_offset;
        }
        if let Some(radius) = self.fillet_radius {
            config = config.with_fillet_radius(radius);
        }
        if let Some(distance) = self.compaction_distance {
            config = config.with_compaction_distance(distance);
        }
        if let Some(strict) = self.strict_corners {
            config = config.with_strict_corners(strict);
        }
        config.dilatation = self.dilatation;
        config
    }
}

impl Layout {
    /// Load a layout from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in layout file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let layout: Layout = serde_yaml::from_str(content).context("failed to parse layout YAML")?;
        ensure!(!layout.groups.is_empty(), "layout `{}` has no groups", layout.name);
        Ok(layout)
    }

    pub fn config(&self) -> PlateConfig {
        self.plate.to_config()
    }

    /// The plates to cut, with layer indices assigned.
    pub fn plates(&self) -> Result<Vec<Group>> {
        let plates = if self.stacked {
            Group::stack(&self.groups)?
        } else {
            self.groups
                .iter()
                .enumerate()
                .map(|(layer, cells)| Group::new(cells.iter().copied(), layer))
                .collect::<hexspacer::Result<Vec<_>>>()?
        };
        Ok(plates)
    }

    pub fn cell_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}
