use std::path::Path;

use crate::animation::tween::{Span, Tween};
use crate::foundation::core::{Canvas, FrameIndex, Point, Vec2};
use crate::foundation::error::{MetroError, MetroResult};
use crate::scene::color::Color;

/// Role of a node along a line.
///
/// Serialized as the integer codes of the coordinate tables: `-1`, `0`, `1`, `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum NodeKind {
    /// Bend that only exists in the geographic layout.
    MapOnlyBend,
    /// Regular station (small dot).
    Station,
    /// Transfer station (large dot).
    Transfer,
    /// Bend in the tracks, no station.
    Bend,
}

impl NodeKind {
    /// Integer code used in the coordinate tables.
    pub fn code(self) -> i8 {
        match self {
            Self::MapOnlyBend => -1,
            Self::Station => 0,
            Self::Transfer => 1,
            Self::Bend => 2,
        }
    }

    /// `true` when the node gets a station dot.
    pub fn is_station(self) -> bool {
        matches!(self, Self::Station | Self::Transfer)
    }

    /// `true` when the node stays a path vertex on the opening frame.
    ///
    /// Only positive codes qualify, so the first frame follows bends and
    /// transfers and cuts straight past regular stations.
    pub fn keeps_opening_vertex(self) -> bool {
        self.code() > 0
    }
}

impl TryFrom<i8> for NodeKind {
    type Error = MetroError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Self::MapOnlyBend),
            0 => Ok(Self::Station),
            1 => Ok(Self::Transfer),
            2 => Ok(Self::Bend),
            other => Err(MetroError::validation(format!(
                "unknown node kind {other} (expected -1, 0, 1 or 2)"
            ))),
        }
    }
}

impl From<NodeKind> for i8 {
    fn from(kind: NodeKind) -> Self {
        kind.code()
    }
}

/// A station or bend with its position in both layouts.
///
/// Serialized as the tuple `[geo_x, geo_y, kind, map_x, map_y]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "NodeTuple", into = "NodeTuple")]
pub struct Node {
    /// Position in the geographic layout.
    pub geo: Point,
    /// Station/bend role.
    pub kind: NodeKind,
    /// Position in the schematic layout.
    pub map: Point,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct NodeTuple(f64, f64, NodeKind, f64, f64);

impl From<NodeTuple> for Node {
    fn from(t: NodeTuple) -> Self {
        Self {
            geo: Point::new(t.0, t.1),
            kind: t.2,
            map: Point::new(t.3, t.4),
        }
    }
}

impl From<Node> for NodeTuple {
    fn from(n: Node) -> Self {
        Self(n.geo.x, n.geo.y, n.kind, n.map.x, n.map.y)
    }
}

impl Node {
    /// Create a node.
    pub fn new(geo: (f64, f64), kind: NodeKind, map: (f64, f64)) -> Self {
        Self {
            geo: geo.into(),
            kind,
            map: map.into(),
        }
    }
}

/// One metro line: ordered nodes plus a stroke color.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetroLine {
    /// Display name, used in logs and errors.
    pub name: String,
    /// Stroke color.
    pub color: Color,
    /// Nodes in track order; consecutive nodes are joined by a segment.
    pub nodes: Vec<Node>,
}

/// Static text drawn on every frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Label {
    /// Text to draw.
    pub text: String,
    /// Baseline origin of the first glyph.
    pub origin: Point,
    /// Font family resolved from system fonts unless a font file is supplied.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Text color.
    pub color: Color,
}

/// The full, immutable dataset an animation is rendered from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetroMap {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Clear color for every frame.
    pub background: Color,
    /// Fill color of station dots.
    pub station_fill: Color,
    /// Optional static label.
    #[serde(default)]
    pub label: Option<Label>,
    /// Offset added to every geographic position.
    pub geo_offset: Vec2,
    /// Offset added to every schematic position.
    pub map_offset: Vec2,
    /// Stroke width of the lines.
    pub line_width: Span,
    /// Dot diameter of regular stations.
    pub station_dot: Span,
    /// Dot diameter of transfer stations.
    pub transfer_dot: Span,
    /// Lines in draw order; later lines paint over earlier ones.
    pub lines: Vec<MetroLine>,
}

impl MetroMap {
    /// Parse and validate a dataset from JSON.
    pub fn from_json_str(s: &str) -> MetroResult<Self> {
        let map: Self = serde_json::from_str(s).map_err(|e| MetroError::serde(e.to_string()))?;
        map.validate()?;
        Ok(map)
    }

    /// Read, parse and validate a dataset from a JSON file.
    pub fn from_json_path(path: &Path) -> MetroResult<Self> {
        use anyhow::Context as _;
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check the dataset can be rendered.
    pub fn validate(&self) -> MetroResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(MetroError::validation("canvas width/height must be > 0"));
        }
        self.canvas.to_u16()?;

        if !finite_vec(self.geo_offset) || !finite_vec(self.map_offset) {
            return Err(MetroError::validation("layout offsets must be finite"));
        }

        for (name, span) in [
            ("line_width", self.line_width),
            ("station_dot", self.station_dot),
            ("transfer_dot", self.transfer_dot),
        ] {
            if !span.is_valid_width() {
                return Err(MetroError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        if let Some(label) = &self.label {
            if label.text.is_empty() {
                return Err(MetroError::validation("label text must be non-empty"));
            }
            if !label.font_size.is_finite() || label.font_size <= 0.0 {
                return Err(MetroError::validation(
                    "label font_size must be finite and > 0",
                ));
            }
            if !finite_point(label.origin) {
                return Err(MetroError::validation("label origin must be finite"));
            }
        }

        if self.lines.is_empty() {
            return Err(MetroError::validation("dataset must contain at least one line"));
        }
        for line in &self.lines {
            if line.nodes.is_empty() {
                return Err(MetroError::validation(format!(
                    "line '{}' has no nodes",
                    line.name
                )));
            }
            if let Some(i) = line
                .nodes
                .iter()
                .position(|n| !finite_point(n.geo) || !finite_point(n.map))
            {
                return Err(MetroError::validation(format!(
                    "line '{}' node {i} has a non-finite coordinate",
                    line.name
                )));
            }
        }

        Ok(())
    }

    /// Position of `node` at `frame`, with both layout offsets applied.
    pub fn node_position(&self, node: &Node, tween: &Tween, frame: FrameIndex) -> Point {
        tween.point(node.geo + self.geo_offset, node.map + self.map_offset, frame)
    }

    /// Total node count across all lines.
    pub fn node_count(&self) -> usize {
        self.lines.iter().map(|l| l.nodes.len()).sum()
    }
}

fn finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
