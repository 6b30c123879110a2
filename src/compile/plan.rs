use crate::animation::tween::Tween;
use crate::foundation::core::{BezPath, Canvas, FrameIndex, Point};
use crate::foundation::error::{MetroError, MetroResult};
use crate::scene::model::{MetroLine, MetroMap, NodeKind};

/// A single backend-agnostic drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Static text; `origin` is the baseline start of the first glyph.
    Label {
        /// Text to draw.
        text: String,
        /// Baseline origin.
        origin: Point,
        /// Font size in pixels.
        size_px: f64,
        /// Opaque RGBA8 color.
        color: [u8; 4],
    },
    /// Open polyline stroked with round caps and joins.
    Stroke {
        /// Polyline to stroke.
        path: BezPath,
        /// Stroke width in pixels.
        width: f64,
        /// Opaque RGBA8 color.
        color: [u8; 4],
    },
    /// Filled station marker.
    Dot {
        /// Marker center.
        center: Point,
        /// Marker diameter in pixels.
        diameter: f64,
        /// Opaque RGBA8 color.
        color: [u8; 4],
    },
}

/// Everything needed to rasterize one frame, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Frame this plan was compiled for.
    pub frame: FrameIndex,
    /// Target canvas.
    pub canvas: Canvas,
    /// Clear color.
    pub background: [u8; 4],
    /// Operations in paint order.
    pub ops: Vec<DrawOp>,
}

/// Compile `map` at `frame` into a [`FramePlan`].
///
/// Paint order: the label, then per line (dataset order) its stroke followed by
/// its station dots.
pub fn compile_frame(map: &MetroMap, tween: &Tween, frame: FrameIndex) -> MetroResult<FramePlan> {
    if !tween.frames().contains(frame) {
        return Err(MetroError::validation(format!(
            "frame {} is outside [0, {})",
            frame.0,
            tween.frame_count()
        )));
    }

    let mut ops = Vec::with_capacity(1 + map.lines.len() + map.node_count());

    if let Some(label) = &map.label {
        ops.push(DrawOp::Label {
            text: label.text.clone(),
            origin: label.origin,
            size_px: label.font_size,
            color: label.color.to_rgba8(),
        });
    }

    let station_fill = map.station_fill.to_rgba8();
    let station_dot = map.station_dot.at(tween, frame);
    let transfer_dot = map.transfer_dot.at(tween, frame);

    for line in &map.lines {
        let path = line_path(map, line, tween, frame);
        if !path.elements().is_empty() {
            ops.push(DrawOp::Stroke {
                path,
                width: map.line_width.at(tween, frame),
                color: line.color.to_rgba8(),
            });
        }

        for node in &line.nodes {
            let diameter = match node.kind {
                NodeKind::Station => station_dot,
                NodeKind::Transfer => transfer_dot,
                _ => continue,
            };
            ops.push(DrawOp::Dot {
                center: map.node_position(node, tween, frame),
                diameter,
                color: station_fill,
            });
        }
    }

    Ok(FramePlan {
        frame,
        canvas: map.canvas,
        background: map.background.to_rgba8(),
        ops,
    })
}

/// Track polyline of `line` at `frame`.
///
/// The path starts with a move-to on the first node. Every node then adds a
/// line-to, except on the opening frame where only nodes that keep their
/// opening vertex (bends and transfers) do; regular stations are passed
/// straight through so the first frame shows the plain geographic track.
pub fn line_path(map: &MetroMap, line: &MetroLine, tween: &Tween, frame: FrameIndex) -> BezPath {
    let mut path = BezPath::new();
    for (i, node) in line.nodes.iter().enumerate() {
        let p = map.node_position(node, tween, frame);
        if i == 0 {
            path.move_to(p);
        }
        if !frame.is_first() || node.kind.keeps_opening_vertex() {
            path.line_to(p);
        }
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
