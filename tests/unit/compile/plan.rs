use kurbo::PathEl;

use super::*;
use crate::animation::tween::Span;
use crate::foundation::core::Vec2;
use crate::scene::color::Color;
use crate::scene::model::{Label, Node};

fn line(name: &str, color: Color, nodes: Vec<Node>) -> MetroLine {
    MetroLine {
        name: name.to_string(),
        color,
        nodes,
    }
}

fn synthetic_map(label: bool) -> MetroMap {
    MetroMap {
        canvas: Canvas {
            width: 80,
            height: 60,
        },
        background: Color::WHITE,
        station_fill: Color::WHITE,
        label: label.then(|| Label {
            text: "Town".to_string(),
            origin: Point::new(40.0, 12.0),
            font_family: "Sans".to_string(),
            font_size: 10.0,
            color: Color::BLACK,
        }),
        geo_offset: Vec2::new(0.0, 0.0),
        map_offset: Vec2::new(0.0, 0.0),
        line_width: Span::new(8.0, 2.0),
        station_dot: Span::new(4.0, 1.0),
        transfer_dot: Span::new(6.0, 1.0),
        lines: vec![
            line(
                "a",
                Color::rgb(1.0, 0.0, 0.0),
                vec![
                    Node::new((10.0, 30.0), NodeKind::Transfer, (10.0, 40.0)),
                    Node::new((20.0, 32.0), NodeKind::Station, (20.0, 40.0)),
                    Node::new((30.0, 28.0), NodeKind::MapOnlyBend, (30.0, 40.0)),
                    Node::new((40.0, 30.0), NodeKind::Bend, (40.0, 40.0)),
                    Node::new((50.0, 31.0), NodeKind::Station, (50.0, 40.0)),
                    Node::new((60.0, 30.0), NodeKind::Transfer, (60.0, 40.0)),
                ],
            ),
            line(
                "b",
                Color::rgb(0.0, 0.0, 1.0),
                vec![
                    Node::new((60.0, 30.0), NodeKind::Transfer, (60.0, 40.0)),
                    Node::new((60.0, 50.0), NodeKind::Station, (60.0, 55.0)),
                ],
            ),
        ],
    }
}

fn vertex_count(path: &BezPath) -> usize {
    path.elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_) | PathEl::LineTo(_)))
        .count()
}

fn strokes(plan: &FramePlan) -> Vec<&BezPath> {
    plan.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Stroke { path, .. } => Some(path),
            _ => None,
        })
        .collect()
}

#[test]
fn opening_frame_skips_station_vertices() {
    let map = synthetic_map(false);
    let tween = Tween::new(10).unwrap();

    for line in &map.lines {
        let first = line_path(&map, line, &tween, FrameIndex(0));
        let second = line_path(&map, line, &tween, FrameIndex(1));
        assert!(
            vertex_count(&first) < vertex_count(&second),
            "line {}: {} !< {}",
            line.name,
            vertex_count(&first),
            vertex_count(&second)
        );
    }
}

#[test]
fn opening_frame_keeps_bends_and_transfers_only() {
    let map = synthetic_map(false);
    let tween = Tween::new(10).unwrap();
    let path = line_path(&map, &map.lines[0], &tween, FrameIndex(0));

    let els = path.elements();
    assert_eq!(els[0], PathEl::MoveTo(Point::new(10.0, 30.0)));
    let line_tos: Vec<Point> = els
        .iter()
        .filter_map(|el| match el {
            PathEl::LineTo(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(
        line_tos,
        vec![
            Point::new(10.0, 30.0),
            Point::new(40.0, 30.0),
            Point::new(60.0, 30.0),
        ]
    );
}

#[test]
fn later_frames_visit_every_node() {
    let map = synthetic_map(false);
    let tween = Tween::new(10).unwrap();
    for f in 1..10 {
        let path = line_path(&map, &map.lines[0], &tween, FrameIndex(f));
        // One move-to plus one line-to per node.
        assert_eq!(vertex_count(&path), 1 + map.lines[0].nodes.len());
    }
}

#[test]
fn paint_order_is_label_then_stroke_and_dots_per_line() {
    let map = synthetic_map(true);
    let tween = Tween::new(10).unwrap();
    let plan = compile_frame(&map, &tween, FrameIndex(3)).unwrap();

    let kinds: Vec<&str> = plan
        .ops
        .iter()
        .map(|op| match op {
            DrawOp::Label { .. } => "label",
            DrawOp::Stroke { .. } => "stroke",
            DrawOp::Dot { .. } => "dot",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "label", "stroke", "dot", "dot", "dot", "dot", "stroke", "dot", "dot"
        ]
    );

    let colors: Vec<[u8; 4]> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Stroke { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(colors, vec![[255, 0, 0, 255], [0, 0, 255, 255]]);
}

#[test]
fn dots_use_station_and_transfer_widths() {
    let map = synthetic_map(false);
    let tween = Tween::new(10).unwrap();
    let plan = compile_frame(&map, &tween, FrameIndex(0)).unwrap();

    let diameters: Vec<f64> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Dot { diameter, .. } => Some(*diameter),
            _ => None,
        })
        .collect();
    assert_eq!(diameters, vec![6.0, 4.0, 4.0, 6.0, 6.0, 4.0]);
}

#[test]
fn widths_shrink_across_frames() {
    let map = synthetic_map(false);
    let tween = Tween::new(10).unwrap();

    let width_at = |f: u64| -> f64 {
        let plan = compile_frame(&map, &tween, FrameIndex(f)).unwrap();
        plan.ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Stroke { width, .. } => Some(*width),
                _ => None,
            })
            .unwrap()
    };

    assert_eq!(width_at(0), 8.0);
    let mut prev = width_at(0);
    for f in 1..10 {
        let w = width_at(f);
        assert!(w <= prev);
        prev = w;
    }
    assert!(prev > 2.0 && prev < 2.1);
}

#[test]
fn plan_is_deterministic() {
    let map = synthetic_map(true);
    let tween = Tween::new(10).unwrap();
    let a = compile_frame(&map, &tween, FrameIndex(4)).unwrap();
    let b = compile_frame(&map, &tween, FrameIndex(4)).unwrap();
    assert_eq!(a, b);
    assert_eq!(strokes(&a).len(), 2);
}

#[test]
fn out_of_range_frame_is_rejected() {
    let map = synthetic_map(false);
    let tween = Tween::new(10).unwrap();
    assert!(compile_frame(&map, &tween, FrameIndex(10)).is_err());
}
