//! metromorph renders a looping GIF that morphs the Montreal metro diagram into
//! the network's real geography and back.
//!
//! The crate is organized as a small rendering pipeline:
//!
//! 1. **Compile**: [`compile_frame`] turns a [`MetroMap`] at a [`FrameIndex`]
//!    into a [`FramePlan`] (label, eased line strokes, station dots).
//! 2. **Render**: a [`RenderBackend`] rasterizes the plan into a [`FrameRGBA`].
//!    [`CpuBackend`] is the `vello_cpu` implementation.
//! 3. **Sink**: frames are written in order as numbered PNG stills.
//! 4. **Assemble**: an [`AnimationEncoder`](encode::sink::AnimationEncoder)
//!    turns the stills into the loop described by a
//!    [`LoopTimeline`](encode::timeline::LoopTimeline).
//!
//! [`render_animation`] runs all four steps.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod compile;
pub mod encode;
mod foundation;
mod render;
mod scene;
mod settings;
mod viewer;

pub use animation::ease::{Ease, smootherstep};
pub use animation::tween::{Span, Tween};
pub use assets::font::{FontSource, LoadedFont, load_font};
pub use compile::plan::{DrawOp, FramePlan, compile_frame, line_path};
pub use foundation::core::{BezPath, Canvas, FrameIndex, FrameRange, Point, Vec2};
pub use foundation::error::{MetroError, MetroResult};
pub use render::backend::{FrameRGBA, RenderBackend};
pub use render::cpu::CpuBackend;
pub use render::pipeline::{
    RenderStats, render_animation, render_frame, render_frames, render_range, render_still,
};
pub use scene::color::Color;
pub use scene::model::{Label, MetroLine, MetroMap, Node, NodeKind};
pub use scene::montreal::montreal;
pub use settings::{
    AnimationSettings, FRAME_COUNT, FRAME_DURATION, GIF_COLORS, HOLD_DURATION, OUTPUT_PATH,
};
pub use viewer::open_in_viewer;
