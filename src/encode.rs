//! Frame sinks and animation encoders.
//!
//! Rendered frames flow into a [`FrameSink`](sink::FrameSink) in timeline order;
//! once every frame exists, an [`AnimationEncoder`](sink::AnimationEncoder)
//! turns them into the looping output according to a
//! [`LoopTimeline`](timeline::LoopTimeline).

/// Shared GIF writing helpers and the in-process encoder.
pub mod gif;
/// `gifsicle`-based encoder (system binary).
pub mod gifsicle;
/// Sink and encoder traits plus in-memory implementations.
pub mod sink;
/// Numbered PNG stills on disk.
pub mod stills;
/// Hold/forward/hold/reverse loop structure.
pub mod timeline;
