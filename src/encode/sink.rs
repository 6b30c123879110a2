use crate::encode::timeline::LoopTimeline;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MetroError, MetroResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> MetroResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MetroResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> MetroResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> MetroResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MetroResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> MetroResult<()> {
        Ok(())
    }
}

/// Turns fully rendered frames into the final looping animation.
///
/// `frames[i]` is the frame with index `i`; the timeline decides order and timing.
pub trait AnimationEncoder {
    /// Encode and write the animation. Nothing is written on error.
    fn encode(&mut self, timeline: &LoopTimeline, frames: &[FrameRGBA]) -> MetroResult<()>;
}

/// Encoder that records what it was asked to encode.
#[derive(Debug, Default)]
pub struct InMemoryEncoder {
    /// Flattened `(frame, delay)` sequence of the last encode call.
    pub(crate) sequence: Vec<(FrameIndex, std::time::Duration)>,
    /// Frames handed to the last encode call.
    pub(crate) frames: Vec<FrameRGBA>,
}

impl InMemoryEncoder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `(frame, delay)` sequence of the last encode call.
    pub fn sequence(&self) -> &[(FrameIndex, std::time::Duration)] {
        &self.sequence
    }

    /// Frames received by the last encode call.
    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }
}

impl AnimationEncoder for InMemoryEncoder {
    fn encode(&mut self, timeline: &LoopTimeline, frames: &[FrameRGBA]) -> MetroResult<()> {
        for (idx, _) in timeline.entries() {
            frame_at(frames, idx)?;
        }
        self.sequence = timeline.entries().collect();
        self.frames = frames.to_vec();
        Ok(())
    }
}

/// Look up the frame for `idx`, failing when the timeline outruns the frames.
pub(crate) fn frame_at(frames: &[FrameRGBA], idx: FrameIndex) -> MetroResult<&FrameRGBA> {
    usize::try_from(idx.0)
        .ok()
        .and_then(|i| frames.get(i))
        .ok_or_else(|| {
            MetroError::encode(format!(
                "timeline references frame {} but only {} frames were rendered",
                idx.0,
                frames.len()
            ))
        })
}
