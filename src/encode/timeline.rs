use std::time::Duration;

use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{MetroError, MetroResult};

/// Role of a segment within the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Pause on the first frame.
    HoldFirst,
    /// Every frame in order.
    Forward,
    /// Pause on the last frame.
    HoldLast,
    /// Every frame in reverse order, leading back to the start.
    Reverse,
}

/// A run of frames sharing one per-frame delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// What this segment does in the loop.
    pub kind: SegmentKind,
    /// Frames in display order.
    pub frames: Vec<FrameIndex>,
    /// Display time of each frame.
    pub delay: Duration,
}

impl Segment {
    /// Total display time of the segment.
    pub fn duration(&self) -> Duration {
        self.delay.saturating_mul(self.frames.len() as u32)
    }
}

/// Display order and timing of the looping animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopTimeline {
    segments: Vec<Segment>,
}

impl LoopTimeline {
    /// Hold the first frame, play forward, hold the last frame, play in reverse.
    pub fn ping_pong(range: FrameRange, step: Duration, hold: Duration) -> MetroResult<Self> {
        let Some(last) = range.last() else {
            return Err(MetroError::validation("loop timeline needs at least one frame"));
        };
        if step.is_zero() || hold.is_zero() {
            return Err(MetroError::validation(
                "loop timeline delays must be non-zero",
            ));
        }

        let forward: Vec<FrameIndex> = range.iter().collect();
        let reverse: Vec<FrameIndex> = range.iter().rev().collect();
        Ok(Self {
            segments: vec![
                Segment {
                    kind: SegmentKind::HoldFirst,
                    frames: vec![range.start],
                    delay: hold,
                },
                Segment {
                    kind: SegmentKind::Forward,
                    frames: forward,
                    delay: step,
                },
                Segment {
                    kind: SegmentKind::HoldLast,
                    frames: vec![last],
                    delay: hold,
                },
                Segment {
                    kind: SegmentKind::Reverse,
                    frames: reverse,
                    delay: step,
                },
            ],
        })
    }

    /// Segments in playback order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Flattened `(frame, delay)` playback sequence.
    pub fn entries(&self) -> impl Iterator<Item = (FrameIndex, Duration)> + '_ {
        self.segments
            .iter()
            .flat_map(|s| s.frames.iter().map(move |&f| (f, s.delay)))
    }

    /// Number of displayed frames in one loop.
    pub fn len_entries(&self) -> usize {
        self.segments.iter().map(|s| s.frames.len()).sum()
    }

    /// Length of one loop.
    pub fn total_duration(&self) -> Duration {
        self.segments.iter().map(Segment::duration).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/timeline.rs"]
mod tests;
