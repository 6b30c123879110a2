use crate::animation::ease::Ease;
use crate::foundation::core::{FrameIndex, FrameRange, Point};
use crate::foundation::error::{MetroError, MetroResult};

/// Frame-driven interpolation between the geographic and schematic layouts.
///
/// Progress is the eased position of the frame inside `[0, frame_count)`, so the
/// first frame sits exactly on the start value and the last frame lands just
/// short of the end value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    frame_count: u64,
    ease: Ease,
}

impl Tween {
    /// Create a tween over `frame_count` frames with the quintic ease.
    pub fn new(frame_count: u64) -> MetroResult<Self> {
        if frame_count == 0 {
            return Err(MetroError::validation("frame_count must be > 0"));
        }
        Ok(Self {
            frame_count,
            ease: Ease::default(),
        })
    }

    /// Replace the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Number of frames in the animation.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Every frame this tween animates, in order.
    pub fn frames(&self) -> FrameRange {
        FrameRange::first_n(self.frame_count)
    }

    /// Easing factor for `frame`, in `[0, 1]`.
    pub fn factor(&self, frame: FrameIndex) -> f64 {
        self.ease.between(0.0, self.frame_count as f64, frame.0 as f64)
    }

    /// Interpolated scalar for `frame`.
    pub fn lerp(&self, start: f64, end: f64, frame: FrameIndex) -> f64 {
        start + self.factor(frame) * (end - start)
    }

    /// Interpolated point for `frame`; both axes share one factor.
    pub fn point(&self, start: Point, end: Point, frame: FrameIndex) -> Point {
        let t = self.factor(frame);
        Point::new(
            start.x + t * (end.x - start.x),
            start.y + t * (end.y - start.y),
        )
    }
}

/// A scalar with one value in the geographic layout and one in the schematic layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Value on the opening (geographic) frame.
    pub geo: f64,
    /// Value the animation converges to (schematic).
    pub map: f64,
}

impl Span {
    /// Create a span.
    pub fn new(geo: f64, map: f64) -> Self {
        Self { geo, map }
    }

    /// Value of this span at `frame`.
    pub fn at(self, tween: &Tween, frame: FrameIndex) -> f64 {
        tween.lerp(self.geo, self.map, frame)
    }

    pub(crate) fn is_valid_width(self) -> bool {
        self.geo.is_finite() && self.map.is_finite() && self.geo >= 0.0 && self.map >= 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
