use std::path::PathBuf;
use std::time::Duration;

use crate::animation::tween::Tween;
use crate::encode::timeline::LoopTimeline;
use crate::foundation::error::{MetroError, MetroResult};

/// Number of frames in the morph.
pub const FRAME_COUNT: u64 = 50;
/// Display time of every morph frame.
pub const FRAME_DURATION: Duration = Duration::from_millis(20);
/// Pause on the first and the last frame.
pub const HOLD_DURATION: Duration = Duration::from_secs(5);
/// Palette size of the assembled GIF.
pub const GIF_COLORS: u16 = 256;
/// Default output file, relative to the working directory.
pub const OUTPUT_PATH: &str = "Montreal.gif";

/// Frame count and timing of one animation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationSettings {
    /// Frames rendered for one pass of the morph.
    pub frame_count: u64,
    /// Display time of each morph frame.
    pub step: Duration,
    /// Pause on the first and the last frame.
    pub hold: Duration,
    /// Palette size handed to `gifsicle`.
    pub colors: u16,
    /// Where the finished GIF is written.
    pub out_path: PathBuf,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frame_count: FRAME_COUNT,
            step: FRAME_DURATION,
            hold: HOLD_DURATION,
            colors: GIF_COLORS,
            out_path: PathBuf::from(OUTPUT_PATH),
        }
    }
}

impl AnimationSettings {
    /// Reject empty animations and zero delays.
    pub fn validate(&self) -> MetroResult<()> {
        if self.frame_count == 0 {
            return Err(MetroError::validation("frame_count must be > 0"));
        }
        if self.step.is_zero() || self.hold.is_zero() {
            return Err(MetroError::validation("frame delays must be non-zero"));
        }
        Ok(())
    }

    /// Interpolation driver for these settings.
    pub fn tween(&self) -> MetroResult<Tween> {
        Tween::new(self.frame_count)
    }

    /// Hold, forward, hold, reverse over every frame.
    pub fn timeline(&self) -> MetroResult<LoopTimeline> {
        self.validate()?;
        LoopTimeline::ping_pong(self.tween()?.frames(), self.step, self.hold)
    }
}
