use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{AnimationEncoder, frame_at};
use crate::encode::timeline::LoopTimeline;
use crate::foundation::error::{MetroError, MetroResult};
use crate::render::backend::FrameRGBA;

/// NeuQuant sampling factor handed to the `image` GIF encoder (1 best, 30 fastest).
pub const GIF_QUANTIZE_SPEED: i32 = 10;

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> MetroResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write an infinitely looping GIF with one image per `(frame, delay)` item.
pub fn write_gif<'a, W: Write>(
    w: W,
    frames: impl IntoIterator<Item = (&'a FrameRGBA, Duration)>,
    bg_rgba: [u8; 4],
) -> MetroResult<()> {
    let mut enc = GifEncoder::new_with_speed(w, GIF_QUANTIZE_SPEED);
    enc.set_repeat(Repeat::Infinite)
        .map_err(|e| MetroError::encode(format!("gif: set repeat: {e}")))?;

    let mut written = 0usize;
    for (frame, delay) in frames {
        let rgba = frame.to_opaque_rgba8(bg_rgba)?;
        let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| MetroError::encode("gif: frame buffer does not match its size"))?;
        let gif_frame = image::Frame::from_parts(
            img,
            0,
            0,
            image::Delay::from_saturating_duration(delay),
        );
        enc.encode_frame(gif_frame)
            .map_err(|e| MetroError::encode(format!("gif: encode frame {written}: {e}")))?;
        written += 1;
    }
    if written == 0 {
        return Err(MetroError::encode("gif: no frames to encode"));
    }
    Ok(())
}

/// Encode the timeline entries as GIF bytes in memory.
pub(crate) fn encode_entries<'a>(
    entries: impl IntoIterator<Item = (&'a FrameRGBA, Duration)>,
    bg_rgba: [u8; 4],
) -> MetroResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_gif(&mut buf, entries, bg_rgba)?;
    Ok(buf)
}

/// Options for [`NativeGifEncoder`].
#[derive(Clone, Debug)]
pub struct NativeGifOpts {
    /// Where the finished GIF is written.
    pub out_path: PathBuf,
    /// Color that transparent pixels are flattened over.
    pub bg_rgba: [u8; 4],
}

/// Builds the whole loop in-process with the `image` GIF codec.
#[derive(Clone, Debug)]
pub struct NativeGifEncoder {
    opts: NativeGifOpts,
}

impl NativeGifEncoder {
    /// Create an encoder writing to `opts.out_path`.
    pub fn new(opts: NativeGifOpts) -> Self {
        Self { opts }
    }

    /// Destination path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }
}

impl AnimationEncoder for NativeGifEncoder {
    #[tracing::instrument(skip_all, fields(out = %self.opts.out_path.display()))]
    fn encode(&mut self, timeline: &LoopTimeline, frames: &[FrameRGBA]) -> MetroResult<()> {
        let entries = timeline
            .entries()
            .map(|(idx, delay)| frame_at(frames, idx).map(|f| (f, delay)))
            .collect::<MetroResult<Vec<_>>>()?;
        let bytes = encode_entries(entries, self.opts.bg_rgba)?;

        ensure_parent_dir(&self.opts.out_path)?;
        use anyhow::Context as _;
        std::fs::write(&self.opts.out_path, &bytes)
            .with_context(|| format!("write gif '{}'", self.opts.out_path.display()))?;
        tracing::info!(bytes = bytes.len(), entries = timeline.len_entries(), "wrote gif");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
