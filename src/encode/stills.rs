use std::path::{Path, PathBuf};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MetroError, MetroResult};
use crate::render::backend::FrameRGBA;

/// Numbered PNG stills written by a [`PngSequenceSink`].
///
/// The files are deleted when the sequence is dropped.
#[derive(Debug, Default)]
pub struct StillSequence {
    paths: Vec<PathBuf>,
}

impl StillSequence {
    /// Still paths in frame order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of stills.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Return `true` when no still was written.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Decode every still, in frame order, as straight-alpha RGBA8.
    #[tracing::instrument(skip(self), fields(count = self.paths.len()))]
    pub fn load_frames(&self) -> MetroResult<Vec<FrameRGBA>> {
        self.paths.iter().map(|p| load_png(p)).collect()
    }
}

impl Drop for StillSequence {
    fn drop(&mut self) {
        for p in self.paths.drain(..) {
            if let Err(e) = std::fs::remove_file(&p)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!(path = %p.display(), error = %e, "failed to remove still");
            }
        }
    }
}

/// Sink that writes each frame to `<dir>/frame_<n>.png`.
pub struct PngSequenceSink {
    dir: PathBuf,
    bg_rgba: [u8; 4],
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    stills: StillSequence,
}

impl PngSequenceSink {
    /// Write stills into `dir`; alpha is flattened over `bg_rgba`.
    pub fn new(dir: impl Into<PathBuf>, bg_rgba: [u8; 4]) -> Self {
        Self {
            dir: dir.into(),
            bg_rgba,
            cfg: None,
            last_idx: None,
            stills: StillSequence::default(),
        }
    }

    /// Hand over the written stills; they are removed when the result drops.
    pub fn into_stills(self) -> StillSequence {
        self.stills
    }

    /// Path of the still for `idx`.
    pub fn still_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> MetroResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(MetroError::validation(
                "still width/height must be non-zero",
            ));
        }
        use anyhow::Context as _;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create stills directory '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MetroResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| MetroError::encode("still sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(MetroError::encode(
                "still sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(MetroError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let path = self.still_path(idx);
        save_png(frame, &path, self.bg_rgba)?;
        tracing::trace!(path = %path.display(), "wrote still");
        self.stills.paths.push(path);
        Ok(())
    }

    fn end(&mut self) -> MetroResult<()> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| MetroError::encode("still sink not started"))?;
        if self.stills.len() as u64 != cfg.frame_count {
            return Err(MetroError::encode(format!(
                "expected {} stills, wrote {}",
                cfg.frame_count,
                self.stills.len()
            )));
        }
        Ok(())
    }
}

/// Write `frame` as an opaque PNG at `path`, flattening alpha over `bg_rgba`.
pub fn save_png(frame: &FrameRGBA, path: &Path, bg_rgba: [u8; 4]) -> MetroResult<()> {
    let rgba = frame.to_opaque_rgba8(bg_rgba)?;
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| MetroError::encode(format!("write still '{}': {e}", path.display())))
}

fn load_png(path: &Path) -> MetroResult<FrameRGBA> {
    let img = image::open(path)
        .map_err(|e| MetroError::encode(format!("read still '{}': {e}", path.display())))?
        .to_rgba8();
    Ok(FrameRGBA {
        width: img.width(),
        height: img.height(),
        data: img.into_raw(),
        premultiplied: false,
    })
}
