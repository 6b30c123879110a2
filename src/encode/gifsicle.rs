use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::encode::gif::{encode_entries, ensure_parent_dir};
use crate::encode::sink::{AnimationEncoder, frame_at};
use crate::encode::timeline::LoopTimeline;
use crate::foundation::error::{MetroError, MetroResult};
use crate::render::backend::FrameRGBA;

/// Options for [`GifsicleEncoder`].
#[derive(Clone, Debug)]
pub struct GifsicleOpts {
    /// Where the merged GIF is written.
    pub out_path: PathBuf,
    /// Palette size passed as `--colors`.
    pub colors: u16,
    /// Color that transparent pixels are flattened over.
    pub bg_rgba: [u8; 4],
}

impl GifsicleOpts {
    /// Check the palette size and output path.
    pub fn validate(&self) -> MetroResult<()> {
        if !(2..=256).contains(&self.colors) {
            return Err(MetroError::validation(
                "gifsicle colors must be within 2..=256",
            ));
        }
        if self.out_path.as_os_str().is_empty() {
            return Err(MetroError::validation("gifsicle output path is empty"));
        }
        Ok(())
    }
}

/// Return `true` when `gifsicle --version` runs successfully.
pub fn is_gifsicle_on_path() -> bool {
    Command::new("gifsicle")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Writes each timeline segment as its own GIF and lets the system `gifsicle`
/// merge them into the final loop.
#[derive(Clone, Debug)]
pub struct GifsicleEncoder {
    opts: GifsicleOpts,
}

impl GifsicleEncoder {
    /// Create an encoder; fails on invalid options.
    pub fn new(opts: GifsicleOpts) -> MetroResult<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// Destination path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn write_parts(
        &self,
        dir: &Path,
        timeline: &LoopTimeline,
        frames: &[FrameRGBA],
    ) -> MetroResult<Vec<PathBuf>> {
        let mut parts = Vec::with_capacity(timeline.segments().len());
        for (i, seg) in timeline.segments().iter().enumerate() {
            let entries = seg
                .frames
                .iter()
                .map(|&idx| frame_at(frames, idx).map(|f| (f, seg.delay)))
                .collect::<MetroResult<Vec<_>>>()?;
            let bytes = encode_entries(entries, self.opts.bg_rgba)?;

            let path = dir.join(format!("part_{}.gif", i + 1));
            use anyhow::Context as _;
            std::fs::write(&path, &bytes)
                .with_context(|| format!("write segment '{}'", path.display()))?;
            tracing::debug!(segment = ?seg.kind, frames = seg.frames.len(), path = %path.display(), "wrote segment");
            parts.push(path);
        }
        Ok(parts)
    }
}

impl AnimationEncoder for GifsicleEncoder {
    #[tracing::instrument(skip_all, fields(out = %self.opts.out_path.display(), colors = self.opts.colors))]
    fn encode(&mut self, timeline: &LoopTimeline, frames: &[FrameRGBA]) -> MetroResult<()> {
        if !is_gifsicle_on_path() {
            return Err(MetroError::encode(
                "gifsicle is required to assemble the animation, but was not found on PATH",
            ));
        }

        let scratch = tempfile::Builder::new()
            .prefix("metromorph-parts-")
            .tempdir()
            .map_err(|e| MetroError::encode(format!("create segment directory: {e}")))?;
        let parts = self.write_parts(scratch.path(), timeline, frames)?;

        let output = Command::new("gifsicle")
            .arg("--colors")
            .arg(self.opts.colors.to_string())
            .args(&parts)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                MetroError::encode(format!(
                    "failed to spawn gifsicle (is it installed and on PATH?): {e}"
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MetroError::encode(format!(
                "gifsicle exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(MetroError::encode("gifsicle produced no output"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        use anyhow::Context as _;
        std::fs::write(&self.opts.out_path, &output.stdout)
            .with_context(|| format!("write gif '{}'", self.opts.out_path.display()))?;
        tracing::info!(bytes = output.stdout.len(), parts = parts.len(), "wrote gif");
        Ok(())
    }
}
