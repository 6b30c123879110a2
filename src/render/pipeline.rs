use std::path::Path;
use std::time::Duration;

use crate::animation::tween::Tween;
use crate::compile::plan::compile_frame;
use crate::encode::sink::{AnimationEncoder, FrameSink, SinkConfig};
use crate::encode::stills::{PngSequenceSink, save_png};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{MetroError, MetroResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::model::MetroMap;
use crate::settings::AnimationSettings;

/// Compile + render a single frame.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    map: &MetroMap,
    tween: &Tween,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> MetroResult<FrameRGBA> {
    let plan = compile_frame(map, tween, frame)?;
    backend.render_plan(&plan)
}

/// Render every frame of `tween`, in order.
#[tracing::instrument(skip_all, fields(frames = tween.frame_count()))]
pub fn render_frames(
    map: &MetroMap,
    tween: &Tween,
    backend: &mut dyn RenderBackend,
) -> MetroResult<Vec<FrameRGBA>> {
    tween
        .frames()
        .iter()
        .map(|f| render_frame(map, tween, f, backend))
        .collect()
}

/// Render `range` and push each frame into `sink` in increasing order.
#[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0))]
pub fn render_range(
    map: &MetroMap,
    tween: &Tween,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> MetroResult<u64> {
    if range.is_empty() {
        return Err(MetroError::validation("render range must be non-empty"));
    }
    sink.begin(SinkConfig {
        width: map.canvas.width,
        height: map.canvas.height,
        frame_count: range.len_frames(),
    })?;
    let mut rendered = 0u64;
    for f in range.iter() {
        let frame = render_frame(map, tween, f, backend)?;
        sink.push_frame(f, &frame)?;
        rendered += 1;
    }
    sink.end()?;
    Ok(rendered)
}

/// Render one frame straight to a PNG file.
#[tracing::instrument(skip(map, tween, backend), fields(out = %out_path.display()))]
pub fn render_still(
    map: &MetroMap,
    tween: &Tween,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
    out_path: &Path,
) -> MetroResult<()> {
    let rgba = render_frame(map, tween, frame, backend)?;
    crate::encode::gif::ensure_parent_dir(out_path)?;
    save_png(&rgba, out_path, map.background.to_rgba8())
}

/// Counters reported by [`render_animation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames rasterized and written as stills.
    pub frames_rendered: u64,
    /// Images in one loop of the assembled animation.
    pub timeline_entries: u64,
    /// Length of one loop.
    pub loop_duration: Duration,
}

/// Full batch run: render every frame to numbered stills in a scratch
/// directory, read them back in order, and hand them to `encoder`.
///
/// Stills are deleted before returning, whether or not encoding succeeded.
#[tracing::instrument(skip_all, fields(frames = settings.frame_count))]
pub fn render_animation(
    map: &MetroMap,
    settings: &AnimationSettings,
    backend: &mut dyn RenderBackend,
    encoder: &mut dyn AnimationEncoder,
) -> MetroResult<RenderStats> {
    settings.validate()?;
    let tween = settings.tween()?;
    let timeline = settings.timeline()?;

    let scratch = tempfile::Builder::new()
        .prefix("metromorph-frames-")
        .tempdir()
        .map_err(|e| MetroError::encode(format!("create stills directory: {e}")))?;

    let mut sink = PngSequenceSink::new(scratch.path(), map.background.to_rgba8());
    let rendered = render_range(map, &tween, tween.frames(), backend, &mut sink)?;
    let stills = sink.into_stills();
    tracing::info!(stills = stills.len(), dir = %scratch.path().display(), "rendered stills");

    let frames = stills.load_frames()?;
    encoder.encode(&timeline, &frames)?;

    drop(stills);
    scratch
        .close()
        .map_err(|e| MetroError::encode(format!("remove stills directory: {e}")))?;

    Ok(RenderStats {
        frames_rendered: rendered,
        timeline_entries: timeline.len_entries() as u64,
        loop_duration: timeline.total_duration(),
    })
}
