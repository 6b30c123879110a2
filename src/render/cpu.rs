use std::sync::Arc;

use kurbo::Shape;

use crate::assets::font::LoadedFont;
use crate::assets::text::{TextBrushRgba8, TextLayoutEngine, first_baseline};
use crate::compile::plan::{DrawOp, FramePlan};
use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{MetroError, MetroResult};
use crate::render::backend::{FrameRGBA, RenderBackend};

#[derive(Clone)]
struct LabelCache {
    text: String,
    size_bits: u64,
    color: [u8; 4],
    layout: Arc<parley::Layout<TextBrushRgba8>>,
    baseline: f32,
}

#[derive(Clone)]
struct FontCache {
    loaded: LoadedFont,
    data: vello_cpu::peniko::FontData,
}

/// CPU raster backend powered by `vello_cpu` for vector and text rasterization.
///
/// The render context is kept between frames and reset before each one, so a
/// backend renders one frame at a time.
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
    font: Option<FontCache>,
    text_engine: TextLayoutEngine,
    label_cache: Option<LabelCache>,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBackend {
    /// Backend without a font; plans containing a label fail to render.
    pub fn new() -> Self {
        Self {
            ctx: None,
            font: None,
            text_engine: TextLayoutEngine::new(),
            label_cache: None,
        }
    }

    /// Backend that draws labels with `font`.
    pub fn with_font(font: LoadedFont) -> Self {
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from((*font.bytes).clone()),
            font.index,
        );
        Self {
            font: Some(FontCache { loaded: font, data }),
            ..Self::new()
        }
    }

    /// The label font, if one was supplied.
    pub fn font(&self) -> Option<&LoadedFont> {
        self.font.as_ref().map(|f| &f.loaded)
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> MetroResult<R>,
    ) -> MetroResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_op(&mut self, op: &DrawOp, ctx: &mut vello_cpu::RenderContext) -> MetroResult<()> {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match op {
            DrawOp::Label {
                text,
                origin,
                size_px,
                color,
            } => self.draw_label(text, *origin, *size_px, *color, ctx),
            DrawOp::Stroke { path, width, color } => {
                ctx.set_stroke(
                    vello_cpu::kurbo::Stroke::new(*width)
                        .with_caps(vello_cpu::kurbo::Cap::Round)
                        .with_join(vello_cpu::kurbo::Join::Round),
                );
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&bezpath_to_cpu(path));
                Ok(())
            }
            DrawOp::Dot {
                center,
                diameter,
                color,
            } => {
                if *diameter <= 0.0 {
                    return Ok(());
                }
                let circle = kurbo::Circle::new(*center, diameter / 2.0);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&bezpath_to_cpu(&circle.to_path(0.1)));
                Ok(())
            }
        }
    }

    fn draw_label(
        &mut self,
        text: &str,
        origin: Point,
        size_px: f64,
        color: [u8; 4],
        ctx: &mut vello_cpu::RenderContext,
    ) -> MetroResult<()> {
        let font = self.font.as_ref().map(|f| f.data.clone()).ok_or_else(|| {
            MetroError::render(format!("label '{text}' needs a font, but none was loaded"))
        })?;
        let label = self.label_layout(text, size_px, color)?;

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin.x,
            origin.y - f64::from(label.baseline),
        )));
        for line in label.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn label_layout(&mut self, text: &str, size_px: f64, color: [u8; 4]) -> MetroResult<LabelCache> {
        if let Some(c) = &self.label_cache
            && c.text == text
            && c.size_bits == size_px.to_bits()
            && c.color == color
        {
            return Ok(c.clone());
        }

        let bytes = self
            .font
            .as_ref()
            .map(|f| Arc::clone(&f.loaded.bytes))
            .ok_or_else(|| MetroError::render("label layout requires a font"))?;
        let layout =
            self.text_engine
                .layout_line(text, &bytes, size_px as f32, TextBrushRgba8::from(color))?;
        let baseline = first_baseline(&layout);
        tracing::debug!(text, size_px, baseline, "laid out label");

        let out = LabelCache {
            text: text.to_string(),
            size_bits: size_px.to_bits(),
            color,
            layout: Arc::new(layout),
            baseline,
        };
        self.label_cache = Some(out.clone());
        Ok(out)
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip(self, plan), fields(frame = plan.frame.0, ops = plan.ops.len()))]
    fn render_plan(&mut self, plan: &FramePlan) -> MetroResult<FrameRGBA> {
        let (w, h) = plan.canvas.to_u16()?;
        self.with_ctx_mut(w, h, |this, ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(plan.background));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));

            for op in &plan.ops {
                this.draw_op(op, ctx)?;
            }

            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut pixmap);

            Ok(FrameRGBA {
                width: plan.canvas.width,
                height: plan.canvas.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })
    }
}

fn color_to_cpu(c: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c[0], c[1], c[2], c[3])
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
