use crate::compile::plan::FramePlan;
use crate::foundation::error::{MetroError, MetroResult};
use crate::foundation::math::flatten_premul_over_bg;

/// A rendered frame as RGBA8 pixels.
///
/// Backends produce **premultiplied** pixels; frames decoded from disk are
/// straight alpha. The `premultiplied` flag keeps this explicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Fully opaque straight RGBA8, composited over `bg_rgba` where needed.
    pub fn to_opaque_rgba8(&self, bg_rgba: [u8; 4]) -> MetroResult<Vec<u8>> {
        let expected = (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4);
        if self.data.len() != expected {
            return Err(MetroError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let mut out = vec![0u8; expected];
        if self.premultiplied {
            flatten_premul_over_bg(&mut out, &self.data, bg_rgba);
        } else {
            // Straight alpha: premultiply on the fly, then composite.
            let mut premul = self.data.clone();
            for px in premul.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * a + 127) / 255) as u8;
                }
            }
            flatten_premul_over_bg(&mut out, &premul, bg_rgba);
        }
        Ok(out)
    }
}

/// A renderer that rasterizes a compiled [`FramePlan`].
///
/// Most callers go through [`crate::render_frame`] and friends, which handle
/// compilation.
pub trait RenderBackend {
    /// Rasterize `plan` into a fresh frame.
    fn render_plan(&mut self, plan: &FramePlan) -> MetroResult<FrameRGBA>;
}
