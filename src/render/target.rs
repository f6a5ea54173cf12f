use std::io::Cursor;

use image::{ImageEncoder, RgbaImage};

use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::{FormplateError, FormplateResult};
use crate::foundation::math::{over_premul_onto_straight, over_straight};

/// Owned straight-alpha RGBA8 drawing surface for one render pass.
///
/// A target is created from a base template image and sized to it. It is never shared between
/// renders; the live preview replaces it wholesale instead of mutating it across frames.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderTarget {
    image: RgbaImage,
}

impl RenderTarget {
    /// New target holding an exact copy of `base` (no alpha compositing).
    pub fn from_base(base: &RgbaImage) -> Self {
        Self {
            image: base.clone(),
        }
    }

    /// Target dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.image.width(), self.image.height())
    }

    /// Pixel at `(x, y)` as straight RGBA8, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Borrow the underlying image.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume into the underlying image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Composite a straight-alpha image with its top-left corner at `(left, top)`.
    ///
    /// Parts falling outside the target are clipped.
    pub fn composite_straight(&mut self, src: &RgbaImage, left: i64, top: i64) {
        self.composite_with(src.width(), src.height(), left, top, |x, y| {
            src.get_pixel(x, y).0
        }, over_straight);
    }

    /// Composite tightly packed premultiplied RGBA8 bytes (`width` x `height`) at `(left, top)`.
    pub fn composite_premul(
        &mut self,
        src: &[u8],
        width: u32,
        height: u32,
        left: i64,
        top: i64,
    ) -> FormplateResult<()> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if src.len() != expected {
            return Err(FormplateError::validation(format!(
                "premultiplied buffer has {} bytes, expected {expected}",
                src.len()
            )));
        }
        self.composite_with(
            width,
            height,
            left,
            top,
            |x, y| {
                let i = ((y as usize) * (width as usize) + (x as usize)) * 4;
                [src[i], src[i + 1], src[i + 2], src[i + 3]]
            },
            over_premul_onto_straight,
        );
        Ok(())
    }

    /// Source-over fill of the pixels whose centers fall inside `rect`.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let x0 = rect.x0.round().max(0.0) as u32;
        let y0 = rect.y0.round().max(0.0) as u32;
        let x1 = (rect.x1.round().max(0.0) as u32).min(self.image.width());
        let y1 = (rect.y1.round().max(0.0) as u32).min(self.image.height());
        let src = color.to_array();
        for y in y0..y1 {
            for x in x0..x1 {
                let px = self.image.get_pixel_mut(x, y);
                px.0 = over_straight(px.0, src);
            }
        }
    }

    /// Encode as PNG (lossless, best compression). Identical targets encode to identical bytes.
    pub fn encode_png(&self) -> FormplateResult<Vec<u8>> {
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new_with_quality(
            Cursor::new(&mut buf),
            image::codecs::png::CompressionType::Best,
            image::codecs::png::FilterType::Adaptive,
        );
        encoder
            .write_image(
                self.image.as_raw(),
                self.image.width(),
                self.image.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| FormplateError::encode(format!("png encode failed: {e}")))?;
        Ok(buf)
    }

    fn composite_with(
        &mut self,
        width: u32,
        height: u32,
        left: i64,
        top: i64,
        sample: impl Fn(u32, u32) -> [u8; 4],
        blend: fn([u8; 4], [u8; 4]) -> [u8; 4],
    ) {
        let tw = i64::from(self.image.width());
        let th = i64::from(self.image.height());
        for sy in 0..height {
            let dy = top + i64::from(sy);
            if dy < 0 || dy >= th {
                continue;
            }
            for sx in 0..width {
                let dx = left + i64::from(sx);
                if dx < 0 || dx >= tw {
                    continue;
                }
                let px = self.image.get_pixel_mut(dx as u32, dy as u32);
                px.0 = blend(px.0, sample(sx, sy));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/target.rs"]
mod tests;
