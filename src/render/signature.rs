use image::RgbaImage;
use image::imageops::FilterType;

use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::error::{FormplateError, FormplateResult};
use crate::render::target::RenderTarget;

/// Decoded signature pixels (straight RGBA8) at native resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureBuffer {
    image: RgbaImage,
}

impl SignatureBuffer {
    /// Wrap already decoded pixels.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the pixels.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Number of pixels with non-zero alpha.
    pub fn ink_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] > 0).count()
    }
}

/// Decode encoded signature bytes into a [`SignatureBuffer`].
pub fn decode_signature(bytes: &[u8]) -> FormplateResult<SignatureBuffer> {
    if bytes.is_empty() {
        return Err(FormplateError::signature_decode("signature bytes are empty"));
    }
    let image = image::load_from_memory(bytes)
        .map_err(|e| FormplateError::signature_decode(format!("decode signature image: {e}")))?
        .to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(FormplateError::signature_decode(
            "signature image has zero area",
        ));
    }
    Ok(SignatureBuffer { image })
}

/// Single-pass max-alpha dilation thickening faint strokes.
///
/// Every pixel with alpha > 0 spreads its color into the `(2r+1)^2` neighborhood wherever the
/// neighbor is less opaque. Sources are read from the unmodified input; writes go to a copy, so
/// they never cascade within the pass.
pub fn dilate(src: &SignatureBuffer, radius: u32) -> SignatureBuffer {
    let width = src.width() as i64;
    let height = src.height() as i64;
    let r = i64::from(radius);
    let input = &src.image;
    let mut out = input.clone();

    for y in 0..height {
        for x in 0..width {
            let px = input.get_pixel(x as u32, y as u32).0;
            let alpha = px[3];
            if alpha == 0 {
                continue;
            }
            for dy in -r..=r {
                let ny = y + dy;
                if ny < 0 || ny >= height {
                    continue;
                }
                for dx in -r..=r {
                    let nx = x + dx;
                    if nx < 0 || nx >= width {
                        continue;
                    }
                    let n = out.get_pixel_mut(nx as u32, ny as u32);
                    if n.0[3] < alpha {
                        n.0 = px;
                    }
                }
            }
        }
    }

    SignatureBuffer { image: out }
}

/// Decode then dilate: the signature as it will be scaled into the signature area.
pub fn process_signature(bytes: &[u8], radius: u32) -> FormplateResult<SignatureBuffer> {
    let decoded = decode_signature(bytes)?;
    Ok(dilate(&decoded, radius))
}

/// Scaled size of a signature inside an area and its offset from the area's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectFit {
    /// Scaled size.
    pub size: Size,
    /// Offset of the scaled image inside the area.
    pub offset: Vec2,
}

/// Fit `src` inside `area` preserving aspect ratio, centered along the slack axis.
///
/// Relatively wider sources fill the area width, otherwise the area height. Never crops.
pub fn fit_aspect(src: Size, area: Size) -> AspectFit {
    let src_ratio = src.width / src.height;
    let area_ratio = area.width / area.height;
    if src_ratio > area_ratio {
        let height = area.width / src_ratio;
        AspectFit {
            size: Size::new(area.width, height),
            offset: Vec2::new(0.0, (area.height - height) / 2.0),
        }
    } else {
        let width = area.height * src_ratio;
        AspectFit {
            size: Size::new(width, area.height),
            offset: Vec2::new((area.width - width) / 2.0, 0.0),
        }
    }
}

/// Scale `signature` into the area centered at `area_center` and composite it.
pub fn place_signature(
    target: &mut RenderTarget,
    signature: &SignatureBuffer,
    area_center: Point,
    area: Size,
) {
    if !(area.width > 0.0 && area.height > 0.0) {
        return;
    }
    let src = Size::new(f64::from(signature.width()), f64::from(signature.height()));
    let fit = fit_aspect(src, area);
    let w = (fit.size.width.ceil() as u32).max(1);
    let h = (fit.size.height.ceil() as u32).max(1);
    let scaled = if (w, h) == signature.image.dimensions() {
        signature.image.clone()
    } else {
        image::imageops::resize(&signature.image, w, h, FilterType::Triangle)
    };

    let top_left = Point::new(
        area_center.x - area.width / 2.0,
        area_center.y - area.height / 2.0,
    ) + fit.offset;
    target.composite_straight(&scaled, top_left.x.round() as i64, top_left.y.round() as i64);
}

#[cfg(test)]
#[path = "../../tests/unit/render/signature.rs"]
mod tests;
