use image::RgbaImage;
use image::imageops::FilterType;

use crate::foundation::core::Point;
use crate::render::target::RenderTarget;

/// Check mark icon pre-scaled to a fixed square edge in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckIcon {
    image: RgbaImage,
}

impl CheckIcon {
    /// Scale `src` to an `edge` x `edge` square (edge is clamped to at least 1 px).
    pub fn from_image(src: &RgbaImage, edge: u32) -> Self {
        let edge = edge.max(1);
        let image = if src.width() == edge && src.height() == edge {
            src.clone()
        } else {
            image::imageops::resize(src, edge, edge, FilterType::Triangle)
        };
        Self { image }
    }

    /// Edge length in pixels.
    pub fn edge(&self) -> u32 {
        self.image.width()
    }

    /// Scaled icon pixels.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Stamp `icon` centered on `center` when `checked`; unchecked boxes are left as the template
/// draws them.
pub fn draw_checkbox(target: &mut RenderTarget, center: Point, checked: bool, icon: &CheckIcon) {
    if !checked {
        return;
    }
    let half = f64::from(icon.edge()) / 2.0;
    let left = (center.x - half).round() as i64;
    let top = (center.y - half).round() as i64;
    target.composite_straight(icon.as_image(), left, top);
}

#[cfg(test)]
#[path = "../../tests/unit/render/checkbox.rs"]
mod tests;
