use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::{FormplateError, FormplateResult};
use crate::render::target::RenderTarget;
use crate::text::layout::TextBackend;

/// Font-free backend with a fixed advance per character.
///
/// Each non-whitespace character is drawn as a filled box one advance wide and one font size
/// tall. Metrics are exact and platform independent, which makes layouts reproducible where no
/// font file is at hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceText {
    advance_em: f32,
}

impl Default for FixedAdvanceText {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl FixedAdvanceText {
    /// Backend whose characters advance `advance_em` x font size.
    pub fn new(advance_em: f32) -> FormplateResult<Self> {
        if !advance_em.is_finite() || advance_em <= 0.0 {
            return Err(FormplateError::validation(
                "advance_em must be finite and > 0",
            ));
        }
        Ok(Self { advance_em })
    }

    /// Advance of one character at `font_size`.
    pub fn advance(&self, font_size: f32) -> f32 {
        self.advance_em * font_size
    }
}

impl TextBackend for FixedAdvanceText {
    fn measure(&mut self, text: &str, font_size: f32) -> FormplateResult<f32> {
        Ok(text.chars().count() as f32 * self.advance(font_size))
    }

    fn fill_line(
        &mut self,
        target: &mut RenderTarget,
        text: &str,
        top_left: Point,
        font_size: f32,
        color: Rgba8,
    ) -> FormplateResult<()> {
        let advance = f64::from(self.advance(font_size));
        let height = f64::from(font_size);
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = top_left.x + i as f64 * advance;
            target.fill_rect(
                Rect::new(x0, top_left.y, x0 + advance, top_left.y + height),
                color,
            );
        }
        Ok(())
    }
}
