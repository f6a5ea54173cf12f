use std::borrow::Cow;

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{FormplateError, FormplateResult};
use crate::render::target::RenderTarget;
use crate::text::layout::TextBackend;

// Transparent margin around each rasterized line so antialiased edges are not clipped.
const LINE_PAD_PX: i64 = 2;

/// Production text backend: `parley` shapes and measures, `vello_cpu` rasterizes.
///
/// Each line is rendered into its own premultiplied pixmap and composited onto the target, so
/// the target never has to live inside a `vello_cpu` context.
pub struct ParleyText {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for ParleyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyText")
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl ParleyText {
    /// Register the font in `font_bytes` (TTF/OTF) as the only family used for layout.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> FormplateResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            FormplateError::asset_load("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FormplateError::asset_load("registered font family has no name"))?
            .to_string();
        tracing::debug!(family = %family_name, "registered text font");

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Family name detected in the font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout_line(
        &mut self,
        text: &str,
        font_size: f32,
        color: Rgba8,
    ) -> FormplateResult<parley::Layout<Rgba8>> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(FormplateError::validation(
                "font size must be finite and > 0",
            ));
        }
        let family = self.family_name.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

impl TextBackend for ParleyText {
    fn measure(&mut self, text: &str, font_size: f32) -> FormplateResult<f32> {
        Ok(self.layout_line(text, font_size, Rgba8::default())?.width())
    }

    fn fill_line(
        &mut self,
        target: &mut RenderTarget,
        text: &str,
        top_left: Point,
        font_size: f32,
        color: Rgba8,
    ) -> FormplateResult<()> {
        let layout = self.layout_line(text, font_size, color)?;
        let pad = LINE_PAD_PX as f64;
        let w = pixmap_extent(f64::from(layout.full_width()) + 2.0 * pad + 1.0)?;
        let h = pixmap_extent(f64::from(layout.height()) + 2.0 * pad + 1.0)?;

        let origin_x = top_left.x.floor();
        let origin_y = top_left.y.floor();
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            pad + (top_left.x - origin_x),
            pad + (top_left.y - origin_y),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Absolute pen position with y on the run's baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        target.composite_premul(
            pixmap.data_as_u8_slice(),
            u32::from(w),
            u32::from(h),
            origin_x as i64 - LINE_PAD_PX,
            origin_y as i64 - LINE_PAD_PX,
        )
    }
}

fn pixmap_extent(v: f64) -> FormplateResult<u16> {
    let v = v.ceil();
    if !v.is_finite() || v < 1.0 || v > f64::from(u16::MAX) {
        return Err(FormplateError::validation(format!(
            "text line extent {v} does not fit a pixmap"
        )));
    }
    Ok(v as u16)
}
