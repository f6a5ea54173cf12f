use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::FormplateResult;
use crate::render::target::RenderTarget;

/// Measures and rasterizes single lines of text.
///
/// Layout decisions (wrapping, centering, line pitch) live in [`layout_text`]; a backend only
/// answers "how wide is this line" and "draw this line with its top-left corner here".
pub trait TextBackend {
    /// Advance width of `text` at `font_size` pixels.
    fn measure(&mut self, text: &str, font_size: f32) -> FormplateResult<f32>;

    /// Draw one line of `text` with the top of its em box at `top_left.y`.
    fn fill_line(
        &mut self,
        target: &mut RenderTarget,
        text: &str,
        top_left: Point,
        font_size: f32,
        color: Rgba8,
    ) -> FormplateResult<()>;
}

impl<B: TextBackend + ?Sized> TextBackend for Box<B> {
    fn measure(&mut self, text: &str, font_size: f32) -> FormplateResult<f32> {
        (**self).measure(text, font_size)
    }

    fn fill_line(
        &mut self,
        target: &mut RenderTarget,
        text: &str,
        top_left: Point,
        font_size: f32,
        color: Rgba8,
    ) -> FormplateResult<()> {
        (**self).fill_line(target, text, top_left, font_size, color)
    }
}

/// Font size, color and line pitch shared by every field of a document family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Fill color.
    pub color: Rgba8,
    /// Line pitch as a multiple of the font size.
    pub line_height: f32,
}

/// A line positioned by [`layout_text`].
#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutLine {
    /// Line text.
    pub text: String,
    /// Top-left corner of the line.
    pub top_left: Point,
    /// Measured width.
    pub width: f64,
}

/// Greedy word wrap that never splits a word.
///
/// Words are separated by single spaces, so runs of spaces inside the text are kept; only leading
/// and trailing spaces are dropped. Words are appended to the current line while the measured
/// `line + " " + word` fits in `max_width`; otherwise the line is committed and the word starts
/// the next one. A word wider than `max_width` gets a line of its own.
pub fn wrap_words<B: TextBackend + ?Sized>(
    backend: &mut B,
    text: &str,
    max_width: f64,
    font_size: f32,
) -> FormplateResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.trim_matches(' ').split(' ') {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if f64::from(backend.measure(&candidate, font_size)?) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    Ok(lines)
}

/// Position `text` as a block centered on `center`.
///
/// Without `max_width` the text is one line whose height is the font size. With `max_width`
/// the text is wrapped by [`wrap_words`], the block is `lines * font_size * line_height` tall,
/// and each line is centered horizontally on its own measured width.
pub fn layout_text<B: TextBackend + ?Sized>(
    backend: &mut B,
    text: &str,
    center: Point,
    max_width: Option<f64>,
    style: TextStyle,
) -> FormplateResult<Vec<LaidOutLine>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let font_size = f64::from(style.font_size);

    let Some(max_width) = max_width else {
        let width = f64::from(backend.measure(text, style.font_size)?);
        return Ok(vec![LaidOutLine {
            text: text.to_string(),
            top_left: Point::new(center.x - width / 2.0, center.y - font_size / 2.0),
            width,
        }]);
    };

    let lines = wrap_words(backend, text, max_width, style.font_size)?;
    let pitch = font_size * f64::from(style.line_height);
    let block_top = center.y - (lines.len() as f64 * pitch) / 2.0;

    let mut out = Vec::with_capacity(lines.len());
    for (i, line) in lines.into_iter().enumerate() {
        let width = f64::from(backend.measure(&line, style.font_size)?);
        out.push(LaidOutLine {
            top_left: Point::new(center.x - width / 2.0, block_top + i as f64 * pitch),
            text: line,
            width,
        });
    }
    Ok(out)
}

/// Lay out and draw `text` centered on `center`. Empty text draws nothing.
pub fn draw_text<B: TextBackend + ?Sized>(
    target: &mut RenderTarget,
    backend: &mut B,
    text: &str,
    center: Point,
    max_width: Option<f64>,
    style: TextStyle,
) -> FormplateResult<()> {
    for line in layout_text(backend, text, center, max_width, style)? {
        backend.fill_line(target, &line.text, line.top_left, style.font_size, style.color)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
