use image::{Rgba, RgbaImage};

use super::*;
use crate::text::fixed::FixedAdvanceText;

// 5 px per character at font size 10.
fn mono() -> FixedAdvanceText {
    FixedAdvanceText::new(0.5).unwrap()
}

fn style() -> TextStyle {
    TextStyle {
        font_size: 10.0,
        color: Rgba8::rgb(0, 0, 0),
        line_height: 1.2,
    }
}

#[test]
fn wrap_fills_lines_greedily() {
    let lines = wrap_words(&mut mono(), "aaa bb cccc d", 35.0, 10.0).unwrap();
    // "aaa bb" = 6 chars = 30px fits; "aaa bb cccc" = 55px does not.
    assert_eq!(lines, vec!["aaa bb", "cccc d"]);
}

#[test]
fn wrap_never_splits_overlong_words() {
    let lines = wrap_words(&mut mono(), "tiny enormousword x", 20.0, 10.0).unwrap();
    assert_eq!(lines, vec!["tiny", "enormousword", "x"]);
}

#[test]
fn wrapped_lines_reconstruct_the_word_sequence() {
    let text = "the  quick brown   fox jumps over the lazy dog";
    let words: Vec<&str> = text.split_whitespace().collect();
    for max_width in [1.0, 20.0, 45.0, 80.0, 1000.0] {
        let lines = wrap_words(&mut mono(), text, max_width, 10.0).unwrap();
        assert!(lines.iter().all(|l| !l.is_empty()));
        let rejoined: Vec<&str> = lines
            .iter()
            .flat_map(|l| l.split(' '))
            .filter(|w| !w.is_empty())
            .collect();
        assert_eq!(rejoined, words, "max_width={max_width}");
    }
}

#[test]
fn wrap_keeps_inner_spacing_and_drops_outer_spaces() {
    let lines = wrap_words(&mut mono(), "  Unit  4B, Tower\tOne ", 1000.0, 10.0).unwrap();
    assert_eq!(lines, vec!["Unit  4B, Tower\tOne"]);
}

#[test]
fn wrap_of_blank_text_is_empty() {
    assert!(wrap_words(&mut mono(), "", 10.0, 10.0).unwrap().is_empty());
    assert!(wrap_words(&mut mono(), "   ", 10.0, 10.0).unwrap().is_empty());
}

#[test]
fn single_line_is_centered_on_point() {
    let lines = layout_text(&mut mono(), "abcd", Point::new(100.0, 50.0), None, style()).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].width, 20.0);
    assert_eq!(lines[0].top_left, Point::new(90.0, 45.0));
}

#[test]
fn wrapped_block_is_centered_and_lines_center_independently() {
    let lines = layout_text(
        &mut mono(),
        "aaaa bb",
        Point::new(100.0, 50.0),
        Some(30.0),
        style(),
    )
    .unwrap();
    assert_eq!(lines.len(), 2);

    // Block height = 2 * 10 * 1.2 = 24, so the first line starts 12 above center.
    assert!((lines[0].top_left.y - 38.0).abs() < 1e-4);
    assert!((lines[1].top_left.y - 50.0).abs() < 1e-4);

    assert_eq!(lines[0].top_left.x, 90.0);
    assert_eq!(lines[1].top_left.x, 95.0);
}

#[test]
fn empty_text_draws_nothing() {
    let base = RgbaImage::from_pixel(50, 50, Rgba([255, 255, 255, 255]));
    let mut target = RenderTarget::from_base(&base);
    draw_text(&mut target, &mut mono(), "", Point::new(25.0, 25.0), Some(40.0), style()).unwrap();
    assert_eq!(target.as_image(), &base);
}

#[test]
fn draw_text_fills_glyph_boxes_around_center() {
    let base = RgbaImage::from_pixel(60, 40, Rgba([255, 255, 255, 255]));
    let mut target = RenderTarget::from_base(&base);
    draw_text(&mut target, &mut mono(), "ab", Point::new(30.0, 20.0), None, style()).unwrap();

    // "ab" is 10px wide, 10px tall: x 25..35, y 15..25.
    assert_eq!(target.pixel(25, 15), Some([0, 0, 0, 255]));
    assert_eq!(target.pixel(34, 24), Some([0, 0, 0, 255]));
    assert_eq!(target.pixel(24, 20), Some([255, 255, 255, 255]));
    assert_eq!(target.pixel(30, 25), Some([255, 255, 255, 255]));
}
