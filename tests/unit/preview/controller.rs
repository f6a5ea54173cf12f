use std::io::Cursor;

use image::{Rgba, RgbaImage};

use super::*;
use crate::assets::source::MemoryAssetSource;
use crate::foundation::error::FormplateError;
use crate::text::fixed::FixedAdvanceText;

fn frame(shade: u8) -> RenderTarget {
    RenderTarget::from_base(&RgbaImage::from_pixel(2, 2, Rgba([shade, shade, shade, 255])))
}

fn shade(preview: &LivePreview) -> Option<u8> {
    preview.displayed().and_then(|t| t.pixel(0, 0)).map(|p| p[0])
}

fn token(effect: FlipEffect) -> TimerToken {
    match effect {
        FlipEffect::StartFlipOut(r) | FlipEffect::SwapBase(r) => r.token,
        other => panic!("expected a timer request, got {other:?}"),
    }
}

#[test]
fn same_family_updates_display_in_place() {
    let mut p = LivePreview::new(PreviewSettings::default()).unwrap();
    let (t1, e1) = p.begin(DocumentKind::Pic);
    assert_eq!(e1, FlipEffect::RenderInPlace);
    assert_eq!(p.commit(t1, Ok(frame(10))), CommitOutcome::Displayed);

    let (t2, e2) = p.begin(DocumentKind::Pic);
    assert_eq!(e2, FlipEffect::RenderInPlace);
    assert_eq!(p.commit(t2, Ok(frame(20))), CommitOutcome::Displayed);
    assert_eq!(shade(&p), Some(20));
}

#[test]
fn superseded_renders_are_dropped() {
    let mut p = LivePreview::new(PreviewSettings::default()).unwrap();
    let (older, _) = p.begin(DocumentKind::Pic);
    let (newer, _) = p.begin(DocumentKind::Pic);

    assert_eq!(p.commit(newer, Ok(frame(2))), CommitOutcome::Displayed);
    assert_eq!(p.commit(older, Ok(frame(1))), CommitOutcome::Stale);
    assert_eq!(shade(&p), Some(2));
}

#[test]
fn failed_render_keeps_the_previous_frame() {
    let mut p = LivePreview::new(PreviewSettings::default()).unwrap();
    let (t1, _) = p.begin(DocumentKind::Saf);
    p.commit(t1, Ok(frame(7)));

    let (t2, _) = p.begin(DocumentKind::Saf);
    let outcome = p.commit(t2, Err(FormplateError::asset_load("offline")));
    assert_eq!(outcome, CommitOutcome::Failed);
    assert_eq!(shade(&p), Some(7));
}

#[test]
fn frame_rendered_during_flip_out_appears_at_the_swap() {
    let mut p = LivePreview::new(PreviewSettings::default()).unwrap();
    let (t1, _) = p.begin(DocumentKind::Pic);
    p.commit(t1, Ok(frame(1)));

    let (t2, effect) = p.begin(DocumentKind::Saf);
    let out = token(effect);
    assert_eq!(p.phase(), FlipPhase::FlippingOut);
    assert_eq!(p.commit(t2, Ok(frame(2))), CommitOutcome::Pending);
    assert_eq!(shade(&p), Some(1));

    let swap = p.on_timer(out);
    assert!(matches!(swap, FlipEffect::SwapBase(_)));
    assert_eq!(shade(&p), Some(2));
    assert_eq!(p.phase(), FlipPhase::FlippingIn);

    assert_eq!(p.on_timer(token(swap)), FlipEffect::Settle);
    assert_eq!(p.phase(), FlipPhase::Idle);
}

#[test]
fn frame_arriving_after_the_swap_displays_immediately() {
    let mut p = LivePreview::new(PreviewSettings::default()).unwrap();
    let (t1, _) = p.begin(DocumentKind::Pic);
    p.commit(t1, Ok(frame(1)));

    let (t2, effect) = p.begin(DocumentKind::Saf);
    p.on_timer(token(effect));
    assert_eq!(shade(&p), Some(1));
    assert_eq!(p.commit(t2, Ok(frame(3))), CommitOutcome::Displayed);
    assert_eq!(shade(&p), Some(3));
}

#[test]
fn new_render_discards_a_held_back_frame() {
    let mut p = LivePreview::new(PreviewSettings::default()).unwrap();
    let (t1, _) = p.begin(DocumentKind::Pic);
    p.commit(t1, Ok(frame(1)));

    let (t2, effect) = p.begin(DocumentKind::Saf);
    p.commit(t2, Ok(frame(2)));
    let (_t3, _) = p.begin(DocumentKind::Saf);

    p.on_timer(token(effect));
    assert_eq!(shade(&p), Some(1));
}

#[test]
fn invalid_settings_are_rejected() {
    let settings = PreviewSettings {
        flip_out_ms: 0,
        flip_in_ms: 500,
    };
    assert!(LivePreview::new(settings).is_err());
}

fn png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[tokio::test]
async fn update_and_run_flip_drive_a_family_change() {
    let source = MemoryAssetSource::new()
        .with("PIC.png", png(&RgbaImage::from_pixel(4, 4, Rgba([50, 50, 50, 255]))))
        .unwrap()
        .with("SAF.png", png(&RgbaImage::from_pixel(4, 4, Rgba([90, 90, 90, 255]))))
        .unwrap();
    let mut compositor = Compositor::new(source, FixedAdvanceText::default()).unwrap();
    let mut p = LivePreview::new(PreviewSettings {
        flip_out_ms: 1,
        flip_in_ms: 1,
    })
    .unwrap();

    let snap = FormSnapshot::default();
    let (effect, outcome) = p.update(&mut compositor, DocumentKind::Pic, &snap).await;
    assert_eq!(effect, FlipEffect::RenderInPlace);
    assert_eq!(outcome, CommitOutcome::Displayed);
    assert_eq!(shade(&p), Some(50));

    let (effect, outcome) = p.update(&mut compositor, DocumentKind::Saf, &snap).await;
    assert!(matches!(effect, FlipEffect::StartFlipOut(_)));
    assert_eq!(outcome, CommitOutcome::Pending);
    assert_eq!(shade(&p), Some(50));

    assert_eq!(p.run_flip(effect).await, FlipEffect::Settle);
    assert_eq!(shade(&p), Some(90));
    assert_eq!(p.phase(), FlipPhase::Idle);
}
