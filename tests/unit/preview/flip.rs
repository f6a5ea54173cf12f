use super::*;

fn machine() -> FlipMachine {
    FlipMachine::new(PreviewSettings::default())
}

fn request(effect: FlipEffect) -> TimerRequest {
    match effect {
        FlipEffect::StartFlipOut(r) | FlipEffect::SwapBase(r) => r,
        other => panic!("expected a timer request, got {other:?}"),
    }
}

#[test]
fn first_family_renders_in_place() {
    let mut m = machine();
    assert_eq!(m.on_family(DocumentKind::Pic), FlipEffect::RenderInPlace);
    assert_eq!(m.phase(), FlipPhase::Idle);
    assert_eq!(m.family(), Some(DocumentKind::Pic));
}

#[test]
fn same_family_never_flips() {
    let mut m = machine();
    m.on_family(DocumentKind::Saf);
    for _ in 0..3 {
        assert_eq!(m.on_family(DocumentKind::Saf), FlipEffect::RenderInPlace);
        assert_eq!(m.phase(), FlipPhase::Idle);
    }
}

#[test]
fn family_change_runs_the_full_flip() {
    let mut m = machine();
    m.on_family(DocumentKind::Pic);

    let out = request(m.on_family(DocumentKind::Saf));
    assert_eq!(out.after, Duration::from_millis(200));
    assert_eq!(m.phase(), FlipPhase::FlippingOut);

    let inn = request(m.on_timer(out.token));
    assert_eq!(inn.after, Duration::from_millis(500));
    assert_eq!(m.phase(), FlipPhase::FlippingIn);

    assert_eq!(m.on_timer(inn.token), FlipEffect::Settle);
    assert_eq!(m.phase(), FlipPhase::Idle);
}

#[test]
fn stale_and_repeated_timers_are_ignored() {
    let mut m = machine();
    m.on_family(DocumentKind::Pic);
    let out = request(m.on_family(DocumentKind::Saf));
    let inn = request(m.on_timer(out.token));

    assert_eq!(m.on_timer(out.token), FlipEffect::Ignored);
    assert_eq!(m.phase(), FlipPhase::FlippingIn);

    assert_eq!(m.on_timer(inn.token), FlipEffect::Settle);
    assert_eq!(m.on_timer(inn.token), FlipEffect::Ignored);
}

#[test]
fn family_change_mid_flip_restarts_flip_out() {
    let mut m = machine();
    m.on_family(DocumentKind::Pic);
    let first = request(m.on_family(DocumentKind::Saf));
    let _ = request(m.on_timer(first.token));
    assert_eq!(m.phase(), FlipPhase::FlippingIn);

    let second = request(m.on_family(DocumentKind::Pic));
    assert_eq!(m.phase(), FlipPhase::FlippingOut);
    assert_eq!(m.family(), Some(DocumentKind::Pic));
    assert_ne!(first.token, second.token);

    assert!(matches!(m.on_timer(second.token), FlipEffect::SwapBase(_)));
}

#[test]
fn timer_while_idle_is_ignored() {
    let mut m = machine();
    m.on_family(DocumentKind::Pic);
    assert_eq!(m.on_timer(TimerToken(0)), FlipEffect::Ignored);
}
