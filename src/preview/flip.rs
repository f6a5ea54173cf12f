use std::time::Duration;

use crate::compile::plan::DocumentKind;
use crate::compose::settings::PreviewSettings;

/// Phase of the flip transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlipPhase {
    /// No transition running.
    Idle,
    /// Old document turning away; the base swaps when the flip-out delay elapses.
    FlippingOut,
    /// New document turning in.
    FlippingIn,
}

/// Identifies one scheduled timer. Timers of superseded flips carry stale tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// A timer the host must schedule, reporting `token` back through
/// [`FlipMachine::on_timer`] once `after` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerRequest {
    /// Token to report back.
    pub token: TimerToken,
    /// Delay from now.
    pub after: Duration,
}

/// What the host should do in response to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipEffect {
    /// Same family: clear and redraw the preview without a transition.
    RenderInPlace,
    /// Family changed: start the flip-out animation and schedule the swap timer.
    StartFlipOut(TimerRequest),
    /// Swap the displayed base now, start the flip-in animation and schedule its end.
    SwapBase(TimerRequest),
    /// Transition finished.
    Settle,
    /// Stale or unexpected timer; nothing to do.
    Ignored,
}

/// Display-independent flip transition state machine.
///
/// `Idle -> FlippingOut` on a family change, `FlippingOut -> FlippingIn` when the flip-out timer
/// fires, `FlippingIn -> Idle` when the flip-in timer fires. A family change during a flip
/// restarts the flip-out toward the newest family and invalidates the pending timer.
#[derive(Clone, Debug)]
pub struct FlipMachine {
    settings: PreviewSettings,
    phase: FlipPhase,
    family: Option<DocumentKind>,
    epoch: u64,
}

impl FlipMachine {
    /// Idle machine that has not seen a family yet.
    pub fn new(settings: PreviewSettings) -> Self {
        Self {
            settings,
            phase: FlipPhase::Idle,
            family: None,
            epoch: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FlipPhase {
        self.phase
    }

    /// Family being shown, or flipped toward.
    pub fn family(&self) -> Option<DocumentKind> {
        self.family
    }

    /// Report the family of the latest snapshot.
    ///
    /// The first family seen renders in place; there is nothing to flip away from.
    pub fn on_family(&mut self, family: DocumentKind) -> FlipEffect {
        match self.family {
            None => {
                self.family = Some(family);
                FlipEffect::RenderInPlace
            }
            Some(current) if current == family => FlipEffect::RenderInPlace,
            Some(_) => {
                self.family = Some(family);
                self.phase = FlipPhase::FlippingOut;
                FlipEffect::StartFlipOut(self.schedule(self.settings.flip_out()))
            }
        }
    }

    /// Report an elapsed timer.
    pub fn on_timer(&mut self, token: TimerToken) -> FlipEffect {
        if token.0 != self.epoch {
            return FlipEffect::Ignored;
        }
        match self.phase {
            FlipPhase::FlippingOut => {
                self.phase = FlipPhase::FlippingIn;
                FlipEffect::SwapBase(self.schedule(self.settings.flip_in()))
            }
            FlipPhase::FlippingIn => {
                self.phase = FlipPhase::Idle;
                FlipEffect::Settle
            }
            FlipPhase::Idle => FlipEffect::Ignored,
        }
    }

    fn schedule(&mut self, after: Duration) -> TimerRequest {
        self.epoch += 1;
        TimerRequest {
            token: TimerToken(self.epoch),
            after,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/flip.rs"]
mod tests;
