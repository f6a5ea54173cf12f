use crate::assets::source::AssetSource;
use crate::compile::plan::DocumentKind;
use crate::compose::compositor::Compositor;
use crate::compose::settings::PreviewSettings;
use crate::foundation::error::FormplateResult;
use crate::form::snapshot::FormSnapshot;
use crate::preview::flip::{FlipEffect, FlipMachine, FlipPhase, TimerToken};
use crate::render::target::RenderTarget;
use crate::text::layout::TextBackend;

/// Handle of one preview render, issued by [`LivePreview::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewTicket {
    generation: u64,
    kind: DocumentKind,
}

impl PreviewTicket {
    /// Family the render was started for.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

/// Result of handing a finished render to [`LivePreview::commit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The frame is now displayed.
    Displayed,
    /// The frame is held until the flip-out swaps the base.
    Pending,
    /// A newer render was started; the result was dropped.
    Stale,
    /// The render failed; the displayed frame is unchanged.
    Failed,
}

/// Re-renders a preview as the form changes and flips between document families.
///
/// Every render is a full redraw from the base template. Renders are identified by tickets and
/// only the most recently issued ticket may replace the displayed frame.
#[derive(Debug)]
pub struct LivePreview {
    flip: FlipMachine,
    generation: u64,
    displayed: Option<RenderTarget>,
    pending: Option<RenderTarget>,
}

impl LivePreview {
    /// Preview with nothing displayed yet.
    pub fn new(settings: PreviewSettings) -> FormplateResult<Self> {
        settings.validate()?;
        Ok(Self {
            flip: FlipMachine::new(settings),
            generation: 0,
            displayed: None,
            pending: None,
        })
    }

    /// Frame currently shown.
    pub fn displayed(&self) -> Option<&RenderTarget> {
        self.displayed.as_ref()
    }

    /// Current flip phase.
    pub fn phase(&self) -> FlipPhase {
        self.flip.phase()
    }

    /// Start a render of `kind`, superseding every earlier ticket.
    ///
    /// The returned effect tells the host whether to start a flip and which timer to schedule.
    pub fn begin(&mut self, kind: DocumentKind) -> (PreviewTicket, FlipEffect) {
        self.generation += 1;
        self.pending = None;
        let effect = self.flip.on_family(kind);
        (
            PreviewTicket {
                generation: self.generation,
                kind,
            },
            effect,
        )
    }

    /// Hand over the result of the render started with `ticket`.
    pub fn commit(
        &mut self,
        ticket: PreviewTicket,
        result: FormplateResult<RenderTarget>,
    ) -> CommitOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "dropping superseded preview frame"
            );
            return CommitOutcome::Stale;
        }
        match result {
            Err(err) => {
                tracing::warn!(kind = ticket.kind.name(), error = %err, "preview render failed");
                CommitOutcome::Failed
            }
            Ok(frame) if self.flip.phase() == FlipPhase::FlippingOut => {
                self.pending = Some(frame);
                CommitOutcome::Pending
            }
            Ok(frame) => {
                self.displayed = Some(frame);
                CommitOutcome::Displayed
            }
        }
    }

    /// Report an elapsed flip timer. On the swap the held-back frame is displayed.
    pub fn on_timer(&mut self, token: TimerToken) -> FlipEffect {
        let effect = self.flip.on_timer(token);
        if matches!(effect, FlipEffect::SwapBase(_))
            && let Some(frame) = self.pending.take()
        {
            self.displayed = Some(frame);
        }
        effect
    }

    /// Begin, render with `compositor` and commit in one step.
    pub async fn update<S: AssetSource, T: TextBackend>(
        &mut self,
        compositor: &mut Compositor<S, T>,
        kind: DocumentKind,
        snapshot: &FormSnapshot,
    ) -> (FlipEffect, CommitOutcome) {
        let (ticket, effect) = self.begin(kind);
        let result = compositor.render(kind, snapshot).await;
        (effect, self.commit(ticket, result))
    }

    /// Sleep through the timers that follow `effect` until the flip settles or is superseded.
    pub async fn run_flip(&mut self, mut effect: FlipEffect) -> FlipEffect {
        loop {
            match effect {
                FlipEffect::StartFlipOut(req) | FlipEffect::SwapBase(req) => {
                    tokio::time::sleep(req.after).await;
                    effect = self.on_timer(req.token);
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/controller.rs"]
mod tests;
