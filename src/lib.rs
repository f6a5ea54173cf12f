//! Formplate stamps questionnaire answers onto fixed raster form templates.
//!
//! Two documents are produced from one [`FormSnapshot`]: the partner information card (PIC) and
//! the support accountability form (SAF). Both are PNG images built from a template image plus
//! text, check marks and an optional signature drawn at fixed normalized positions.
//!
//! # Pipeline overview
//!
//! 1. **Load**: the base template is read through an [`AssetSource`] and decoded.
//! 2. **Compile**: `FormSnapshot + template size -> DocumentPlan` (which fields show, where, in
//!    what order). The final export and the live preview share this step.
//! 3. **Draw**: the plan is executed onto an owned [`RenderTarget`] seeded with an exact copy of
//!    the template.
//! 4. **Encode**: the target is written as a lossless PNG.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical snapshots and assets produce byte-identical PNGs.
//! - **All or nothing**: every asset a document needs is loaded before its first draw, and
//!   [`Compositor::compose_documents`] yields both documents or an error.
//! - **No persisted state**: nothing is written anywhere; callers own the exported bytes.
//!
//! The [`LivePreview`] controller re-renders on every form change, drops superseded renders and
//! runs the flip transition between document families through the pure [`FlipMachine`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod compile;
mod compose;
mod export;
mod form;
mod foundation;
mod positions;
mod preview;
mod render;
mod text;

pub use assets::decode::decode_template;
pub use assets::source::{AssetSource, FsAssetSource, MemoryAssetSource, TemplateAsset};
pub use compile::plan::{
    DocumentKind, DocumentPlan, DrawOp, PlanContext, compile, compile_pic, compile_saf,
};
pub use compose::compositor::{Compositor, draw_plan};
pub use compose::settings::{
    AssetPaths, CompositorSettings, MAX_DILATION_RADIUS, PreviewSettings,
};
pub use export::{ExportBundle, PIC_FILENAME, SAF_FILENAME};
pub use form::questions::{Question, Questionnaire, choice_flags};
pub use form::snapshot::{
    Denomination, FormSnapshot, Nation, NationDirectory, SignatureSource, format_amount,
    format_travel_date,
};
pub use foundation::core::{Canvas, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{FormplateError, FormplateResult};
pub use positions::registry::{
    FieldId, PIC_FIELDS, PIC_TABLE, Placement, PositionSpec, PositionTable, SAF_CHECKBOX_SLOTS,
    SAF_TABLE, SafVariant, absolute, validate_tables,
};
pub use preview::controller::{CommitOutcome, LivePreview, PreviewTicket};
pub use preview::flip::{FlipEffect, FlipMachine, FlipPhase, TimerRequest, TimerToken};
pub use render::checkbox::{CheckIcon, draw_checkbox};
pub use render::signature::{
    AspectFit, SignatureBuffer, decode_signature, dilate, fit_aspect, place_signature,
    process_signature,
};
pub use render::target::RenderTarget;
pub use text::fixed::FixedAdvanceText;
pub use text::layout::{LaidOutLine, TextBackend, TextStyle, draw_text, layout_text, wrap_words};
pub use text::parley_text::ParleyText;
