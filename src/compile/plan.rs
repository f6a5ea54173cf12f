use crate::assets::source::TemplateAsset;
use crate::compose::settings::CompositorSettings;
use crate::foundation::core::{Canvas, Point, Size};
use crate::foundation::error::{FormplateError, FormplateResult};
use crate::form::questions::{Questionnaire, choice_flags};
use crate::form::snapshot::{FormSnapshot, NationDirectory, format_amount, format_travel_date};
use crate::positions::registry::{
    FieldId, PIC_FIELDS, PIC_TABLE, PositionTable, SAF_CHECKBOX_SLOTS, SAF_TABLE, SafVariant,
    absolute,
};
use crate::text::layout::TextStyle;

/// Document family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Partner information card.
    Pic,
    /// Support accountability form.
    Saf,
}

impl DocumentKind {
    /// Family shown for questionnaire `step` (1-2 PIC, 3-4 SAF); `None` outside the questionnaire.
    pub fn for_step(step: u32) -> Option<Self> {
        match step {
            1 | 2 => Some(Self::Pic),
            3 | 4 => Some(Self::Saf),
            _ => None,
        }
    }

    /// Lowercase name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pic => "pic",
            Self::Saf => "saf",
        }
    }

    /// Base template for this family and `snapshot`'s member flag.
    pub fn base_for(self, snapshot: &FormSnapshot) -> TemplateAsset {
        match self {
            Self::Pic => TemplateAsset::Pic,
            Self::Saf => TemplateAsset::saf(SafVariant::from_member_flag(snapshot.member)),
        }
    }
}

/// One overlay draw, positioned in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Text centered on `center`, wrapped to `max_width` when set.
    Text {
        /// Source field.
        field: FieldId,
        /// Formatted, non-empty text.
        text: String,
        /// Block center.
        center: Point,
        /// Wrap width.
        max_width: Option<f64>,
    },
    /// Check mark centered on `center`.
    Checkbox {
        /// Checkbox field.
        field: FieldId,
        /// Icon center, variant offset included.
        center: Point,
    },
    /// Snapshot signature fitted into the area centered on `center`.
    Signature {
        /// Area center.
        center: Point,
        /// Area size.
        size: Size,
    },
}

/// Everything needed to draw one document onto its base template, in draw order.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentPlan {
    /// Document family.
    pub kind: DocumentKind,
    /// Base template the ops are positioned against.
    pub base: TemplateAsset,
    /// Base template dimensions.
    pub canvas: Canvas,
    /// Text style of every text op.
    pub style: TextStyle,
    /// Overlay draws; only fields with something to show are present.
    pub ops: Vec<DrawOp>,
}

impl DocumentPlan {
    /// Whether any op stamps the check icon.
    pub fn needs_check_icon(&self) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, DrawOp::Checkbox { .. }))
    }

    /// Whether any op places the signature.
    pub fn has_signature(&self) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, DrawOp::Signature { .. }))
    }
}

/// Lookups a plan is compiled against.
#[derive(Clone, Copy, Debug)]
pub struct PlanContext<'a> {
    /// Drawing constants.
    pub settings: &'a CompositorSettings,
    /// Nation code to display name.
    pub nations: &'a NationDirectory,
    /// Questions whose answers map onto SAF checkboxes.
    pub questionnaire: &'a Questionnaire,
}

/// Compile the plan of `kind` for a base template of size `canvas`.
pub fn compile(
    kind: DocumentKind,
    snapshot: &FormSnapshot,
    canvas: Canvas,
    cx: PlanContext<'_>,
) -> FormplateResult<DocumentPlan> {
    match kind {
        DocumentKind::Pic => compile_pic(snapshot, canvas, cx),
        DocumentKind::Saf => compile_saf(snapshot, canvas, cx),
    }
}

/// PIC: the nine partner and recipient fields, each skipped when empty.
pub fn compile_pic(
    snapshot: &FormSnapshot,
    canvas: Canvas,
    cx: PlanContext<'_>,
) -> FormplateResult<DocumentPlan> {
    let max_width = Some(cx.settings.max_width_fraction * canvas.size().width);
    let mut ops = Vec::with_capacity(PIC_FIELDS.len());
    for field in PIC_FIELDS {
        let text = pic_text(field, snapshot, cx.nations)?;
        push_text(&mut ops, field, text, &PIC_TABLE, canvas, max_width)?;
    }

    Ok(DocumentPlan {
        kind: DocumentKind::Pic,
        base: TemplateAsset::Pic,
        canvas,
        style: style(cx.settings, cx.settings.pic_font_size),
        ops,
    })
}

/// SAF: checked boxes per question, then the signature, then the name under it.
///
/// The variant offset moves checkboxes only.
pub fn compile_saf(
    snapshot: &FormSnapshot,
    canvas: Canvas,
    cx: PlanContext<'_>,
) -> FormplateResult<DocumentPlan> {
    let variant = SafVariant::from_member_flag(snapshot.member);
    let offset = variant.checkbox_offset_px(canvas);
    let mut ops = Vec::new();

    for (qi, slots) in SAF_CHECKBOX_SLOTS.iter().enumerate() {
        let question = cx.questionnaire.get(qi).ok_or_else(|| {
            FormplateError::configuration(format!("questionnaire has no question {qi}"))
        })?;
        let flags = choice_flags(snapshot.answer(qi), &question.choices);
        for (field, checked) in slots.iter().zip(flags) {
            if !checked {
                continue;
            }
            let placement = absolute(SAF_TABLE.lookup(*field)?, canvas);
            ops.push(DrawOp::Checkbox {
                field: *field,
                center: placement.center + offset,
            });
        }
    }

    if snapshot.signature.is_some() {
        let placement = absolute(SAF_TABLE.lookup(FieldId::Signature)?, canvas);
        let size = placement.size.ok_or_else(|| {
            FormplateError::configuration("signature position must define an area")
        })?;
        ops.push(DrawOp::Signature {
            center: placement.center,
            size,
        });
    }

    let max_width = Some(cx.settings.max_width_fraction * canvas.size().width);
    push_text(
        &mut ops,
        FieldId::PartnerNameUnderSignature,
        snapshot.partner_name.clone(),
        &SAF_TABLE,
        canvas,
        max_width,
    )?;

    Ok(DocumentPlan {
        kind: DocumentKind::Saf,
        base: TemplateAsset::saf(variant),
        canvas,
        style: style(cx.settings, cx.settings.saf_font_size),
        ops,
    })
}

fn style(settings: &CompositorSettings, font_size: f32) -> TextStyle {
    TextStyle {
        font_size,
        color: settings.text_color,
        line_height: settings.line_height,
    }
}

fn pic_text(
    field: FieldId,
    snapshot: &FormSnapshot,
    nations: &NationDirectory,
) -> FormplateResult<String> {
    Ok(match field {
        FieldId::PartnerName => snapshot.partner_name.clone(),
        FieldId::Email => snapshot.email.clone(),
        FieldId::Mobile => snapshot.mobile.clone(),
        FieldId::LocalChurch => snapshot.local_church.clone(),
        FieldId::MissionerName => snapshot.missioner_name.clone(),
        FieldId::Amount => format_amount(&snapshot.amount, snapshot.denomination),
        FieldId::Nation if snapshot.nation.is_empty() => String::new(),
        FieldId::Nation => nations.display_name(&snapshot.nation),
        FieldId::TravelDate => format_travel_date(snapshot.travel_date),
        FieldId::SendingChurch => snapshot.sending_church.clone(),
        other => {
            return Err(FormplateError::configuration(format!(
                "field '{}' is not a PIC field",
                other.name()
            )));
        }
    })
}

fn push_text(
    ops: &mut Vec<DrawOp>,
    field: FieldId,
    text: String,
    table: &PositionTable,
    canvas: Canvas,
    max_width: Option<f64>,
) -> FormplateResult<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let placement = absolute(table.lookup(field)?, canvas);
    ops.push(DrawOp::Text {
        field,
        text,
        center: placement.center,
        max_width,
    });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
