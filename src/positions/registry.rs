use crate::foundation::core::{Canvas, Point, Size, Vec2};
use crate::foundation::error::{FormplateError, FormplateResult};

/// Identifier of a field stamped onto a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    /// Partner's full name (PIC, partner section).
    PartnerName,
    /// Partner's email address (PIC, partner section).
    Email,
    /// Partner's mobile number (PIC, partner section).
    Mobile,
    /// Partner's local church (PIC, partner section).
    LocalChurch,
    /// Missioner's name (PIC, recipient section).
    MissionerName,
    /// Formatted support amount (PIC, recipient section).
    Amount,
    /// Destination nation display name (PIC, recipient section).
    Nation,
    /// Formatted travel date (PIC, recipient section).
    TravelDate,
    /// Missioner's sending church (PIC, recipient section).
    SendingChurch,
    /// "Unable to go": redirect to the team fund (SAF checkbox).
    UnableToGoTeamFund,
    /// "Unable to go": redirect to the general fund (SAF checkbox).
    UnableToGoGeneralFund,
    /// "Rerouted": retain support (SAF checkbox).
    ReroutedRetain,
    /// "Rerouted": redirect to the general fund (SAF checkbox).
    ReroutedGeneralFund,
    /// "Canceled": redirect to the general fund (SAF checkbox).
    CanceledGeneralFund,
    /// Signature area (SAF).
    Signature,
    /// Partner name printed under the signature (SAF).
    PartnerNameUnderSignature,
}

impl FieldId {
    /// Stable snake_case name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::PartnerName => "partner_name",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::LocalChurch => "local_church",
            Self::MissionerName => "missioner_name",
            Self::Amount => "amount",
            Self::Nation => "nation",
            Self::TravelDate => "travel_date",
            Self::SendingChurch => "sending_church",
            Self::UnableToGoTeamFund => "unable_to_go_team_fund",
            Self::UnableToGoGeneralFund => "unable_to_go_general_fund",
            Self::ReroutedRetain => "rerouted_retain",
            Self::ReroutedGeneralFund => "rerouted_general_fund",
            Self::CanceledGeneralFund => "canceled_general_fund",
            Self::Signature => "signature",
            Self::PartnerNameUnderSignature => "partner_name_under_signature",
        }
    }

    /// Whether the field is a checkbox (the only fields the SAF variant offset applies to).
    pub fn is_checkbox(self) -> bool {
        matches!(
            self,
            Self::UnableToGoTeamFund
                | Self::UnableToGoGeneralFund
                | Self::ReroutedRetain
                | Self::ReroutedGeneralFund
                | Self::CanceledGeneralFund
        )
    }
}

/// Normalized (0..1) center of a field, optionally with a normalized area size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionSpec {
    /// Horizontal center as a fraction of template width.
    pub x: f64,
    /// Vertical center as a fraction of template height.
    pub y: f64,
    /// Area size as fractions of template width/height, for area-shaped fields.
    pub area: Option<Size>,
}

impl PositionSpec {
    /// Point-shaped field centered at `(x, y)`.
    pub const fn point(x: f64, y: f64) -> Self {
        Self { x, y, area: None }
    }

    /// Area-shaped field centered at `(x, y)` spanning `width` x `height`.
    pub const fn area(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            area: Some(Size::new(width, height)),
        }
    }
}

/// A [`PositionSpec`] resolved to pixel coordinates on a concrete canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Center in pixels.
    pub center: Point,
    /// Area size in pixels, for area-shaped fields.
    pub size: Option<Size>,
}

/// Scale normalized coordinates by the canvas dimensions.
pub fn absolute(spec: PositionSpec, canvas: Canvas) -> Placement {
    let Size { width, height } = canvas.size();
    Placement {
        center: Point::new(spec.x * width, spec.y * height),
        size: spec
            .area
            .map(|a| Size::new(a.width * width, a.height * height)),
    }
}

/// Named, compiled-in mapping from field to normalized position.
#[derive(Debug)]
pub struct PositionTable {
    name: &'static str,
    entries: &'static [(FieldId, PositionSpec)],
}

impl PositionTable {
    /// Table name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Lookup `field`, returning `None` when the table has no entry.
    pub fn get(&self, field: FieldId) -> Option<PositionSpec> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, spec)| *spec)
    }

    /// Lookup `field`; a missing entry is a [`FormplateError::Configuration`] defect.
    pub fn lookup(&self, field: FieldId) -> FormplateResult<PositionSpec> {
        self.get(field).ok_or_else(|| {
            FormplateError::configuration(format!(
                "position table '{}' has no entry for '{}'",
                self.name,
                field.name()
            ))
        })
    }

    /// Fields present in this table, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }
}

/// Fields drawn on the PIC document, in draw order (partner section, then recipient section).
pub const PIC_FIELDS: [FieldId; 9] = [
    FieldId::PartnerName,
    FieldId::Email,
    FieldId::Mobile,
    FieldId::LocalChurch,
    FieldId::MissionerName,
    FieldId::Amount,
    FieldId::Nation,
    FieldId::TravelDate,
    FieldId::SendingChurch,
];

/// Checkbox fields per SAF question, indexed by question then by choice.
pub const SAF_CHECKBOX_SLOTS: [&[FieldId]; 3] = [
    &[FieldId::UnableToGoTeamFund, FieldId::UnableToGoGeneralFund],
    &[FieldId::ReroutedRetain, FieldId::ReroutedGeneralFund],
    &[FieldId::CanceledGeneralFund],
];

/// PIC document positions.
pub static PIC_TABLE: PositionTable = PositionTable {
    name: "pic",
    entries: &[
        (FieldId::PartnerName, PositionSpec::point(0.215, 0.32)),
        (FieldId::Email, PositionSpec::point(0.215, 0.485)),
        (FieldId::Mobile, PositionSpec::point(0.215, 0.645)),
        (FieldId::LocalChurch, PositionSpec::point(0.215, 0.802)),
        (FieldId::MissionerName, PositionSpec::point(0.7, 0.32)),
        (FieldId::Amount, PositionSpec::point(0.69, 0.485)),
        (FieldId::Nation, PositionSpec::point(0.66, 0.645)),
        (FieldId::TravelDate, PositionSpec::point(0.9, 0.645)),
        (FieldId::SendingChurch, PositionSpec::point(0.696, 0.802)),
    ],
};

/// SAF document positions, authored against the member variant.
///
/// The standard variant shares every entry and shifts only the checkboxes by
/// [`SafVariant::checkbox_offset`].
pub static SAF_TABLE: PositionTable = PositionTable {
    name: "saf",
    entries: &[
        (FieldId::UnableToGoTeamFund, PositionSpec::point(0.04, 0.608)),
        (FieldId::UnableToGoGeneralFund, PositionSpec::point(0.04, 0.667)),
        (FieldId::ReroutedRetain, PositionSpec::point(0.357, 0.57)),
        (FieldId::ReroutedGeneralFund, PositionSpec::point(0.357, 0.63)),
        (FieldId::CanceledGeneralFund, PositionSpec::point(0.695, 0.572)),
        (FieldId::Signature, PositionSpec::area(0.83, 0.81, 0.5, 0.2)),
        (FieldId::PartnerNameUnderSignature, PositionSpec::point(0.817, 0.875)),
    ],
};

const STANDARD_CHECKBOX_OFFSET: Vec2 = Vec2::new(0.0, -0.08);

/// Which SAF base image (and checkbox offset) applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SafVariant {
    /// Standard SAF template; checkboxes sit higher than on the member template.
    Standard,
    /// Member SAF template; the table coordinates apply unshifted.
    Member,
}

impl SafVariant {
    /// Variant selected by the questionnaire's member flag (`Some(true)` selects [`Self::Member`]).
    pub fn from_member_flag(flag: Option<bool>) -> Self {
        if flag == Some(true) {
            Self::Member
        } else {
            Self::Standard
        }
    }

    /// Normalized offset added to every checkbox position.
    pub fn checkbox_offset(self) -> Vec2 {
        match self {
            Self::Standard => STANDARD_CHECKBOX_OFFSET,
            Self::Member => Vec2::ZERO,
        }
    }

    /// Checkbox offset in pixels on `canvas`.
    pub fn checkbox_offset_px(self, canvas: Canvas) -> Vec2 {
        let o = self.checkbox_offset();
        let size = canvas.size();
        Vec2::new(o.x * size.width, o.y * size.height)
    }
}

/// Check that every field the compositor draws has a position entry.
///
/// Run once at startup; a failure is a defect in the compiled-in tables.
pub fn validate_tables() -> FormplateResult<()> {
    for field in PIC_FIELDS {
        PIC_TABLE.lookup(field)?;
    }
    for slots in SAF_CHECKBOX_SLOTS {
        for field in slots {
            SAF_TABLE.lookup(*field)?;
        }
    }
    SAF_TABLE.lookup(FieldId::PartnerNameUnderSignature)?;
    let signature = SAF_TABLE.lookup(FieldId::Signature)?;
    if signature.area.is_none() {
        return Err(FormplateError::configuration(
            "signature position must define an area",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/positions/registry.rs"]
mod tests;
