use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{FormplateError, FormplateResult};

/// Largest accepted signature dilation radius, in pixels.
pub const MAX_DILATION_RADIUS: u32 = 16;

/// Template asset paths, relative to the [`AssetSource`](crate::AssetSource) root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// PIC base template.
    pub pic: String,
    /// Standard SAF base template.
    pub saf_standard: String,
    /// Member SAF base template.
    pub saf_member: String,
    /// Checkbox check mark.
    pub check_icon: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            pic: "PIC.png".to_string(),
            saf_standard: "SAF.png".to_string(),
            saf_member: "SAF_victory.png".to_string(),
            check_icon: "check.png".to_string(),
        }
    }
}

/// Fixed drawing constants of both document families.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorSettings {
    /// Template asset paths.
    pub assets: AssetPaths,
    /// Color of every text field.
    pub text_color: Rgba8,
    /// Font size of PIC fields, in pixels.
    pub pic_font_size: f32,
    /// Font size of SAF fields, in pixels.
    pub saf_font_size: f32,
    /// Line pitch as a multiple of the font size.
    pub line_height: f32,
    /// Maximum text width as a fraction of canvas width.
    pub max_width_fraction: f64,
    /// Edge length of the stamped check mark, in pixels.
    pub checkbox_edge_px: u32,
    /// Signature dilation radius, in pixels.
    pub dilation_radius: u32,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            assets: AssetPaths::default(),
            text_color: Rgba8::rgb(0x15, 0x4a, 0x8f),
            pic_font_size: 28.0,
            saf_font_size: 28.0,
            line_height: 1.2,
            max_width_fraction: 0.25,
            checkbox_edge_px: 24,
            dilation_radius: 1,
        }
    }
}

impl CompositorSettings {
    /// Parse settings from JSON. Missing keys take their default value.
    pub fn from_json_str(s: &str) -> FormplateResult<Self> {
        let settings: Self = serde_json::from_str(s)
            .map_err(|e| FormplateError::validation(format!("compositor settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a JSON settings file.
    pub fn from_path(path: impl AsRef<Path>) -> FormplateResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            FormplateError::validation(format!("read settings '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Reject values no document can be drawn with.
    pub fn validate(&self) -> FormplateResult<()> {
        for (name, size) in [
            ("pic_font_size", self.pic_font_size),
            ("saf_font_size", self.saf_font_size),
            ("line_height", self.line_height),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(FormplateError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.max_width_fraction.is_finite()
            || self.max_width_fraction <= 0.0
            || self.max_width_fraction > 1.0
        {
            return Err(FormplateError::validation(
                "max_width_fraction must be in (0, 1]",
            ));
        }
        if self.checkbox_edge_px == 0 {
            return Err(FormplateError::validation("checkbox_edge_px must be > 0"));
        }
        if self.dilation_radius > MAX_DILATION_RADIUS {
            return Err(FormplateError::validation(format!(
                "dilation_radius must be <= {MAX_DILATION_RADIUS}"
            )));
        }
        for (name, path) in [
            ("pic", &self.assets.pic),
            ("saf_standard", &self.assets.saf_standard),
            ("saf_member", &self.assets.saf_member),
            ("check_icon", &self.assets.check_icon),
        ] {
            if path.trim().is_empty() {
                return Err(FormplateError::validation(format!(
                    "asset path '{name}' must be non-empty"
                )));
            }
        }
        Ok(())
    }
}

/// Flip transition timings of the live preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Delay from the start of the flip-out to the base image swap.
    pub flip_out_ms: u64,
    /// Duration of the flip-in animation.
    pub flip_in_ms: u64,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            flip_out_ms: 200,
            flip_in_ms: 500,
        }
    }
}

impl PreviewSettings {
    /// Parse settings from JSON. Missing keys take their default value.
    pub fn from_json_str(s: &str) -> FormplateResult<Self> {
        let settings: Self = serde_json::from_str(s)
            .map_err(|e| FormplateError::validation(format!("preview settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a JSON settings file.
    pub fn from_path(path: impl AsRef<Path>) -> FormplateResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            FormplateError::validation(format!("read settings '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Both phases must take time, or the flip collapses into an in-place render.
    pub fn validate(&self) -> FormplateResult<()> {
        if self.flip_out_ms == 0 || self.flip_in_ms == 0 {
            return Err(FormplateError::validation(
                "flip_out_ms and flip_in_ms must be > 0",
            ));
        }
        Ok(())
    }

    /// Flip-out delay as a [`Duration`].
    pub fn flip_out(&self) -> Duration {
        Duration::from_millis(self.flip_out_ms)
    }

    /// Flip-in duration as a [`Duration`].
    pub fn flip_in(&self) -> Duration {
        Duration::from_millis(self.flip_in_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/settings.rs"]
mod tests;
