use std::collections::HashMap;
use std::sync::Arc;

use image::RgbaImage;

use crate::assets::decode::decode_template;
use crate::assets::source::{AssetSource, TemplateAsset};
use crate::compile::plan::{DocumentKind, DocumentPlan, DrawOp, PlanContext, compile};
use crate::compose::settings::CompositorSettings;
use crate::export::ExportBundle;
use crate::foundation::core::Canvas;
use crate::foundation::error::{FormplateError, FormplateResult};
use crate::form::questions::Questionnaire;
use crate::form::snapshot::{FormSnapshot, NationDirectory};
use crate::positions::registry::validate_tables;
use crate::render::checkbox::{CheckIcon, draw_checkbox};
use crate::render::signature::{SignatureBuffer, place_signature, process_signature};
use crate::render::target::RenderTarget;
use crate::text::layout::{TextBackend, draw_text};

/// Renders PIC and SAF documents onto their template images.
///
/// Loaded templates and the scaled check icon are cached for the lifetime of the compositor.
/// Every render owns a fresh [`RenderTarget`]; nothing from a previous render leaks into the
/// next one.
pub struct Compositor<S, T> {
    source: S,
    text: T,
    settings: CompositorSettings,
    nations: NationDirectory,
    questionnaire: Questionnaire,
    templates: HashMap<TemplateAsset, Arc<RgbaImage>>,
    check_icon: Option<Arc<CheckIcon>>,
}

impl<S, T> std::fmt::Debug for Compositor<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("settings", &self.settings)
            .field("cached_templates", &self.templates.len())
            .finish_non_exhaustive()
    }
}

impl<S: AssetSource, T: TextBackend> Compositor<S, T> {
    /// Compositor with default settings, an empty nation directory and the default questionnaire.
    ///
    /// Fails with [`FormplateError::Configuration`] if the compiled-in position tables are
    /// incomplete.
    pub fn new(source: S, text: T) -> FormplateResult<Self> {
        validate_tables()?;
        let questionnaire = Questionnaire::default();
        questionnaire.validate()?;
        Ok(Self {
            source,
            text,
            settings: CompositorSettings::default(),
            nations: NationDirectory::default(),
            questionnaire,
            templates: HashMap::new(),
            check_icon: None,
        })
    }

    /// Replace the settings. Cached assets are dropped since their paths may have changed.
    pub fn with_settings(mut self, settings: CompositorSettings) -> FormplateResult<Self> {
        settings.validate()?;
        self.settings = settings;
        self.templates.clear();
        self.check_icon = None;
        Ok(self)
    }

    /// Replace the nation lookup.
    pub fn with_nations(mut self, nations: NationDirectory) -> Self {
        self.nations = nations;
        self
    }

    /// Replace the questionnaire whose answers map onto SAF checkboxes.
    pub fn with_questionnaire(mut self, questionnaire: Questionnaire) -> FormplateResult<Self> {
        questionnaire.validate()?;
        self.questionnaire = questionnaire;
        Ok(self)
    }

    /// Active settings.
    pub fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    /// Text backend, e.g. to register further fonts.
    pub fn text_backend_mut(&mut self) -> &mut T {
        &mut self.text
    }

    /// Compile the layout plan of `kind` for `snapshot` against the template's size.
    pub async fn plan(
        &mut self,
        kind: DocumentKind,
        snapshot: &FormSnapshot,
    ) -> FormplateResult<DocumentPlan> {
        let base = self.template(kind.base_for(snapshot)).await?;
        let canvas = Canvas::new(base.width(), base.height());
        compile(kind, snapshot, canvas, self.plan_context())
    }

    /// Render `kind` for `snapshot` into a fresh target.
    ///
    /// Every asset the plan needs is loaded and decoded before the first draw, so a failure
    /// never leaves a half-drawn target behind.
    #[tracing::instrument(skip_all, fields(kind = kind.name()))]
    pub async fn render(
        &mut self,
        kind: DocumentKind,
        snapshot: &FormSnapshot,
    ) -> FormplateResult<RenderTarget> {
        let base = self.template(kind.base_for(snapshot)).await?;
        let canvas = Canvas::new(base.width(), base.height());
        let plan = compile(kind, snapshot, canvas, self.plan_context())?;

        let icon = if plan.needs_check_icon() {
            Some(self.check_icon().await?)
        } else {
            None
        };
        let signature = match &snapshot.signature {
            Some(src) if plan.has_signature() => Some(process_signature(
                src.bytes(),
                self.settings.dilation_radius,
            )?),
            _ => None,
        };
        tracing::debug!(
            ops = plan.ops.len(),
            width = canvas.width,
            height = canvas.height,
            "compiled document plan"
        );

        let mut target = RenderTarget::from_base(&base);
        draw_plan(
            &mut target,
            &plan,
            &mut self.text,
            icon.as_deref(),
            signature.as_ref(),
        )?;
        Ok(target)
    }

    /// Render and encode the PIC document.
    pub async fn compose_pic(&mut self, snapshot: &FormSnapshot) -> FormplateResult<Vec<u8>> {
        self.compose(DocumentKind::Pic, snapshot).await
    }

    /// Render and encode the SAF document.
    pub async fn compose_saf(&mut self, snapshot: &FormSnapshot) -> FormplateResult<Vec<u8>> {
        self.compose(DocumentKind::Saf, snapshot).await
    }

    /// Render and encode both documents. Either both succeed or the first failure is returned.
    #[tracing::instrument(skip_all)]
    pub async fn compose_documents(
        &mut self,
        snapshot: &FormSnapshot,
    ) -> FormplateResult<ExportBundle> {
        let pic = self.compose_pic(snapshot).await?;
        let saf = self.compose_saf(snapshot).await?;
        Ok(ExportBundle { pic, saf })
    }

    async fn compose(
        &mut self,
        kind: DocumentKind,
        snapshot: &FormSnapshot,
    ) -> FormplateResult<Vec<u8>> {
        let target = self.render(kind, snapshot).await?;
        let png = target.encode_png()?;
        tracing::info!(kind = kind.name(), bytes = png.len(), "document composed");
        Ok(png)
    }

    fn plan_context(&self) -> PlanContext<'_> {
        PlanContext {
            settings: &self.settings,
            nations: &self.nations,
            questionnaire: &self.questionnaire,
        }
    }

    async fn template(&mut self, asset: TemplateAsset) -> FormplateResult<Arc<RgbaImage>> {
        if let Some(img) = self.templates.get(&asset) {
            return Ok(Arc::clone(img));
        }
        let path = asset.path(&self.settings.assets).to_string();
        let bytes = self.source.read(&path).await?;
        let img = Arc::new(decode_template(&path, &bytes)?);
        tracing::debug!(
            path = %path,
            width = img.width(),
            height = img.height(),
            "loaded template"
        );
        self.templates.insert(asset, Arc::clone(&img));
        Ok(img)
    }

    async fn check_icon(&mut self) -> FormplateResult<Arc<CheckIcon>> {
        if let Some(icon) = &self.check_icon {
            return Ok(Arc::clone(icon));
        }
        let src = self.template(TemplateAsset::CheckIcon).await?;
        let icon = Arc::new(CheckIcon::from_image(&src, self.settings.checkbox_edge_px));
        self.check_icon = Some(Arc::clone(&icon));
        Ok(icon)
    }
}

/// Execute `plan` onto `target` in op order.
///
/// `icon` and `signature` must be present when the plan contains checkbox or signature ops.
pub fn draw_plan<B: TextBackend + ?Sized>(
    target: &mut RenderTarget,
    plan: &DocumentPlan,
    text: &mut B,
    icon: Option<&CheckIcon>,
    signature: Option<&SignatureBuffer>,
) -> FormplateResult<()> {
    for op in &plan.ops {
        match op {
            DrawOp::Text {
                text: s,
                center,
                max_width,
                ..
            } => draw_text(target, text, s, *center, *max_width, plan.style)?,
            DrawOp::Checkbox { field, center } => {
                let icon = icon.ok_or_else(|| {
                    FormplateError::configuration(format!(
                        "checkbox '{}' has no check icon to stamp",
                        field.name()
                    ))
                })?;
                draw_checkbox(target, *center, true, icon);
            }
            DrawOp::Signature { center, size } => {
                let signature = signature.ok_or_else(|| {
                    FormplateError::configuration("signature op without a signature buffer")
                })?;
                place_signature(target, signature, *center, *size);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
