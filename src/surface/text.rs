use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::{
    core::Rgba8,
    error::{MorphError, MorphResult},
};

/// Raw font file contents shared between the shaper and the rasterizer.
#[derive(Clone, Debug)]
pub struct FontBytes(Arc<Vec<u8>>);

impl FontBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Arc::new(bytes))
    }

    pub fn from_file(path: &Path) -> MorphResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        if bytes.is_empty() {
            return Err(MorphError::text(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        Ok(Self::new(bytes))
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub(crate) fn to_font_data(&self) -> vello_cpu::peniko::FontData {
        let blob = vello_cpu::peniko::Blob::from(self.0.as_ref().clone());
        vello_cpu::peniko::FontData::new(blob, 0)
    }
}

/// Shapes single-line strings with one registered font family.
pub(crate) struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family: String,
}

impl TextShaper {
    pub(crate) fn new(font: &FontBytes) -> MorphResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.as_slice().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| MorphError::text("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MorphError::text("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        })
    }

    pub(crate) fn layout(&mut self, text: &str, font_px: f32) -> MorphResult<parley::Layout<Rgba8>> {
        if !font_px.is_finite() || font_px <= 0.0 {
            return Err(MorphError::text(format!(
                "font size must be finite and > 0, got {font_px}"
            )));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_px));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
