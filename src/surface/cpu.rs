use vello_cpu::kurbo::Shape as _;

use crate::{
    foundation::{
        core::{FrameRGBA, Point, Rgba8, Viewport},
        error::{MorphError, MorphResult},
    },
    surface::{
        Surface, copy_region,
        text::{FontBytes, TextShaper},
    },
};

const CIRCLE_TOLERANCE: f64 = 0.1;

/// [`Surface`] rasterized on the CPU by `vello_cpu`, with text shaped by `parley`.
///
/// Draw calls accumulate in a render context and land in the pixmap on [`Surface::flush`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
    fill: Rgba8,
    background: Option<Rgba8>,
    shaper: TextShaper,
    font: vello_cpu::peniko::FontData,
}

impl CpuSurface {
    pub fn new(viewport: Viewport, font: &FontBytes) -> MorphResult<Self> {
        let (width, height) = surface_dims(viewport)?;
        let mut surface = Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            ctx: vello_cpu::RenderContext::new(width, height),
            fill: Rgba8::WHITE,
            background: None,
            shaper: TextShaper::new(font)?,
            font: font.to_font_data(),
        };
        surface.clear();
        Ok(surface)
    }

    /// Opaque color laid down by every [`Surface::clear`]. `None` clears to transparent.
    pub fn with_background(mut self, background: Option<Rgba8>) -> Self {
        self.background = background;
        self.clear();
        self
    }

    fn paint(color: Rgba8) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

fn surface_dims(viewport: Viewport) -> MorphResult<(u16, u16)> {
    viewport.validate()?;
    let width: u16 = viewport
        .width
        .try_into()
        .map_err(|_| MorphError::configuration("surface width exceeds u16"))?;
    let height: u16 = viewport
        .height
        .try_into()
        .map_err(|_| MorphError::configuration("surface height exceeds u16"))?;
    Ok((width, height))
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn resize(&mut self, viewport: Viewport) -> MorphResult<()> {
        let (width, height) = surface_dims(viewport)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
            self.ctx = vello_cpu::RenderContext::new(width, height);
        }
        self.clear();
        Ok(())
    }

    fn set_fill(&mut self, color: Rgba8) {
        self.fill = color;
    }

    fn clear(&mut self) {
        self.ctx.reset();
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        if let Some(bg) = self.background {
            self.ctx.set_paint(Self::paint(bg));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let circle = vello_cpu::kurbo::Circle::new((center.x, center.y), radius);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(Self::paint(self.fill));
        self.ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
    }

    fn measure_text(&mut self, text: &str, font_px: f32) -> MorphResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.shaper.layout(text, font_px)?;
        Ok(f64::from(layout.width()))
    }

    fn fill_text_centered(&mut self, text: &str, font_px: f32, center: Point) -> MorphResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = self.shaper.layout(text, font_px)?;
        let origin_x = center.x - f64::from(layout.width()) / 2.0;
        let origin_y = center.y - f64::from(layout.height()) / 2.0;

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin_x, origin_y)));
        self.ctx.set_paint(Self::paint(self.fill));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn flush(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    fn read_region(&self, x: u32, y: u32, width: u32, height: u32) -> MorphResult<FrameRGBA> {
        copy_region(
            self.pixmap.data_as_u8_slice(),
            self.width(),
            self.height(),
            x,
            y,
            width,
            height,
        )
    }
}
