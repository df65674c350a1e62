use crate::{
    config::MorphConfig,
    foundation::{
        core::{Point, Viewport},
        error::MorphResult,
    },
    surface::Surface,
};

/// Turns a string into a set of dot positions by rasterizing it and sampling a grid.
///
/// Holds its own surface, separate from the one particles are drawn on.
pub struct ShapeSampler<S> {
    surface: S,
    config: MorphConfig,
}

impl<S: Surface> ShapeSampler<S> {
    pub fn new(mut surface: S, config: MorphConfig) -> MorphResult<Self> {
        config.validate()?;
        surface.resize(config.viewport)?;
        surface.set_fill(config.ink_color);
        Ok(Self { surface, config })
    }

    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn resize(&mut self, viewport: Viewport) -> MorphResult<()> {
        self.surface.resize(viewport)?;
        self.surface.set_fill(self.config.ink_color);
        Ok(())
    }

    /// Clear the surface and draw `text` centered, sized to fit.
    pub fn rasterize(&mut self, text: &str) -> MorphResult<()> {
        self.surface.clear();
        let viewport = self.surface.viewport();

        let measured = self
            .surface
            .measure_text(text, self.config.measure_font_px)?;
        if measured > 0.0 {
            let font_px = self.config.fit_font_px(measured, viewport);
            tracing::debug!(text, measured, font_px, "fitted font size");
            if font_px > 0.0 {
                self.surface
                    .fill_text_centered(text, font_px, viewport.center())?;
            }
        }
        self.surface.flush();
        Ok(())
    }

    /// Grid points, in row-major order, whose pixel carries ink.
    pub fn sample_grid(&self) -> MorphResult<Vec<Point>> {
        let frame = self.surface.read_all()?;
        let gap = self.config.dot_gap as usize;

        let mut points = Vec::new();
        for y in (0..frame.height).step_by(gap) {
            for x in (0..frame.width).step_by(gap) {
                if frame.is_ink(x, y) {
                    points.push(Point::new(f64::from(x), f64::from(y)));
                }
            }
        }
        Ok(points)
    }

    #[tracing::instrument(skip(self))]
    pub fn sample_text(&mut self, text: &str) -> MorphResult<Vec<Point>> {
        self.rasterize(text)?;
        let points = self.sample_grid()?;
        tracing::debug!(count = points.len(), "sampled targets");
        Ok(points)
    }
}

#[cfg(test)]
#[path = "../tests/unit/sampler.rs"]
mod tests;
