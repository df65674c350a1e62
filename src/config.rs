use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context as _;

use crate::{
    ease::Ease,
    foundation::{
        core::{Rgba8, Viewport},
        error::{MorphError, MorphResult},
    },
};

/// Tunables for sampling and animation.
///
/// Missing fields in a JSON config fall back to [`MorphConfig::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    pub viewport: Viewport,
    /// Step of the sampling grid, in pixels.
    pub dot_gap: u32,
    /// Radius of a settled particle.
    pub dot_radius: f64,
    pub font_size_basis: f64,
    /// Font size the string is measured at before fitting.
    pub measure_font_px: f32,
    pub fit_ratio: f64,
    /// Upper bound for the fitted font size, as a fraction of surface height.
    pub max_height_ratio: f64,
    pub ease: Ease,
    pub transition_tick_ms: u64,
    pub transition_steps: u32,
    pub scatter_tick_ms: u64,
    pub scatter_step_ms: f64,
    pub scatter_duration_ms: u64,
    pub jitter_px: f64,
    pub dot_color: Rgba8,
    pub ink_color: Rgba8,
    pub background: Rgba8,
    pub seed: Option<u64>,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            dot_gap: 15,
            dot_radius: 7.0,
            font_size_basis: 100.0,
            measure_font_px: 30.0,
            fit_ratio: 0.22,
            max_height_ratio: 0.6,
            ease: Ease::OutQuad,
            transition_tick_ms: 17,
            transition_steps: 50,
            scatter_tick_ms: 50,
            scatter_step_ms: 25.0,
            scatter_duration_ms: 1000,
            jitter_px: 2.0,
            dot_color: Rgba8::WHITE,
            ink_color: Rgba8::RED,
            background: Rgba8::new(18, 20, 28, 255),
            seed: None,
        }
    }
}

impl MorphConfig {
    pub fn from_json_file(path: &Path) -> MorphResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> MorphResult<()> {
        self.viewport.validate()?;

        if self.dot_gap == 0 {
            return Err(MorphError::configuration("dot_gap must be > 0"));
        }
        positive("dot_radius", self.dot_radius)?;
        positive("font_size_basis", self.font_size_basis)?;
        positive("measure_font_px", f64::from(self.measure_font_px))?;
        positive("fit_ratio", self.fit_ratio)?;
        positive("max_height_ratio", self.max_height_ratio)?;
        positive("scatter_step_ms", self.scatter_step_ms)?;
        if !self.jitter_px.is_finite() || self.jitter_px < 0.0 {
            return Err(MorphError::configuration(
                "jitter_px must be finite and >= 0",
            ));
        }
        if self.transition_steps == 0 {
            return Err(MorphError::configuration("transition_steps must be > 0"));
        }
        if self.transition_tick_ms == 0 || self.scatter_tick_ms == 0 {
            return Err(MorphError::configuration("tick intervals must be > 0 ms"));
        }
        Ok(())
    }

    pub fn transition_tick(&self) -> Duration {
        Duration::from_millis(self.transition_tick_ms)
    }

    pub fn scatter_tick(&self) -> Duration {
        Duration::from_millis(self.scatter_tick_ms)
    }

    pub fn scatter_duration(&self) -> Duration {
        Duration::from_millis(self.scatter_duration_ms)
    }

    /// Number of jitter steps a scatter of `duration` takes. Never zero.
    pub fn scatter_steps(&self, duration: Duration) -> u32 {
        // Integer nanoseconds so an exact multiple of the step never rounds up.
        let step_ns = ((self.scatter_step_ms * 1_000_000.0).round() as u128).max(1);
        let steps = duration.as_nanos().div_ceil(step_ns);
        u32::try_from(steps).unwrap_or(u32::MAX).max(1)
    }

    /// Font size that fits a string measured `measured_px` wide (at `measure_font_px`)
    /// onto `viewport`.
    pub fn fit_font_px(&self, measured_px: f64, viewport: Viewport) -> f32 {
        let by_height = self.max_height_ratio * viewport.height_f64();
        let by_width = if measured_px > 0.0 {
            self.fit_ratio * self.font_size_basis / measured_px * viewport.width_f64()
        } else {
            by_height
        };
        by_width.min(by_height).floor() as f32
    }
}

fn positive(name: &str, v: f64) -> MorphResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(MorphError::configuration(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
