//! Tick sources that pace the engine's animation loops.
//!
//! The engine renders a frame, then hands it to a [`Ticker`], which decides how long to wait
//! before the next one and may observe the pixels on the way.

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{MorphError, MorphResult},
    particle::Particle,
    surface::Surface,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Transition,
    Scatter,
}

/// A rendered frame, handed to the ticker before the next tick is scheduled.
pub struct Frame<'a> {
    /// Frames rendered by this engine so far, starting at 0.
    pub index: u64,
    pub phase: Phase,
    pub interval: Duration,
    /// Eased progress for transitions; linear step progress for scatters.
    pub progress: f64,
    /// Set on the frame after which the operation settles.
    pub last: bool,
    pub particles: &'a [Particle],
    pub surface: &'a dyn Surface,
}

pub trait Ticker {
    fn tick(&mut self, frame: &Frame<'_>) -> MorphResult<()>;
}

impl<T: Ticker + ?Sized> Ticker for &mut T {
    fn tick(&mut self, frame: &Frame<'_>) -> MorphResult<()> {
        (**self).tick(frame)
    }
}

impl<T: Ticker + ?Sized> Ticker for Box<T> {
    fn tick(&mut self, frame: &Frame<'_>) -> MorphResult<()> {
        (**self).tick(frame)
    }
}

/// Never waits. Counts the ticks it has seen.
#[derive(Debug, Default)]
pub struct Immediate {
    pub ticks: u64,
}

impl Ticker for Immediate {
    fn tick(&mut self, _frame: &Frame<'_>) -> MorphResult<()> {
        self.ticks += 1;
        Ok(())
    }
}

/// Sleeps so that consecutive ticks are at least one interval apart.
#[derive(Debug, Default)]
pub struct RealTime {
    last: Option<Instant>,
}

impl RealTime {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ticker for RealTime {
    fn tick(&mut self, frame: &Frame<'_>) -> MorphResult<()> {
        let now = Instant::now();
        if let Some(last) = self.last {
            let next_tick = last + frame.interval;
            if next_tick > now {
                std::thread::sleep(next_tick - now);
            }
        }
        self.last = Some(Instant::now());
        if frame.last {
            // The next operation starts its own cadence.
            self.last = None;
        }
        Ok(())
    }
}

/// Writes frames as numbered PNGs, then defers to `inner` for pacing.
pub struct PngSequence<T> {
    dir: PathBuf,
    every: u64,
    written: u64,
    inner: T,
}

impl<T: Ticker> PngSequence<T> {
    /// Keep every `every`-th frame (`0` is treated as `1`).
    pub fn new(dir: impl Into<PathBuf>, every: u64, inner: T) -> MorphResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        Ok(Self {
            dir,
            every: every.max(1),
            written: 0,
            inner,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn write(&mut self, frame: &Frame<'_>) -> MorphResult<()> {
        let pixels = frame.surface.read_all()?;
        let path = self.dir.join(format!("frame_{:06}.png", self.written));
        image::save_buffer_with_format(
            &path,
            &pixels.data,
            pixels.width,
            pixels.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| MorphError::tick(format!("write png '{}': {e}", path.display())))?;
        self.written += 1;
        Ok(())
    }
}

impl<T: Ticker> Ticker for PngSequence<T> {
    fn tick(&mut self, frame: &Frame<'_>) -> MorphResult<()> {
        if frame.index % self.every == 0 {
            self.write(frame)?;
        }
        self.inner.tick(frame)
    }
}

#[cfg(test)]
#[path = "../tests/unit/tick.rs"]
mod tests;
