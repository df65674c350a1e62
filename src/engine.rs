//! The morph engine: owns the live particles and animates them between point sets.
//!
//! Reconciliation is positional. Slot `i` of the live collection is routed to target `i`;
//! surplus particles retire toward random points while shrinking, and missing ones spawn at
//! random points and grow in. After every transition the collection is shuffled, so the
//! next positional mapping differs from this one.
//!
//! Operations take `&mut self` and return once their animation has settled, so two of them
//! can never interleave.

use std::{
    sync::mpsc::{self, Receiver, Sender},
    time::Duration,
};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    config::MorphConfig,
    foundation::{
        core::{Point, Vec2, Viewport},
        error::MorphResult,
    },
    particle::Particle,
    sampler::ShapeSampler,
    surface::Surface,
    tick::{Frame, Phase, Ticker},
};

/// Outcome of matching the live collection against a new target set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Reconciliation {
    pub(crate) reused: usize,
    pub(crate) spawned: usize,
    pub(crate) retired: usize,
}

/// Handle for delivering viewport changes to an engine.
///
/// Changes are queued and applied before the engine's next operation starts.
#[derive(Clone, Debug)]
pub struct ResizeSignal {
    tx: Sender<Viewport>,
}

impl ResizeSignal {
    /// Returns `false` once the engine has unsubscribed or been dropped.
    pub fn notify(&self, viewport: Viewport) -> bool {
        self.tx.send(viewport).is_ok()
    }
}

struct ResizeSubscription {
    tx: Sender<Viewport>,
    rx: Receiver<Viewport>,
}

pub struct MorphEngine<S, T> {
    config: MorphConfig,
    viewport: Viewport,
    display: S,
    sampler: ShapeSampler<S>,
    ticker: T,
    particles: Vec<Particle>,
    rng: StdRng,
    frames: u64,
    resize: Option<ResizeSubscription>,
}

impl<S: Surface, T: Ticker> MorphEngine<S, T> {
    /// `display` receives the animation frames; `raster` is private to the shape sampler.
    pub fn new(config: MorphConfig, mut display: S, raster: S, ticker: T) -> MorphResult<Self> {
        config.validate()?;
        let viewport = config.viewport;

        display.resize(viewport)?;
        display.set_fill(config.dot_color);
        let sampler = ShapeSampler::new(raster, config.clone())?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (tx, rx) = mpsc::channel();

        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "morph engine ready"
        );
        Ok(Self {
            config,
            viewport,
            display,
            sampler,
            ticker,
            particles: Vec::new(),
            rng,
            frames: 0,
            resize: Some(ResizeSubscription { tx, rx }),
        })
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn display(&self) -> &S {
        &self.display
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    /// Frames rendered since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// A sender for viewport changes, or `None` after [`MorphEngine::unsubscribe_resize`].
    pub fn resize_signal(&self) -> Option<ResizeSignal> {
        self.resize.as_ref().map(|sub| ResizeSignal {
            tx: sub.tx.clone(),
        })
    }

    pub fn unsubscribe_resize(&mut self) {
        self.resize = None;
    }

    /// Resize both surfaces. Particles keep their coordinates.
    pub fn resize(&mut self, viewport: Viewport) -> MorphResult<()> {
        viewport.validate()?;
        self.display.resize(viewport)?;
        self.display.set_fill(self.config.dot_color);
        self.sampler.resize(viewport)?;
        self.viewport = viewport;
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport resized"
        );
        Ok(())
    }

    fn apply_pending_resize(&mut self) -> MorphResult<()> {
        let Some(sub) = &self.resize else {
            return Ok(());
        };
        if let Some(latest) = sub.rx.try_iter().last() {
            self.resize(latest)?;
        }
        Ok(())
    }

    pub fn sample_text(&mut self, text: &str) -> MorphResult<Vec<Point>> {
        self.apply_pending_resize()?;
        self.sampler.sample_text(text)
    }

    /// Morph into the dot pattern of `text`.
    pub fn to_text(&mut self, text: &str) -> MorphResult<()> {
        let targets = self.sample_text(text)?;
        self.transition_to(&targets)
    }

    /// Retire every particle.
    pub fn clear(&mut self) -> MorphResult<()> {
        self.transition_to(&[])
    }

    #[tracing::instrument(skip(self, targets), fields(targets = targets.len()))]
    pub fn transition_to(&mut self, targets: &[Point]) -> MorphResult<()> {
        self.apply_pending_resize()?;
        if self.particles.is_empty() && targets.is_empty() {
            return Ok(());
        }

        let plan = self.reconcile(targets);
        tracing::debug!(
            reused = plan.reused,
            spawned = plan.spawned,
            retired = plan.retired,
            "reconciled"
        );

        let steps = self.config.transition_steps;
        let interval = self.config.transition_tick();
        for step in 0..=steps {
            let last = step == steps;
            let progress = if last {
                1.0
            } else {
                self.config.ease.apply(f64::from(step) / f64::from(steps))
            };

            let radius = self.config.dot_radius;
            for p in &mut self.particles {
                p.update(progress, radius);
            }
            self.present(Phase::Transition, interval, progress, last)?;
        }

        self.settle();
        self.particles.shuffle(&mut self.rng);
        Ok(())
    }

    /// Jitter every particle around its target for `duration`.
    #[tracing::instrument(skip(self))]
    pub fn scatter(&mut self, duration: Duration) -> MorphResult<()> {
        self.apply_pending_resize()?;

        let steps = self.config.scatter_steps(duration);
        let interval = self.config.scatter_tick();
        let jitter = self.config.jitter_px;
        for step in 0..=steps {
            let last = step == steps;
            for p in &mut self.particles {
                let offset = Vec2::new(
                    unit_scaled(&mut self.rng, jitter),
                    unit_scaled(&mut self.rng, jitter),
                );
                p.jitter(offset);
            }
            let progress = f64::from(step) / f64::from(steps);
            self.present(Phase::Scatter, interval, progress, last)?;
        }

        self.settle();
        Ok(())
    }

    pub fn scatter_default(&mut self) -> MorphResult<()> {
        self.scatter(self.config.scatter_duration())
    }

    /// Positional matching of the live collection against `targets`. Only sound when an
    /// animation follows, since retired slots are not revived.
    pub(crate) fn reconcile(&mut self, targets: &[Point]) -> Reconciliation {
        let live = self.particles.len();
        let reused = live.min(targets.len());

        for (p, &target) in self.particles.iter_mut().zip(targets) {
            p.retarget(target);
        }

        for i in reused..live {
            let away = self.random_point();
            self.particles[i].retire(away);
        }

        for &target in &targets[reused..] {
            let origin = self.random_point();
            self.particles.push(Particle::appearing(origin, target));
        }

        Reconciliation {
            reused,
            spawned: targets.len() - reused,
            retired: live - reused,
        }
    }

    fn random_point(&mut self) -> Point {
        Point::new(
            unit_scaled(&mut self.rng, self.viewport.width_f64()),
            unit_scaled(&mut self.rng, self.viewport.height_f64()),
        )
    }

    /// Prune retired particles and promote the rest to steady at their targets.
    fn settle(&mut self) {
        let before = self.particles.len();
        self.particles.retain_mut(Particle::settle);
        tracing::debug!(
            pruned = before - self.particles.len(),
            live = self.particles.len(),
            "settled"
        );
    }

    fn present(
        &mut self,
        phase: Phase,
        interval: Duration,
        progress: f64,
        last: bool,
    ) -> MorphResult<()> {
        self.display.clear();
        for p in &self.particles {
            self.display.fill_circle(p.current, p.radius);
        }
        self.display.flush();

        let frame = Frame {
            index: self.frames,
            phase,
            interval,
            progress,
            last,
            particles: &self.particles,
            surface: &self.display,
        };
        tracing::trace!(index = frame.index, ?phase, progress, "tick");
        self.ticker.tick(&frame)?;
        self.frames += 1;
        Ok(())
    }
}

/// Uniform in `[0, scale)`; `0` when `scale` is not positive.
fn unit_scaled(rng: &mut StdRng, scale: f64) -> f64 {
    rng.gen_range(0.0..1.0) * scale.max(0.0)
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
