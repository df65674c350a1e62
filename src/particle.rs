use crate::foundation::core::{Point, Vec2};

/// Where a particle is in its life. Drives how its radius follows progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Lifecycle {
    /// Grows from radius 0 to nominal.
    Appearing,
    Steady,
    /// Shrinks from nominal to 0, then gets pruned.
    Disappearing,
}

/// One animated dot.
///
/// `current` is always `origin + progress * (target - origin)` for the progress of the
/// last update, except during a scatter where it is `target` plus jitter.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub origin: Point,
    pub target: Point,
    pub current: Point,
    pub radius: f64,
    pub lifecycle: Lifecycle,
}

impl Particle {
    pub fn steady(at: Point, radius: f64) -> Self {
        Self {
            origin: at,
            target: at,
            current: at,
            radius,
            lifecycle: Lifecycle::Steady,
        }
    }

    /// A new dot flying in from `origin`; starts invisible.
    pub fn appearing(origin: Point, target: Point) -> Self {
        Self {
            origin,
            target,
            current: origin,
            radius: 0.0,
            lifecycle: Lifecycle::Appearing,
        }
    }

    /// Re-route toward `target`. Lifecycle is left as is.
    pub fn retarget(&mut self, target: Point) {
        self.target = target;
    }

    /// Send toward `target` while shrinking out.
    pub fn retire(&mut self, target: Point) {
        self.target = target;
        self.lifecycle = Lifecycle::Disappearing;
    }

    pub fn update(&mut self, progress: f64, nominal_radius: f64) {
        let progress = progress.clamp(0.0, 1.0);
        self.current = if progress >= 1.0 {
            self.target
        } else {
            self.origin.lerp(self.target, progress)
        };
        match self.lifecycle {
            Lifecycle::Steady => {}
            Lifecycle::Appearing => self.radius = progress * nominal_radius,
            Lifecycle::Disappearing => self.radius = ((1.0 - progress) * nominal_radius).max(0.0),
        }
    }

    pub fn jitter(&mut self, offset: Vec2) {
        self.current = self.target + offset;
    }

    /// End-of-cycle promotion. Returns `false` when the particle should be pruned.
    pub fn settle(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Disappearing {
            return false;
        }
        self.origin = self.target;
        self.lifecycle = Lifecycle::Steady;
        true
    }
}

#[cfg(test)]
#[path = "../tests/unit/particle.rs"]
mod tests;
