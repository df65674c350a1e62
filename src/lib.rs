//! Render text as a field of dots and morph those dots from one shape to the next.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: [`ShapeSampler`] rasterizes a string onto a private surface and walks a
//!    fixed grid over it, keeping every cell that landed on ink.
//! 2. **Reconcile**: [`MorphEngine`] maps its live particles onto the new points slot by slot,
//!    retiring the surplus and spawning the shortfall.
//! 3. **Animate**: every tick the engine eases all particles toward their targets, redraws
//!    the whole display surface, and hands the frame to a [`Ticker`].
//!
//! Surfaces are pluggable through [`Surface`]; [`CpuSurface`] rasterizes with `vello_cpu`
//! and shapes text with `parley`.
#![forbid(unsafe_code)]

pub mod config;
pub mod ease;
pub mod engine;
mod foundation;
pub mod particle;
pub mod sampler;
pub mod sequence;
pub mod surface;
pub mod tick;

pub use config::MorphConfig;
pub use ease::Ease;
pub use engine::{MorphEngine, ResizeSignal};
pub use foundation::core::{FrameRGBA, Point, Rgba8, Vec2, Viewport};
pub use foundation::error::{MorphError, MorphResult};
pub use particle::{Lifecycle, Particle};
pub use sampler::ShapeSampler;
pub use sequence::{Sequence, Step, Trigger, TriggerState};
pub use surface::{Surface, cpu::CpuSurface, text::FontBytes};
pub use tick::{Frame, Immediate, Phase, PngSequence, RealTime, Ticker};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
