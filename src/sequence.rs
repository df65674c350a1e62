use std::time::Duration;

use crate::{
    engine::MorphEngine, foundation::error::MorphResult, surface::Surface, tick::Ticker,
};

/// One engine operation in a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Text(String),
    Scatter(Duration),
    Clear,
}

/// Ordered list of steps, each started only after the previous one settled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Each character of `word` in turn, scattering after every one, then clear.
    pub fn spell(word: &str, scatter: Duration) -> Self {
        let mut steps = Vec::with_capacity(word.chars().count() * 2 + 1);
        for ch in word.chars() {
            steps.push(Step::Text(ch.to_string()));
            steps.push(Step::Scatter(scatter));
        }
        steps.push(Step::Clear);
        Self { steps }
    }

    pub fn love() -> Self {
        Self::spell("LOVE", Duration::from_millis(1000))
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn run<S: Surface, T: Ticker>(&self, engine: &mut MorphEngine<S, T>) -> MorphResult<()> {
        for (i, step) in self.steps.iter().enumerate() {
            tracing::info!(step = i, ?step, "running step");
            match step {
                Step::Text(text) => engine.to_text(text)?,
                Step::Scatter(duration) => engine.scatter(*duration)?,
                Step::Clear => engine.clear()?,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    Armed,
    Running,
}

/// Start button for a [`Sequence`]. Ignores presses while a run is in progress.
#[derive(Debug)]
pub struct Trigger {
    sequence: Sequence,
    state: TriggerState,
}

impl Trigger {
    pub fn new(sequence: Sequence) -> Self {
        Self {
            sequence,
            state: TriggerState::Armed,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == TriggerState::Armed
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Accept a start request. Returns `false` while a run is pending or in progress.
    pub fn press(&mut self) -> bool {
        if self.state != TriggerState::Armed {
            return false;
        }
        self.state = TriggerState::Running;
        true
    }

    /// Run the sequence if a press was accepted, then re-arm (also when a step fails).
    pub fn run_pending<S: Surface, T: Ticker>(
        &mut self,
        engine: &mut MorphEngine<S, T>,
    ) -> MorphResult<bool> {
        if self.state != TriggerState::Running {
            return Ok(false);
        }
        let result = self.sequence.run(engine);
        self.state = TriggerState::Armed;
        result.map(|()| true)
    }

    /// [`Trigger::press`] followed by [`Trigger::run_pending`].
    pub fn fire<S: Surface, T: Ticker>(
        &mut self,
        engine: &mut MorphEngine<S, T>,
    ) -> MorphResult<bool> {
        if !self.press() {
            return Ok(false);
        }
        self.run_pending(engine)
    }
}

#[cfg(test)]
#[path = "../tests/unit/sequence.rs"]
mod tests;
