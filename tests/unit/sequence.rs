use super::*;
use crate::{
    MorphConfig, MorphError, Viewport,
    test_support::BlockSurface,
    tick::{Frame, Immediate, Phase},
};

fn engine<T: Ticker>(ticker: T) -> MorphEngine<BlockSurface, T> {
    let config = MorphConfig {
        viewport: Viewport {
            width: 240,
            height: 160,
        },
        dot_gap: 10,
        transition_steps: 4,
        seed: Some(3),
        ..MorphConfig::default()
    };
    MorphEngine::new(config, BlockSurface::new(1, 1), BlockSurface::new(1, 1), ticker).unwrap()
}

/// Logs the phase of each frame and fails on request.
#[derive(Default)]
struct Script {
    phases: Vec<Phase>,
    fail_at: Option<usize>,
}

impl Ticker for Script {
    fn tick(&mut self, frame: &Frame<'_>) -> MorphResult<()> {
        if self.fail_at == Some(self.phases.len()) {
            return Err(MorphError::tick("display went away"));
        }
        self.phases.push(frame.phase);
        Ok(())
    }
}

#[test]
fn love_spells_letters_with_scatters_then_clears() {
    let seq = Sequence::love();
    let ms = Duration::from_millis(1000);
    assert_eq!(
        seq.steps(),
        &[
            Step::Text("L".into()),
            Step::Scatter(ms),
            Step::Text("O".into()),
            Step::Scatter(ms),
            Step::Text("V".into()),
            Step::Scatter(ms),
            Step::Text("E".into()),
            Step::Scatter(ms),
            Step::Clear,
        ]
    );
}

#[test]
fn spell_of_empty_word_only_clears() {
    assert_eq!(
        Sequence::spell("", Duration::ZERO).steps(),
        &[Step::Clear]
    );
}

#[test]
fn fire_runs_steps_in_order_and_rearms() {
    let mut e = engine(Script::default());
    let scatter = Duration::from_millis(50);
    let mut trigger = Trigger::new(Sequence::spell("HI", scatter));
    assert_eq!(trigger.sequence().steps().len(), 5);
    assert_eq!(trigger.sequence().steps()[0], Step::Text("H".into()));

    assert!(trigger.fire(&mut e).unwrap());
    assert!(trigger.is_armed());
    assert!(e.particles().is_empty());

    // H: 5 transition frames, scatter: 3 frames, I: 5, scatter: 3, clear: 5.
    let phases = &e.ticker().phases;
    assert_eq!(phases.len(), 21);
    let expected: Vec<Phase> = [
        (Phase::Transition, 5),
        (Phase::Scatter, 3),
        (Phase::Transition, 5),
        (Phase::Scatter, 3),
        (Phase::Transition, 5),
    ]
    .iter()
    .flat_map(|&(p, n)| std::iter::repeat_n(p, n))
    .collect();
    assert_eq!(phases, &expected);
}

#[test]
fn press_is_ignored_while_running() {
    let mut e = engine(Immediate::default());
    let mut trigger = Trigger::new(Sequence::new(vec![Step::Text("A".into())]));

    assert!(trigger.press());
    assert_eq!(trigger.state(), TriggerState::Running);
    assert!(!trigger.press());
    assert!(!trigger.fire(&mut e).unwrap());
    assert_eq!(e.frames(), 0);

    assert!(trigger.run_pending(&mut e).unwrap());
    assert!(trigger.is_armed());
    assert!(!e.particles().is_empty());
    assert!(!trigger.run_pending(&mut e).unwrap());
}

#[test]
fn failed_step_still_rearms() {
    let mut e = engine(Script {
        fail_at: Some(2),
        ..Script::default()
    });
    let mut trigger = Trigger::new(Sequence::love());

    let err = trigger.fire(&mut e).unwrap_err();
    assert!(matches!(err, MorphError::Tick(_)));
    assert!(trigger.is_armed());
}
