use super::*;
use crate::test_support::BlockSurface;

fn frame<'a>(index: u64, interval: Duration, last: bool, surface: &'a BlockSurface) -> Frame<'a> {
    Frame {
        index,
        phase: Phase::Transition,
        interval,
        progress: 0.0,
        last,
        particles: &[],
        surface,
    }
}

#[test]
fn immediate_counts_ticks() {
    let surface = BlockSurface::new(4, 4);
    let mut t = Immediate::default();
    for i in 0..3 {
        t.tick(&frame(i, Duration::from_millis(17), false, &surface))
            .unwrap();
    }
    assert_eq!(t.ticks, 3);
}

#[test]
fn real_time_spaces_ticks_by_interval() {
    let surface = BlockSurface::new(4, 4);
    let interval = Duration::from_millis(5);
    let mut t = RealTime::new();
    let start = Instant::now();
    for i in 0..3 {
        t.tick(&frame(i, interval, false, &surface)).unwrap();
    }
    assert!(start.elapsed() >= interval * 2);
}

#[test]
fn png_sequence_keeps_every_nth_frame() {
    let dir = PathBuf::from("target").join("tick_png_sequence");
    let _ = std::fs::remove_dir_all(&dir);

    let surface = BlockSurface::new(8, 6);
    let mut t = PngSequence::new(&dir, 2, Immediate::default()).unwrap();
    for i in 0..5 {
        t.tick(&frame(i, Duration::ZERO, i == 4, &surface)).unwrap();
    }

    assert_eq!(t.written(), 3);
    assert_eq!(t.inner().ticks, 5);
    let img = image::open(dir.join("frame_000002.png")).unwrap();
    assert_eq!((img.width(), img.height()), (8, 6));
    assert!(!dir.join("frame_000003.png").exists());
}

fn drive<T: Ticker>(mut ticker: T, frame: &Frame<'_>) {
    ticker.tick(frame).unwrap();
}

#[test]
fn ticker_through_mut_ref_and_box() {
    let surface = BlockSurface::new(2, 2);
    let mut inner = Immediate::default();
    drive(&mut inner, &frame(0, Duration::ZERO, false, &surface));
    drive(&mut inner, &frame(1, Duration::ZERO, false, &surface));
    assert_eq!(inner.ticks, 2);

    let boxed: Box<dyn Ticker> = Box::new(Immediate::default());
    drive(boxed, &frame(0, Duration::ZERO, false, &surface));
}
