use super::*;
use crate::test_support::BlockSurface;

fn sampler(width: u32, height: u32, gap: u32) -> ShapeSampler<BlockSurface> {
    let config = MorphConfig {
        viewport: Viewport { width, height },
        dot_gap: gap,
        ..MorphConfig::default()
    };
    ShapeSampler::new(BlockSurface::new(1, 1), config).unwrap()
}

#[test]
fn new_sizes_surface_and_applies_ink() {
    let s = sampler(300, 100, 5);
    assert_eq!(s.viewport(), Viewport { width: 300, height: 100 });
    assert_eq!(s.surface().fill(), MorphConfig::default().ink_color);
}

#[test]
fn single_glyph_samples_its_block() {
    let mut s = sampler(300, 100, 5);
    // Height-capped at 60px: block spans x 132..162, y 20..80.
    let points = s.sample_text("I").unwrap();
    assert_eq!(points.len(), 6 * 12);
    assert_eq!(points[0], Point::new(135.0, 20.0));
    assert_eq!(points[5], Point::new(160.0, 20.0));
    assert_eq!(points[6], Point::new(135.0, 25.0));
    assert_eq!(*points.last().unwrap(), Point::new(160.0, 75.0));
}

#[test]
fn points_are_row_major_and_on_grid() {
    let mut s = sampler(200, 120, 7);
    let points = s.sample_text("OK").unwrap();
    assert!(!points.is_empty());
    for p in &points {
        assert_eq!(p.x as u32 % 7, 0);
        assert_eq!(p.y as u32 % 7, 0);
    }
    for w in points.windows(2) {
        assert!((w[0].y, w[0].x) < (w[1].y, w[1].x));
    }
}

#[test]
fn sampling_is_deterministic() {
    let mut s = sampler(320, 200, 6);
    let a = s.sample_text("LOVE").unwrap();
    let b = s.sample_text("LOVE").unwrap();
    assert_eq!(a, b);
}

#[test]
fn blank_text_yields_no_targets() {
    let mut s = sampler(300, 100, 5);
    assert!(s.sample_text("").unwrap().is_empty());
    assert!(s.sample_text("   ").unwrap().is_empty());
}

#[test]
fn rasterize_replaces_previous_text() {
    let mut s = sampler(300, 100, 5);
    let wide = s.sample_text("WW").unwrap();
    let narrow = s.sample_text("I").unwrap();
    assert!(narrow.len() < wide.len());
}

#[test]
fn resize_affects_later_samplings() {
    let mut s = sampler(300, 100, 5);
    let before = s.sample_text("I").unwrap();
    s.resize(Viewport { width: 300, height: 200 }).unwrap();
    let after = s.sample_text("I").unwrap();
    assert_ne!(before, after);
    assert_eq!(s.surface().fill(), MorphConfig::default().ink_color);
}

#[test]
fn resize_rejects_empty_viewport() {
    let mut s = sampler(300, 100, 5);
    assert!(s.resize(Viewport { width: 0, height: 10 }).is_err());
}
