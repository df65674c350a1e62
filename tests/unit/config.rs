use super::*;

#[test]
fn defaults_validate() {
    MorphConfig::default().validate().unwrap();
}

#[test]
fn zero_gap_is_a_configuration_error() {
    let cfg = MorphConfig {
        dot_gap: 0,
        ..MorphConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(MorphError::Configuration(_))));
}

#[test]
fn empty_viewport_is_a_configuration_error() {
    let cfg = MorphConfig {
        viewport: Viewport {
            width: 0,
            height: 600,
        },
        ..MorphConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(MorphError::Configuration(_))));
}

#[test]
fn non_finite_radius_rejected() {
    let cfg = MorphConfig {
        dot_radius: f64::NAN,
        ..MorphConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: MorphConfig = serde_json::from_str(r#"{ "dot_gap": 8, "seed": 7 }"#).unwrap();
    assert_eq!(cfg.dot_gap, 8);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.dot_radius, 7.0);
    assert_eq!(cfg.ease, Ease::OutQuad);
}

#[test]
fn fit_is_capped_by_height() {
    let cfg = MorphConfig::default();
    let vp = Viewport {
        width: 4000,
        height: 100,
    };
    // Width fit would be 0.22 * 100 / 10 * 4000 = 8800.
    assert_eq!(cfg.fit_font_px(10.0, vp), 60.0);
}

#[test]
fn fit_by_width_on_narrow_viewport() {
    let cfg = MorphConfig::default();
    let vp = Viewport {
        width: 200,
        height: 1000,
    };
    // 0.22 * 100 / 40 * 200 = 110, floored.
    assert_eq!(cfg.fit_font_px(40.0, vp), 110.0);
}

#[test]
fn scatter_steps_follow_duration() {
    let cfg = MorphConfig::default();
    assert_eq!(cfg.scatter_steps(Duration::from_millis(1000)), 40);
    assert_eq!(cfg.scatter_steps(Duration::from_millis(10)), 1);
    assert_eq!(cfg.scatter_steps(Duration::ZERO), 1);
}

#[test]
fn scatter_steps_exact_multiples_do_not_round_up() {
    let cfg = MorphConfig::default();
    assert_eq!(cfg.scatter_steps(Duration::from_millis(4025)), 161);
    assert_eq!(cfg.scatter_steps(Duration::from_millis(4026)), 162);
    for ms in (25..=10_000).step_by(25) {
        assert_eq!(cfg.scatter_steps(Duration::from_millis(ms)), (ms / 25) as u32);
    }
}
