use super::*;

const ALL: [Ease; 3] = [Ease::Linear, Ease::InQuad, Ease::OutQuad];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_over_unit_interval() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=200 {
            let t = f64::from(i) / 200.0;
            let v = ease.apply(t);
            assert!(v >= prev, "{ease:?} decreased at t={t}: {prev} > {v}");
            prev = v;
        }
    }
}

#[test]
fn out_quad_matches_closed_form() {
    for t in [0.1, 0.25, 0.5, 0.9] {
        assert_eq!(Ease::OutQuad.apply(t), (2.0 - t) * t);
    }
    assert!(Ease::OutQuad.apply(0.25) > 0.25);
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::OutQuad.apply(-0.5), 0.0);
    assert_eq!(Ease::OutQuad.apply(1.5), 1.0);
}

#[test]
fn serde_names_are_snake_case() {
    assert_eq!(serde_json::to_string(&Ease::OutQuad).unwrap(), "\"out_quad\"");
    let e: Ease = serde_json::from_str("\"in_quad\"").unwrap();
    assert_eq!(e, Ease::InQuad);
}
