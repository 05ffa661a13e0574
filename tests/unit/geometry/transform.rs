use super::*;
use proptest::prelude::*;

fn close(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
}

#[test]
fn new_rejects_non_finite_parameters() {
    assert!(Transform::new(1.0, 0.0, f64::NAN, 0.0, 1.0, 0.0).is_err());
    assert!(Transform::new(f64::INFINITY, 0.0, 0.0, 0.0, 1.0, 0.0).is_err());
    assert_eq!(
        Transform::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0).unwrap(),
        Transform::IDENTITY
    );
}

#[test]
fn factories_are_unchecked_but_detectable() {
    let t = Transform::shift(f64::NAN, 0.0);
    assert!(!t.is_finite());
    assert!(matches!(
        t.validated().unwrap_err(),
        ProgError::InvalidArgument(_)
    ));
    let mut r = Transform::rotate_about(1.0, 2.0, 30.0);
    assert!(r.is_finite());
    assert_eq!(r.validated().unwrap(), r);
    r.then_scale(f64::INFINITY);
    assert!(!r.is_finite());
}

#[test]
fn shift_then_scale_order() {
    // merge: shift first, then scale.
    let mut t = Transform::shift(1.0, 2.0);
    t.then_scale(3.0);
    assert!(close(t.apply(0.0, 0.0), (3.0, 6.0)));

    // combine: scale is applied to the point before the shift.
    let mut t = Transform::shift(1.0, 2.0);
    t.combine(&Transform::scale(3.0));
    assert!(close(t.apply(0.0, 0.0), (1.0, 2.0)));
    assert!(close(t.apply(1.0, 1.0), (4.0, 5.0)));
}

#[test]
fn mul_matches_combine() {
    let a = Transform::rotate(30.0);
    let b = Transform::shift(4.0, -1.0);
    let mut c = a;
    c.combine(&b);
    assert_eq!(a * b, c);
    let p = (a * b) * Point::new(2.0, 3.0);
    let q = a.apply_point(b.apply_point(Point::new(2.0, 3.0)));
    assert!(close((p.x, p.y), (q.x, q.y)));
}

#[test]
fn pivot_builders_keep_center_fixed() {
    let (cx, cy) = (5.0, -7.0);
    assert!(close(Transform::rotate_about(cx, cy, 73.0).apply(cx, cy), (cx, cy)));
    assert!(close(Transform::scale_about(cx, cy, 2.5).apply(cx, cy), (cx, cy)));
    assert!(close(
        Transform::resize_about(cx, cy, 2.0, 0.5).apply(cx, cy),
        (cx, cy)
    ));
    assert!(close(
        Transform::skew_about(cx, cy, 1.0, 0.3, 0.2, 1.0).apply(cx, cy),
        (cx, cy)
    ));
}

#[test]
fn pivot_matches_three_step_composition() {
    let (cx, cy) = (3.0, 4.0);
    let direct = Transform::rotate_about(cx, cy, 90.0);
    let mut stepwise = Transform::shift(-cx, -cy);
    stepwise.then_rotate(90.0).then_shift(cx, cy);
    for (x, y) in [(0.0, 0.0), (1.0, 2.0), (-5.0, 8.0)] {
        assert!(close(direct.apply(x, y), stepwise.apply(x, y)));
    }
}

#[test]
fn rotation_uses_degrees() {
    assert!(close(Transform::rotate(90.0).apply(1.0, 0.0), (0.0, 1.0)));
    assert!(close(Transform::rotate(180.0).apply(1.0, 2.0), (-1.0, -2.0)));
}

#[test]
fn setters_overwrite_parts() {
    let mut t = Transform::rotate(45.0);
    t.set_shift(2.0, 3.0).set_scale(2.0);
    assert_eq!(t.to_array(), [2.0, 0.0, 2.0, 0.0, 2.0, 3.0]);
    t.set_rotate(90.0);
    assert!(close(t.apply(1.0, 0.0), (2.0, 4.0)));
}

#[test]
fn to_affine_agrees_with_apply() {
    let mut t = Transform::skew(1.0, 0.5, -0.25, 2.0);
    t.then_shift(3.0, 4.0);
    let p = t.to_affine() * kurbo::Point::new(1.5, -2.0);
    assert!(close((p.x, p.y), t.apply(1.5, -2.0)));
}

#[test]
fn display_and_serde() {
    let t = Transform::shift(1.0, 2.0);
    assert_eq!(t.to_string(), "{Transform: [1, 0, 1, 0, 1, 2]}");
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, "[1.0,0.0,1.0,0.0,1.0,2.0]");
    let back: Transform = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}

proptest! {
    #[test]
    fn identity_is_exact(x in -1e6f64..1e6, y in -1e6f64..1e6) {
        prop_assert_eq!(Transform::IDENTITY.apply(x, y), (x, y));
    }

    #[test]
    fn full_turn_about_any_pivot_is_identity(
        cx in -1e3f64..1e3,
        cy in -1e3f64..1e3,
        x in -1e3f64..1e3,
        y in -1e3f64..1e3,
    ) {
        let (px, py) = Transform::rotate_about(cx, cy, 360.0).apply(x, y);
        prop_assert!((px - x).abs() < 1e-9);
        prop_assert!((py - y).abs() < 1e-9);
    }
}
