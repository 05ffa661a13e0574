use super::*;
use kurbo::{PathEl, Shape as _};

#[test]
fn filled_frame_repeats_color() {
    let canvas = Canvas::new(3, 2).unwrap();
    let f = FrameRGBA::filled(canvas, Rgba8Premul::from_straight_rgba(10, 20, 30, 255));
    assert_eq!(f.data.len(), 24);
    assert_eq!(f.pixel(2, 1).unwrap(), [10, 20, 30, 255]);
    assert!(f.pixel(3, 0).is_err());
}

#[test]
fn bounds_reject_non_finite() {
    assert!(Bounds::new(0.0, 0.0, f64::NAN, 1.0).is_err());
    assert!(Bounds::new(0.0, 0.0, 1.0, 1.0).is_ok());
}

#[test]
fn line_is_two_points_and_not_fillable() {
    let prim = Primitive::Line(Bounds::new(0.0, 0.0, 4.0, 3.0).unwrap());
    assert!(!prim.is_fillable());
    assert_eq!(
        prim.to_bez_path().elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(4.0, 3.0))
        ]
    );
}

#[test]
fn arc_starts_at_start_angle() {
    let bounds = Bounds::new(0.0, 0.0, 200.0, 100.0).unwrap();
    let path = Primitive::Arc {
        bounds,
        start: 90,
        end: 180,
    }
    .to_bez_path();
    let Some(PathEl::MoveTo(p)) = path.elements().first().copied() else {
        panic!("arc path must start with a move");
    };
    // 90 degrees clockwise from 3 o'clock is the bottom of the ellipse.
    assert!((p.x - 100.0).abs() < 1e-9 && (p.y - 100.0).abs() < 1e-9);
}

#[test]
fn wrapped_angles_sweep_forward() {
    let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0).unwrap();
    let arc = bounds.ellipse(315, 45);
    assert!((arc.sweep_angle - 90f64.to_radians()).abs() < 1e-12);
}

#[test]
fn extreme_angles_wrap_without_overflow() {
    let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0).unwrap();
    // i32::MAX - 10 is 117 mod 360, so reaching 0 takes 243 degrees.
    let arc = bounds.ellipse(i32::MAX - 10, 0);
    assert!((arc.sweep_angle - 243f64.to_radians()).abs() < 1e-9);
    let arc = bounds.ellipse(i32::MIN, i32::MAX);
    assert!((arc.sweep_angle - 360f64.to_radians()).abs() < 1e-12);
    let arc = bounds.ellipse(i32::MAX, i32::MIN);
    assert!(arc.sweep_angle >= 0.0 && arc.sweep_angle < 360f64.to_radians());
    assert_eq!(bounds.ellipse(45, 45).sweep_angle, 0.0);
    assert!(
        !Primitive::Arc {
            bounds,
            start: i32::MAX - 10,
            end: 0,
        }
        .to_bez_path()
        .elements()
        .is_empty()
    );
}

#[test]
fn pie_slice_is_closed_through_center() {
    let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0).unwrap();
    let prim = Primitive::PieSlice {
        bounds,
        start: 0,
        end: 90,
    };
    assert!(prim.is_fillable());
    let path = prim.to_bez_path();
    let els = path.elements();
    assert_eq!(els[0], PathEl::MoveTo(Point::new(50.0, 50.0)));
    assert_eq!(els.last(), Some(&PathEl::ClosePath));
    // A quarter disc of radius 50.
    let area = path.area().abs();
    let expected = std::f64::consts::PI * 2500.0 / 4.0;
    assert!((area - expected).abs() < 1.0, "area {area}");
}
