use super::*;
use serde_json::json;

fn near(a: Color, b: Color) -> bool {
    (a.r - b.r).abs() < 1e-9 && (a.g - b.g).abs() < 1e-9 && (a.b - b.b).abs() < 1e-9
}

#[test]
fn parses_names_case_insensitively() {
    assert_eq!("white".parse::<Color>().unwrap(), Color::WHITE);
    assert_eq!(Color::from_name("CornflowerBlue").unwrap().to_rgb8(), [100, 149, 237]);
    let err = Color::from_name("not-a-color").unwrap_err();
    assert!(matches!(err, ProgError::InvalidColor(_)));
}

#[test]
fn parses_short_and_long_hex() {
    assert_eq!(Color::from_hex("#f80").unwrap().to_rgb8(), [255, 136, 0]);
    assert_eq!(Color::from_hex("#FF8800").unwrap().hex_l(), "#ff8800");
    assert!(Color::from_hex("#ff88").is_err());
    assert!(Color::from_hex("#gg0000").is_err());
}

#[test]
fn rgb_channels_must_be_unit_floats() {
    assert!(Color::rgb(0.0, 0.5, 1.0).is_ok());
    assert!(matches!(
        Color::rgb(1.5, 0.0, 0.0).unwrap_err(),
        ProgError::InvalidColor(_)
    ));
    assert!(Color::rgb(f64::NAN, 0.0, 0.0).is_err());
}

#[test]
fn hsl_and_hsv_use_hue_fractions() {
    let red = Color::rgb(1.0, 0.0, 0.0).unwrap();
    assert!(near(Color::hsl(0.0, 1.0, 0.5).unwrap(), red));
    assert!(near(Color::hsv(0.0, 1.0, 1.0).unwrap(), red));
    let cyan = Color::rgb(0.0, 1.0, 1.0).unwrap();
    assert!(near(Color::hsl(0.5, 1.0, 0.5).unwrap(), cyan));
    assert!(near(Color::hsv(0.5, 1.0, 1.0).unwrap(), cyan));
    assert!(near(Color::hsl(0.3, 0.0, 0.25).unwrap(), Color::rgb(0.25, 0.25, 0.25).unwrap()));
}

#[test]
fn every_spec_form_deserializes() {
    let red = Color::rgb(1.0, 0.0, 0.0).unwrap();
    for v in [
        json!("red"),
        json!("#ff0000"),
        json!([1.0, 0.0, 0.0]),
        json!(["rgb", 1.0, 0.0, 0.0]),
        json!(["hsl", 0.0, 1.0, 0.5]),
        json!(["hsv", 0.0, 1.0, 1.0]),
        json!({"rgb": [1.0, 0.0, 0.0]}),
        json!({"hsl": [0.0, 1.0, 0.5]}),
        json!({"hex": "#f00"}),
        json!({"red": 1.0, "green": 0.0, "blue": 0.0}),
    ] {
        let c: Color = serde_json::from_value(v.clone()).unwrap();
        assert!(near(c, red), "{v} resolved to {c:?}");
    }
}

#[test]
fn unknown_tag_is_rejected() {
    let err = ColorSpec::Tagged("cmy".to_owned(), 0.0, 0.0, 0.0)
        .resolve()
        .unwrap_err();
    assert!(matches!(err, ProgError::InvalidColor(_)));
    assert!(serde_json::from_value::<Color>(json!(["cmy", 0.0, 0.0, 0.0])).is_err());
}

#[test]
fn serializes_as_triple() {
    let c = Color::rgb(0.25, 0.5, 1.0).unwrap();
    assert_eq!(serde_json::to_value(c).unwrap(), json!([0.25, 0.5, 1.0]));
    assert_eq!(c.to_string(), "#4080ff");
}
