use serde_json::json;

use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(Rgba8::from_hex("#154a8f").unwrap(), Rgba8::rgb(0x15, 0x4a, 0x8f));
    assert_eq!(
        Rgba8::from_hex("0000FF80").unwrap(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 255,
            a: 128
        }
    );
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zz0000").is_err());
}

#[test]
fn deserializes_hex_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 0, 0));

    let c: Rgba8 = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));

    let c: Rgba8 = serde_json::from_value(json!([10, 20, 30, 40])).unwrap();
    assert_eq!(c.to_array(), [10, 20, 30, 40]);

    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}

#[test]
fn canvas_size_is_floating_point_dimensions() {
    let c = Canvas::new(640, 480);
    assert_eq!(c.size(), Size::new(640.0, 480.0));
}
