use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_css_color("#ff0000").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(parse_css_color("#0f8").unwrap(), Rgba8::rgb(0, 255, 136));
    assert_eq!(
        parse_css_color("#0000FF80").unwrap(),
        Rgba8::rgba(0, 0, 255, 128)
    );
    assert!(parse_css_color("#12345").is_err());
}

#[test]
fn parses_functional_forms() {
    assert_eq!(
        parse_css_color("rgb(10, 20, 30)").unwrap(),
        Rgba8::rgb(10, 20, 30)
    );
    assert_eq!(
        parse_css_color("rgba(255,255,255,0.5)").unwrap(),
        Rgba8::rgba(255, 255, 255, 128)
    );
    // Pure red.
    assert_eq!(
        parse_css_color("hsl(0, 100%, 50%)").unwrap(),
        Rgba8::rgb(255, 0, 0)
    );
    let blueish = parse_css_color("hsl(240, 80%, 70%)").unwrap();
    assert!(blueish.b > blueish.r && blueish.b > blueish.g);
    assert_eq!(
        parse_css_color("hsla(120, 100%, 50%, 0.2)").unwrap().a,
        51
    );
}

#[test]
fn parses_names_and_rejects_garbage() {
    assert_eq!(parse_css_color("White").unwrap(), Rgba8::WHITE);
    assert_eq!(parse_css_color("transparent").unwrap().a, 0);
    assert!(parse_css_color("cornflower").is_err());
    assert!(parse_css_color("rgb(1,2)").is_err());
    assert_eq!(Rgba8::parse_or_white("nope"), Rgba8::WHITE);
}

#[test]
fn alpha_helpers_clamp() {
    let c = Rgba8::rgba(1, 2, 3, 200);
    assert_eq!(c.with_alpha_mul(0.5).a, 100);
    assert_eq!(c.with_alpha_mul(4.0).a, 200);
    assert_eq!(c.with_alpha(-1.0).a, 0);
}

#[test]
fn deserializes_from_string_or_array() {
    let c: Rgba8 = serde_json::from_value(json!("#336699")).unwrap();
    assert_eq!(c, Rgba8::rgb(0x33, 0x66, 0x99));
    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c, Rgba8::rgba(1, 2, 3, 4));
    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}

#[test]
fn serializes_as_hex() {
    let c = Rgba8::rgba(0x12, 0xab, 0x00, 0xff);
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#12ab00ff"));
    let back: Rgba8 = serde_json::from_value(json!(c.to_hex())).unwrap();
    assert_eq!(back, c);
}
