use super::*;

#[test]
fn parses_short_long_and_alpha_forms() {
    assert_eq!(Color::parse_hex("#fff").unwrap(), Color::WHITE);
    assert_eq!(
        Color::parse_hex("#00d4d4").unwrap(),
        Color::rgb(0x00, 0xd4, 0xd4)
    );
    assert_eq!(
        Color::parse_hex("11223380").unwrap(),
        Color::rgba(0x11, 0x22, 0x33, 0x80)
    );
}

#[test]
fn rejects_malformed_colors() {
    for bad in ["", "#12", "#12345", "#gggggg", "#ééé"] {
        let err = Color::parse_hex(bad).unwrap_err();
        assert!(matches!(err, StampError::InvalidOption(_)), "{bad}");
    }
}

#[test]
fn premultiplies_and_scales_opacity() {
    let c = Color::rgb(200, 100, 0).with_opacity(0.5);
    assert_eq!(c.a, 128);
    assert_eq!(c.to_premul(), [100, 50, 0, 128]);
}

#[test]
fn serde_uses_hex_strings() {
    let c: Color = serde_json::from_str("\"#000000\"").unwrap();
    assert_eq!(c, Color::BLACK);
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#000000\"");
    assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
}
