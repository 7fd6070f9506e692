use super::*;

const WHITE: [u8; 4] = [255, 255, 255, 255];

#[test]
fn procedural_pin_marks_the_center_column() {
    let map = Bitmap::filled(150, 150, WHITE).unwrap();
    let out = PinMarker::Procedural.draw(map).unwrap();

    assert_eq!(out.pixel(75, 55), Some([14, 35, 46, 255]));
    assert_ne!(out.pixel(75, 68), Some(WHITE));
    assert_eq!(out.pixel(75, 80), Some(WHITE));
    assert_eq!(out.pixel(10, 10), Some(WHITE));
}

#[test]
fn asset_pin_tip_sits_above_center() {
    let mut pin = Bitmap::new(PIN_SIZE, PIN_SIZE).unwrap();
    pin.set_pixel(16, 31, [0, 0, 255, 255]);
    let map = Bitmap::filled(100, 100, WHITE).unwrap();

    let out = PinMarker::Asset(pin).draw(map).unwrap();
    assert_eq!(out.pixel(50, 49), Some([0, 0, 255, 255]));
    assert_eq!(out.pixel(50, 50), Some(WHITE));
}

#[test]
fn missing_asset_selects_procedural() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit-pin-empty");
    std::fs::create_dir_all(&dir).unwrap();
    let r = SvgRasterizer::new(dir);
    assert!(matches!(PinMarker::from_assets(&r), PinMarker::Procedural));
}

#[test]
fn bundled_asset_is_used() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("svg");
    let r = SvgRasterizer::new(dir);
    match PinMarker::from_assets(&r) {
        PinMarker::Asset(bmp) => assert_eq!((bmp.width(), bmp.height()), (PIN_SIZE, PIN_SIZE)),
        PinMarker::Procedural => panic!("bundled pin should load"),
    }
}
