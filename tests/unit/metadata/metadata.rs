use super::*;

#[test]
fn numeric_output_is_read() {
    let meta = parse_exiftool_json(
        r#"[{
            "SourceFile": "IMG_0001.jpg",
            "GPSLatitude": 25.408611123,
            "GPSLatitudeRef": "S",
            "GPSLongitude": 49.2712,
            "GPSLongitudeRef": "W",
            "GPSImgDirection": 134.987,
            "GPSImgDirectionRef": "T",
            "DateTimeOriginal": "2025:01:15 23:49:08",
            "Orientation": 6
        }]"#,
    )
    .unwrap();

    let gps = meta.gps.unwrap();
    assert_eq!(gps.latitude, -25.408611);
    assert_eq!(gps.longitude, -49.2712);
    let dir = meta.direction.unwrap();
    assert_eq!(dir.degrees, 134.99);
    assert_eq!(dir.reference, "True North");
    assert_eq!(meta.datetime.as_deref(), Some("2025:01:15 23:49:08"));
    assert_eq!(meta.orientation, Some(6));
}

#[test]
fn dms_strings_are_accepted() {
    let meta = parse_exiftool_json(
        r#"[{ "GPSLatitude": "25 deg 24' 31.00\" S", "GPSLongitude": "49 deg 16' 16.32\" W" }]"#,
    )
    .unwrap();
    let gps = meta.gps.unwrap();
    assert!((gps.latitude + 25.408611).abs() < 1e-4);
    assert!((gps.longitude + 49.2712).abs() < 1e-4);
    assert!(meta.direction.is_none());
}

#[test]
fn missing_gps_is_none_and_create_date_is_a_fallback() {
    let meta = parse_exiftool_json(
        r#"[{ "GPSLatitude": 10.0, "CreateDate": "2024:06:01 10:00:00", "Orientation": 12 }]"#,
    )
    .unwrap();
    assert!(meta.gps.is_none());
    assert_eq!(meta.datetime.as_deref(), Some("2024:06:01 10:00:00"));
    assert_eq!(meta.orientation, None);
}

#[test]
fn malformed_json_is_a_metadata_error() {
    assert!(matches!(
        parse_exiftool_json("Error: File not found"),
        Err(StampError::Metadata(_))
    ));
    assert!(matches!(parse_exiftool_json("[]"), Err(StampError::Metadata(_))));
}

#[test]
fn static_provider_returns_its_values() {
    let meta = PhotoMetadata {
        gps: Some(GeoPoint::new(1.0, 2.0)),
        ..PhotoMetadata::default()
    };
    let provider = StaticMetadata::new(meta.clone());
    assert_eq!(provider.read(Path::new("whatever.jpg")).unwrap(), meta);
}

#[test]
fn missing_program_is_reported() {
    let provider = ExifToolMetadata::with_program("definitely-not-exiftool-4f1c");
    match provider.read(Path::new("photo.jpg")) {
        Err(StampError::Metadata(msg)) => assert!(msg.contains("not found"), "{msg}"),
        other => panic!("unexpected {other:?}"),
    }
}
