use super::*;

#[test]
fn defaults_validate() {
    let opts = StampOptions::default();
    opts.validate().unwrap();
    assert_eq!(opts.minimap.width, 150);
    assert_eq!(opts.minimap.zoom.get(), 16);
    assert_eq!(opts.minimap.opacity.get(), 0.6);
    assert_eq!(opts.compass.width, 90);
    assert_eq!(opts.info.font_size, 10);
    assert_eq!(opts.margin, 10);
}

#[test]
fn partial_json_merges_over_defaults() {
    let opts = StampOptions::from_json_str(
        r##"{ "minimap": { "zoom": 12, "opacity": 1.0 }, "info": { "bg_color": "#112233" } }"##,
    )
    .unwrap();
    assert_eq!(opts.minimap.zoom.get(), 12);
    assert_eq!(opts.minimap.opacity, Opacity::OPAQUE);
    assert_eq!(opts.minimap.width, 150);
    assert_eq!(opts.info.bg_color, Color::rgb(0x11, 0x22, 0x33));
    assert_eq!(opts.info.font_size, 10);
    assert!(opts.show_compass);
}

#[test]
fn out_of_range_values_are_rejected() {
    assert!(matches!(
        StampOptions::from_json_str(r#"{ "minimap": { "zoom": 20 } }"#),
        Err(StampError::InvalidOption(_))
    ));
    assert!(matches!(
        StampOptions::from_json_str(r#"{ "minimap": { "opacity": 1.5 } }"#),
        Err(StampError::InvalidOption(_))
    ));
    assert!(matches!(
        StampOptions::from_json_str(r#"{ "compass": { "width": 0 } }"#),
        Err(StampError::InvalidOption(_))
    ));
    assert!(matches!(
        StampOptions::from_json_str(r#"{ "minimap": { "tile_url": "https://x/{z}/{x}.png" } }"#),
        Err(StampError::InvalidOption(_))
    ));
    assert!(Opacity::new(f32::NAN).is_err());
    assert!(ZoomLevel::new(19).is_ok());
}

#[test]
fn setters_validate() {
    let mut opts = StampOptions::default();
    assert!(opts.set_minimap_opacity(-0.1).is_err());
    opts.set_minimap_opacity(0.0).unwrap();
    assert_eq!(opts.minimap.opacity.get(), 0.0);
    assert!(opts.set_minimap_zoom(25).is_err());
    opts.set_info_bg_opacity(1.0).unwrap();
}

#[test]
fn options_serialize_back_to_json() {
    let text = serde_json::to_string(&StampOptions::default()).unwrap();
    let back = StampOptions::from_json_str(&text).unwrap();
    assert_eq!(back, StampOptions::default());
}

#[test]
fn bar_height_follows_line_count() {
    let info = InfoBarOptions::default();
    assert_eq!(info.bar_height(0), 0);
    assert_eq!(info.bar_height(1), 14 + 16);
    assert_eq!(info.bar_height(3), 3 * 14 + 16);
}

#[test]
fn compass_style_numbers_fall_back_to_nautical() {
    assert_eq!(CompassStyle::from_number(1), CompassStyle::Classic);
    assert_eq!(CompassStyle::from_number(2), CompassStyle::Minimal);
    assert_eq!(CompassStyle::from_number(3), CompassStyle::Nautical);
    assert_eq!(CompassStyle::from_number(9), CompassStyle::Nautical);
}

#[test]
fn radius_is_clamped_to_half_the_short_side() {
    assert_eq!(clamp_radius(8, 150, 150), 8.0);
    assert_eq!(clamp_radius(100, 150, 40), 20.0);
}

#[test]
fn explicit_assets_dir_wins() {
    let opts = StampOptions {
        assets_dir: Some(PathBuf::from("/opt/stamp/svg")),
        ..StampOptions::default()
    };
    assert_eq!(opts.resolve_assets_dir(), PathBuf::from("/opt/stamp/svg"));
}
