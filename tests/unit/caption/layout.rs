use super::*;

fn address() -> AddressInfo {
    AddressInfo {
        street: Some("Rua XV de Novembro".to_owned()),
        number: Some("1299".to_owned()),
        neighborhood: Some("Centro".to_owned()),
        city: Some("Curitiba".to_owned()),
        state: Some("Paraná".to_owned()),
        ..AddressInfo::default()
    }
}

#[test]
fn empty_input_yields_no_lines() {
    assert!(layout_with_style(None, None, None, false, DateStyle::Portuguese).is_empty());
    assert!(layout_with_style(None, Some(&AddressInfo::default()), None, true, DateStyle::Iso).is_empty());
}

#[test]
fn default_style_is_portuguese() {
    assert!(layout(None, None, None, false).is_empty());
    let lines = layout(None, None, Some("2025:03:04 05:06:07"), true);
    assert_eq!(lines, vec!["04 de mar de 2025 05:06:07".to_owned()]);
}

#[test]
fn datetime_alone_is_one_line() {
    let lines = layout_with_style(None, None, Some("2025-01-15T23:49:08"), false, DateStyle::Portuguese);
    assert_eq!(lines, vec!["15 de jan de 2025 23:49:08".to_owned()]);
}

#[test]
fn full_caption_has_three_lines() {
    let heading = Direction::new(45.0, "True North");
    let lines = layout_with_style(
        Some(&heading),
        Some(&address()),
        Some("2025:01:15 23:49:08"),
        true,
        DateStyle::Portuguese,
    );
    assert_eq!(
        lines,
        vec![
            "15 de jan de 2025 23:49:08   45.00° NE".to_owned(),
            "1299 Rua XV de Novembro".to_owned(),
            "Centro / Curitiba, Paraná".to_owned(),
        ]
    );
}

#[test]
fn optional_parts_are_dropped() {
    let addr = AddressInfo {
        street: Some("Rua das Flores".to_owned()),
        city: Some("Curitiba".to_owned()),
        ..AddressInfo::default()
    };
    let heading = Direction::new(270.0, "");
    let lines = layout_with_style(Some(&heading), Some(&addr), None, false, DateStyle::Iso);
    assert_eq!(
        lines,
        vec![
            "270.00° W".to_owned(),
            "Rua das Flores".to_owned(),
            "Curitiba".to_owned(),
        ]
    );
}

#[test]
fn state_without_city_is_not_shown() {
    let addr = AddressInfo {
        state: Some("Paraná".to_owned()),
        neighborhood: Some("Batel".to_owned()),
        ..AddressInfo::default()
    };
    let lines = layout_with_style(None, Some(&addr), None, false, DateStyle::Iso);
    assert_eq!(lines, vec!["Batel".to_owned()]);
}

#[test]
fn datetime_formats() {
    assert_eq!(
        format_datetime("2025:12:01 07:05:09", DateStyle::Portuguese).as_deref(),
        Some("01 de dez de 2025 07:05:09")
    );
    assert_eq!(
        format_datetime("2025-01-15 23:49:08", DateStyle::Iso).as_deref(),
        Some("2025-01-15 23:49:08")
    );
    assert_eq!(
        format_datetime("2025-01-15T23:49:08-03:00", DateStyle::Iso).as_deref(),
        Some("2025-01-15 23:49:08")
    );
    assert_eq!(
        format_datetime("2025:01:15 23:49:08+02:00", DateStyle::Portuguese).as_deref(),
        Some("15 de jan de 2025 23:49:08")
    );
}

#[test]
fn unparseable_datetime_is_verbatim() {
    assert_eq!(
        format_datetime("yesterday", DateStyle::Portuguese).as_deref(),
        Some("yesterday")
    );
    assert_eq!(format_datetime("   ", DateStyle::Portuguese), None);
}
