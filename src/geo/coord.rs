use std::sync::LazyLock;

use regex::Regex;

static DMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*(\d+(?:\.\d+)?)\s*deg\s*(\d+(?:\.\d+)?)'\s*(\d+(?:\.\d+)?)"\s*([NSEW])?\s*$"#)
        .expect("DMS pattern compiles")
});

/// Parse a coordinate written either as decimal degrees (`-25.408611`) or as exiftool-style
/// DMS (`25 deg 24' 31.00" S`).
///
/// A trailing `S` or `W` hemisphere letter makes the result negative. Anything else that does not
/// parse yields `0.0`.
pub fn parse_coordinate(text: &str) -> f64 {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<f64>()
        && v.is_finite()
    {
        return v;
    }

    let Some(caps) = DMS.captures(trimmed) else {
        return 0.0;
    };
    let part = |i: usize| -> f64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let value = part(1) + part(2) / 60.0 + part(3) / 3600.0;

    match caps.get(4).map(|m| m.as_str().to_ascii_uppercase()) {
        Some(h) if h == "S" || h == "W" => -value,
        _ => value,
    }
}

/// Apply an EXIF hemisphere reference (`S`, `South`, `W`, `West`, …) to a coordinate.
///
/// References only ever force a negative sign; a value that is already negative stays negative.
pub fn apply_hemisphere(value: f64, reference: Option<&str>) -> f64 {
    let negative = reference
        .map(|r| r.trim().to_ascii_uppercase())
        .is_some_and(|r| r.starts_with('S') || r.starts_with('W'));
    if negative { -value.abs() } else { value }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/coord.rs"]
mod tests;
