use chrono::{DateTime, Datelike as _, NaiveDateTime, Timelike as _};

use crate::geo::format_direction;
use crate::model::{AddressInfo, Direction};
use crate::options::DateStyle;

const PT_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y:%m:%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Caption lines with timestamps in the default [`DateStyle`].
pub fn layout(
    direction: Option<&Direction>,
    address: Option<&AddressInfo>,
    datetime: Option<&str>,
    is_landscape: bool,
) -> Vec<String> {
    layout_with_style(direction, address, datetime, is_landscape, DateStyle::default())
}

/// Caption lines, top to bottom.
///
/// 1. capture time and heading, separated by three spaces
/// 2. `"<number> <street>"`
/// 3. neighborhood and `"<city>, <state>"`, separated by `" / "`
///
/// Lines without content are left out. `_is_landscape` is accepted for layouts that vary with the
/// photo's orientation; every orientation currently gets the same lines.
pub fn layout_with_style(
    direction: Option<&Direction>,
    address: Option<&AddressInfo>,
    datetime: Option<&str>,
    _is_landscape: bool,
    date_style: DateStyle,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);

    let first: Vec<String> = [
        datetime.and_then(|d| format_datetime(d, date_style)),
        direction.map(|d| format_direction(d.degrees)),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();
    if !first.is_empty() {
        lines.push(first.join("   "));
    }

    if let Some(addr) = address {
        if let Some(street) = non_empty(&addr.street) {
            match non_empty(&addr.number) {
                Some(number) => lines.push(format!("{number} {street}")),
                None => lines.push(street.to_owned()),
            }
        }

        let mut third = Vec::with_capacity(2);
        if let Some(n) = non_empty(&addr.neighborhood) {
            third.push(n.to_owned());
        }
        if let Some(city) = non_empty(&addr.city) {
            match non_empty(&addr.state) {
                Some(state) => third.push(format!("{city}, {state}")),
                None => third.push(city.to_owned()),
            }
        }
        if !third.is_empty() {
            lines.push(third.join(" / "));
        }
    }

    lines
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Format a camera timestamp. Text that is not a recognized timestamp is returned as-is; blank
/// text yields `None`.
pub fn format_datetime(text: &str, style: DateStyle) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let Some(dt) = parse_datetime(text) else {
        return Some(text.to_owned());
    };
    Some(match style {
        DateStyle::Portuguese => format!(
            "{:02} de {} de {} {:02}:{:02}:{:02}",
            dt.day(),
            PT_MONTHS[dt.month0() as usize],
            dt.year(),
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        DateStyle::Iso => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

/// Wall-clock time as the camera recorded it; offsets are dropped, not applied.
fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y:%m:%d %H:%M:%S%:z") {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

#[cfg(test)]
#[path = "../../tests/unit/caption/layout.rs"]
mod tests;
