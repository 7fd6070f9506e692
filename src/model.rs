//! Values handed between the collaborators and the stamping core.

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, degrees_to_cardinal};

/// Camera heading read from the photo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// Degrees clockwise from north, `[0, 360)`.
    pub degrees: f64,
    /// `"True North"`, `"Magnetic North"` or the raw reference text.
    pub reference: String,
}

impl Direction {
    pub fn new(degrees: f64, reference: impl Into<String>) -> Self {
        Self {
            degrees,
            reference: reference.into(),
        }
    }

    /// Build from EXIF `GPSImgDirection`/`GPSImgDirectionRef`; the heading is rounded to two
    /// decimals.
    pub fn from_exif(degrees: f64, reference: Option<&str>) -> Self {
        let reference = match reference.map(str::trim) {
            Some(r) if r.eq_ignore_ascii_case("T") || r.eq_ignore_ascii_case("true north") => {
                "True North".to_owned()
            }
            Some(r) if r.eq_ignore_ascii_case("M") || r.eq_ignore_ascii_case("magnetic north") => {
                "Magnetic North".to_owned()
            }
            Some(r) => r.to_owned(),
            None => String::new(),
        };
        Self {
            degrees: (degrees * 100.0).round() / 100.0,
            reference,
        }
    }

    pub fn cardinal(&self) -> &'static str {
        degrees_to_cardinal(self.degrees)
    }
}

/// Reverse-geocoded address; every part is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub street: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postcode: Option<String>,
    pub display_name: Option<String>,
}

/// What the metadata provider extracted from one photo.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    pub gps: Option<GeoPoint>,
    pub direction: Option<Direction>,
    /// Capture time as written by the camera, e.g. `2025:01:15 23:49:08`.
    pub datetime: Option<String>,
    /// EXIF orientation tag (1..=8).
    pub orientation: Option<u8>,
}
