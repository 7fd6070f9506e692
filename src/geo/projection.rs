//! Web Mercator (EPSG:3857) tile math.
//!
//! Everything here is pure: no I/O and no failure modes. Inputs outside the projectable range
//! produce non-finite or out-of-grid values that callers clip against the tile grid.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Edge length of a slippy-map tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Highest zoom level served by standard tile servers.
pub const MAX_ZOOM: u8 = 19;

const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// WGS84 position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Integer tile address on the grid of one zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    pub x: i64,
    pub y: i64,
    pub zoom: u8,
}

impl TileCoordinate {
    /// Number of tiles along one axis at this zoom level.
    pub fn grid_size(self) -> i64 {
        1i64 << self.zoom
    }

    /// Neighbor at a signed tile delta. `x` wraps around the antimeridian; `None` when `y`
    /// leaves the grid.
    pub fn offset(self, dx: i64, dy: i64) -> Option<Self> {
        let n = self.grid_size();
        let y = self.y + dy;
        if !(0..n).contains(&y) {
            return None;
        }
        Some(Self {
            x: (self.x + dx).rem_euclid(n),
            y,
            zoom: self.zoom,
        })
    }
}

/// Tile position with sub-tile precision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileFraction {
    pub x: f64,
    pub y: f64,
    pub zoom: u8,
}

/// Pixel position inside one 256px tile, each axis in `[0, 256)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelOffset {
    pub x: i64,
    pub y: i64,
}

pub fn to_tile_fraction(lat: f64, lng: f64, zoom: u8) -> TileFraction {
    let n = f64::from(1u32 << zoom.min(31));
    let lat_rad = lat.to_radians();
    let x = (lng + 180.0) / 360.0 * n;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;
    TileFraction { x, y, zoom }
}

pub fn to_tile(lat: f64, lng: f64, zoom: u8) -> TileCoordinate {
    let f = to_tile_fraction(lat, lng, zoom);
    TileCoordinate {
        x: f.x.floor() as i64,
        y: f.y.floor() as i64,
        zoom,
    }
}

/// Where the coordinate falls inside its tile, rounded to whole pixels.
///
/// A position within half a pixel of the tile's far edge rounds to 256; it is clamped to 255 so
/// the offset always addresses a pixel of the tile returned by [`to_tile`].
pub fn pixel_offset_in_tile(lat: f64, lng: f64, zoom: u8) -> PixelOffset {
    let f = to_tile_fraction(lat, lng, zoom);
    let tile = to_tile(lat, lng, zoom);
    let max = i64::from(TILE_SIZE) - 1;
    let px = |frac: f64, whole: i64| -> i64 {
        let v = ((frac - whole as f64) * f64::from(TILE_SIZE)).round();
        if v.is_finite() {
            (v as i64).clamp(0, max)
        } else {
            0
        }
    };
    PixelOffset {
        x: px(f.x, tile.x),
        y: px(f.y, tile.y),
    }
}

/// Tile and in-tile pixel holding the coordinate, rounded to the nearest whole pixel.
///
/// Unlike [`pixel_offset_in_tile`], a rounded offset of 256 is carried into the next tile as 0, so
/// the returned pixel is always the nearest one.
pub fn nearest_pixel(lat: f64, lng: f64, zoom: u8) -> (TileCoordinate, PixelOffset) {
    let f = to_tile_fraction(lat, lng, zoom);
    let mut tile = to_tile(lat, lng, zoom);
    let size = i64::from(TILE_SIZE);
    let px = |frac: f64, whole: i64| -> i64 {
        let v = ((frac - whole as f64) * f64::from(TILE_SIZE)).round();
        if v.is_finite() { (v as i64).clamp(0, size) } else { 0 }
    };
    let mut offset = PixelOffset {
        x: px(f.x, tile.x),
        y: px(f.y, tile.y),
    };
    if offset.x == size {
        tile.x = (tile.x + 1).rem_euclid(tile.grid_size());
        offset.x = 0;
    }
    if offset.y == size {
        tile.y += 1;
        offset.y = 0;
    }
    (tile, offset)
}

/// 16-point compass label for a heading; any finite input is normalized into `[0, 360)`.
pub fn degrees_to_cardinal(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized + 11.25) / 22.5).floor() as usize % CARDINALS.len();
    CARDINALS[index]
}

/// `"135.00° SE"`.
pub fn format_direction(degrees: f64) -> String {
    format!("{degrees:.2}° {}", degrees_to_cardinal(degrees))
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projection.rs"]
mod tests;
