pub mod coord;
pub mod projection;

pub use coord::{apply_hemisphere, parse_coordinate};
pub use projection::{
    GeoPoint, MAX_ZOOM, PixelOffset, TILE_SIZE, TileCoordinate, TileFraction,
    degrees_to_cardinal, format_direction, nearest_pixel, pixel_offset_in_tile, to_tile,
    to_tile_fraction,
};
