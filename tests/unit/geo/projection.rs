use super::*;

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn unit(state: &mut u64) -> f64 {
    (splitmix64(state) >> 11) as f64 / (1u64 << 53) as f64
}

fn random_point(state: &mut u64) -> (f64, f64) {
    let lat = unit(state) * 170.0 - 85.0;
    let lng = unit(state) * 359.999 - 180.0;
    (lat, lng)
}

#[test]
fn new_york_at_zoom_16() {
    let tile = to_tile(40.7128, -74.0060, 16);
    assert_eq!(tile.x, 19295);
    assert_eq!(tile.y, 24640);
    assert_eq!(tile.zoom, 16);
}

#[test]
fn null_island_is_grid_center() {
    let f = to_tile_fraction(0.0, 0.0, 1);
    assert!((f.x - 1.0).abs() < 1e-12);
    assert!((f.y - 1.0).abs() < 1e-12);
}

#[test]
fn tile_is_floor_of_fraction_for_random_inputs() {
    let mut state = 7u64;
    for _ in 0..2_000 {
        let (lat, lng) = random_point(&mut state);
        let zoom = (splitmix64(&mut state) % u64::from(MAX_ZOOM + 1)) as u8;
        let f = to_tile_fraction(lat, lng, zoom);
        let t = to_tile(lat, lng, zoom);
        assert_eq!(t.x, f.x.floor() as i64, "lat={lat} lng={lng} z={zoom}");
        assert_eq!(t.y, f.y.floor() as i64, "lat={lat} lng={lng} z={zoom}");
    }
}

#[test]
fn pixel_offset_is_always_inside_the_tile() {
    let mut state = 42u64;
    for zoom in [0u8, 5, 12, 16, 19] {
        for _ in 0..1_000 {
            let (lat, lng) = random_point(&mut state);
            let p = pixel_offset_in_tile(lat, lng, zoom);
            assert!((0..256).contains(&p.x), "x={} lat={lat} lng={lng}", p.x);
            assert!((0..256).contains(&p.y), "y={} lat={lat} lng={lng}", p.y);
        }
    }
}

#[test]
fn pixel_offset_clamps_the_far_edge() {
    // Just short of the next tile boundary along x at zoom 0.
    let lng = 180.0 - 360.0 * 0.25 / 256.0;
    let p = pixel_offset_in_tile(0.0, lng, 0);
    assert_eq!(p.x, 255);
}

#[test]
fn cardinal_points() {
    assert_eq!(degrees_to_cardinal(0.0), "N");
    assert_eq!(degrees_to_cardinal(90.0), "E");
    assert_eq!(degrees_to_cardinal(180.0), "S");
    assert_eq!(degrees_to_cardinal(270.0), "W");
    assert_eq!(degrees_to_cardinal(135.0), "SE");
    assert_eq!(degrees_to_cardinal(348.75), "N");
    assert_eq!(degrees_to_cardinal(348.74), "NNW");
}

#[test]
fn cardinal_normalizes_out_of_range_headings() {
    assert_eq!(degrees_to_cardinal(-10.0), degrees_to_cardinal(350.0));
    assert_eq!(degrees_to_cardinal(370.0), degrees_to_cardinal(10.0));
    assert_eq!(degrees_to_cardinal(720.0), "N");
}

#[test]
fn direction_format_has_two_decimals_and_label() {
    assert_eq!(format_direction(135.0), "135.00° SE");
    assert_eq!(format_direction(7.456), "7.46° N");
}

#[test]
fn tile_offset_wraps_x_and_drops_out_of_grid_y() {
    let t = TileCoordinate { x: 0, y: 0, zoom: 2 };
    assert_eq!(t.offset(-1, 0), Some(TileCoordinate { x: 3, y: 0, zoom: 2 }));
    assert_eq!(t.offset(4, 1), Some(TileCoordinate { x: 0, y: 1, zoom: 2 }));
    assert_eq!(t.offset(0, -1), None);
    assert_eq!(t.offset(0, 4), None);
}

#[test]
fn offset_rounding_to_the_tile_edge_carries_into_the_next_tile() {
    // 255.7px into tile x=0 at zoom 1
    let lng = 255.7 / 256.0 * 180.0 - 180.0;
    assert_eq!(pixel_offset_in_tile(0.0, lng, 1), PixelOffset { x: 255, y: 0 });

    let (tile, offset) = nearest_pixel(0.0, lng, 1);
    assert_eq!((tile.x, tile.y), (1, 1));
    assert_eq!(offset, PixelOffset { x: 0, y: 0 });
}

#[test]
fn carried_tile_wraps_at_the_antimeridian() {
    let lng = 179.9999;
    let (tile, offset) = nearest_pixel(10.0, lng, 0);
    assert_eq!(tile.x, 0);
    assert_eq!(offset.x, 0);
}

#[test]
fn nearest_pixel_agrees_away_from_tile_edges() {
    let mut state = 99u64;
    for _ in 0..1_000 {
        let (lat, lng) = random_point(&mut state);
        let (tile, offset) = nearest_pixel(lat, lng, 14);
        let clamped = pixel_offset_in_tile(lat, lng, 14);
        if clamped.x < 255 && clamped.y < 255 {
            assert_eq!(tile, to_tile(lat, lng, 14));
            assert_eq!(offset, clamped);
        }
    }
}
