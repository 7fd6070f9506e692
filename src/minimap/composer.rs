use std::ops::RangeInclusive;

use rayon::prelude::*;

use crate::foundation::core::Bitmap;
use crate::foundation::error::{StampError, StampResult};
use crate::geo::{GeoPoint, PixelOffset, TILE_SIZE, TileCoordinate, nearest_pixel};
use crate::minimap::pin::PinMarker;
use crate::tiles::TileFetcher;

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// One fetched tile and its signed position relative to the center tile.
#[derive(Clone, Debug)]
pub struct PlacedTile {
    pub dx: i64,
    pub dy: i64,
    pub bitmap: Bitmap,
}

/// Stitches map tiles into a square minimap centered on a GPS point.
#[derive(Debug)]
pub struct MinimapComposer {
    fetcher: TileFetcher,
    pin: PinMarker,
    fetch_threads: usize,
}

impl MinimapComposer {
    pub fn new(fetcher: TileFetcher, pin: PinMarker, fetch_threads: usize) -> Self {
        Self {
            fetcher,
            pin,
            fetch_threads: fetch_threads.max(1),
        }
    }

    /// Render a `size`×`size` map at `zoom` with `point` on the center pixel and the pin on top.
    #[tracing::instrument(level = "debug", skip_all, fields(%point, size = size, zoom = zoom))]
    pub fn compose(&self, point: GeoPoint, size: u32, zoom: u8) -> StampResult<Bitmap> {
        let (center, offset) = nearest_pixel(point.latitude, point.longitude, zoom);
        let (xs, ys) = tile_deltas(offset, size);

        let wanted: Vec<(i64, i64, TileCoordinate)> = ys
            .flat_map(|dy| xs.clone().map(move |dx| (dx, dy)))
            .filter_map(|(dx, dy)| center.offset(dx, dy).map(|tile| (dx, dy, tile)))
            .collect();
        tracing::debug!(?center, ?offset, tiles = wanted.len(), "fetching minimap tiles");

        let pool = build_thread_pool(self.fetch_threads)?;
        let tiles = pool.install(|| {
            wanted
                .par_iter()
                .map(|&(dx, dy, tile)| {
                    self.fetcher
                        .fetch(tile)
                        .map(|bitmap| PlacedTile { dx, dy, bitmap })
                })
                .collect::<StampResult<Vec<_>>>()
        })?;

        let map = compose_tiles(size, offset, tiles)?;
        self.pin.draw(map)
    }
}

/// Signed tile deltas (x, y) whose footprint intersects the `size`-wide window around `offset`.
pub fn tile_deltas(offset: PixelOffset, size: u32) -> (RangeInclusive<i64>, RangeInclusive<i64>) {
    let half = i64::from(size / 2);
    let tile = f64::from(TILE_SIZE);
    let span = |p: i64| {
        let lo = ((p - half) as f64 / tile).floor() as i64;
        let hi = ((p + half) as f64 / tile).ceil() as i64;
        lo..=hi
    };
    (span(offset.x), span(offset.y))
}

/// Lay `tiles` onto a white `size`×`size` canvas so the pixel at `offset` inside tile (0, 0) lands
/// on the canvas center.
pub fn compose_tiles(
    size: u32,
    offset: PixelOffset,
    tiles: impl IntoIterator<Item = PlacedTile>,
) -> StampResult<Bitmap> {
    let mut canvas = Bitmap::filled(size, size, BACKGROUND)?;
    let center = i64::from(size / 2);
    let tile = i64::from(TILE_SIZE);
    for t in tiles {
        let x = center - offset.x + t.dx * tile;
        let y = center - offset.y + t.dy * tile;
        crate::render::copy_into(&mut canvas, &t.bitmap, x, y);
    }
    Ok(canvas)
}

fn build_thread_pool(threads: usize) -> StampResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("tile-fetch-{i}"))
        .build()
        .map_err(|e| StampError::Other(anyhow::anyhow!("failed to build tile fetch pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/minimap/composer.rs"]
mod tests;
