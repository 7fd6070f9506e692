use std::sync::Arc;

use crate::codec;
use crate::foundation::core::Bitmap;
use crate::foundation::error::{StampError, StampResult};
use crate::geo::TileCoordinate;
use crate::net::{HttpClient, RetryPolicy, get_with_retry};

/// Downloads single slippy-map tiles from a `{z}/{x}/{y}` URL template.
///
/// Calls share no mutable state, so one fetcher can serve a whole worker pool.
#[derive(Clone)]
pub struct TileFetcher {
    client: Arc<dyn HttpClient>,
    url_template: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for TileFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileFetcher")
            .field("url_template", &self.url_template)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl TileFetcher {
    pub fn new(client: Arc<dyn HttpClient>, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn tile_url(&self, tile: TileCoordinate) -> String {
        self.url_template
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }

    pub fn fetch(&self, tile: TileCoordinate) -> StampResult<Bitmap> {
        let url = self.tile_url(tile);
        tracing::debug!(%url, "fetching tile");
        let bytes = get_with_retry(self.client.as_ref(), &url, self.retry)
            .map_err(|e| StampError::tile_fetch(&url, e.to_string()))?;
        codec::decode(&bytes).map_err(|e| StampError::tile_fetch(&url, e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tiles/fetcher.rs"]
mod tests;
