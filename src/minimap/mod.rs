//! GPS-centered map thumbnail.

pub mod composer;
pub mod pin;

pub use composer::{MinimapComposer, PlacedTile, compose_tiles, tile_deltas};
pub use pin::{PIN_ASSET, PIN_SIZE, PinMarker};
