//! photostamp annotates a photo with where and which way it was taken.
//!
//! A stamping run reads the photo's GPS position, heading and capture time, then merges three
//! overlays onto the upright image:
//!
//! - a minimap stitched from slippy-map tiles with the GPS point on its center pixel
//! - a compass whose face is turned so the faced cardinal sits under a fixed marker
//! - a translucent caption bar with time, heading and the reverse-geocoded address
//!
//! [`StampCompositor`] drives a run; the collaborators behind it ([`MetadataProvider`],
//! [`Geocoder`], [`HttpClient`]) are traits so they can be swapped for in-process doubles.
#![forbid(unsafe_code)]

pub mod assets;
pub mod caption;
pub mod codec;
pub mod compass;
pub mod foundation;
pub mod geo;
pub mod geocode;
pub mod metadata;
pub mod minimap;
pub mod model;
pub mod net;
pub mod options;
pub mod render;
pub mod stamp;
pub mod tiles;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Bitmap, PremulRgba8};
pub use crate::foundation::error::{StampError, StampResult};
pub use crate::geo::{GeoPoint, PixelOffset, TileCoordinate, TileFraction};
pub use crate::geocode::{Geocoder, NoGeocoder, NominatimGeocoder};
pub use crate::metadata::{ExifToolMetadata, MetadataProvider, StaticMetadata};
pub use crate::model::{AddressInfo, Direction, PhotoMetadata};
pub use crate::net::{HttpClient, HttpError, ReqwestClient, RetryPolicy, TlsMode};
pub use crate::options::{
    CompassMarker, CompassOptions, CompassStyle, DateStyle, InfoBarOptions, MinimapOptions,
    Opacity, StampOptions, ZoomLevel,
};
pub use crate::stamp::{StampCompositor, StampServices};
