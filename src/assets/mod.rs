//! SVG artwork and font loading.

pub mod fonts;
pub mod rasterize;

pub use rasterize::{PreparedSvg, SvgRasterizer};
